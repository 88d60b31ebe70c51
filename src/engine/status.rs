use super::board::{Board, Cell, Coord, Tile};

/// First occupied cell (row-major) whose value reaches `threshold`.
pub fn find_winning_tile(board: &Board, threshold: Tile) -> Option<Coord> {
    board.tiles().find(|&(_, v)| v >= threshold).map(|(at, _)| at)
}

/// True when the board is full and no cell matches its neighbour below or
/// to its right, i.e. no move in any direction can change it.
pub fn is_stuck(board: &Board) -> bool {
    if board.empty_cells().next().is_some() {
        return false;
    }
    let d = board.dimension();
    for row in 0..d {
        for col in 0..d {
            let cell = board.get(row, col);
            debug_assert!(cell != Cell::Empty, "full board reported an empty cell at ({row}, {col})");
            let below = row + 1 < d && board.get(row + 1, col) == cell;
            let right = col + 1 < d && board.get(row, col + 1) == cell;
            if below || right {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winning_tile_is_first_in_row_major_order() {
        let b = Board::from_rows(&[&[2, 0, 0], &[0, 2048, 0], &[4096, 0, 0]]);
        assert_eq!(find_winning_tile(&b, 2048), Some((1, 1)));
        assert_eq!(find_winning_tile(&b, 4096), Some((2, 0)));
        assert_eq!(find_winning_tile(&b, 8192), None);
    }

    #[test]
    fn not_stuck_with_empty_cell() {
        let b = Board::from_rows(&[&[2, 4], &[8, 0]]);
        assert!(!is_stuck(&b));
    }

    #[test]
    fn not_stuck_with_vertical_pair() {
        let b = Board::from_rows(&[&[2, 4, 8], &[16, 32, 64], &[128, 256, 64]]);
        assert!(!is_stuck(&b));
    }

    #[test]
    fn not_stuck_with_horizontal_pair() {
        let b = Board::from_rows(&[&[2, 4], &[8, 8]]);
        assert!(!is_stuck(&b));
    }

    #[test]
    fn stuck_checkerboard() {
        let b = Board::from_rows(&[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]]);
        assert!(is_stuck(&b));
    }
}
