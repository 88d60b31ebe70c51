use std::fmt;

use serde::{Deserialize, Serialize};

/// Face value of an occupied cell (2, 4, 8, ...).
pub type Tile = u64;

/// Largest value a single tile may be inserted with. Moves keep the tile sum
/// unchanged, so no merge on a board of this crate's sizes can exceed `Tile::MAX`.
pub const MAX_TILE: Tile = u32::MAX as Tile;

/// A board position as `(row, col)`, zero-based from the top-left corner.
pub type Coord = (usize, usize);

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Tile(Tile),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool { matches!(self, Cell::Empty) }

    /// Tile value, or `None` for an empty cell.
    #[inline]
    pub fn value(self) -> Option<Tile> {
        match self {
            Cell::Empty => None,
            Cell::Tile(v) => Some(v),
        }
    }
}

impl From<Tile> for Cell {
    /// `0` maps to an empty cell; any other value to a tile.
    fn from(v: Tile) -> Self {
        if v == 0 { Cell::Empty } else { Cell::Tile(v) }
    }
}

/// Square grid of cells stored row-major.
///
/// The dimension is fixed at construction and must be at least 2. Indexing
/// outside the grid is a logic error and panics.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dimension: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `dimension x dimension` board.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension >= 2, "board dimension must be at least 2, got {dimension}");
        Board { dimension, cells: vec![Cell::Empty; dimension * dimension] }
    }

    /// Build a board from row slices, `0` meaning empty.
    ///
    /// ```
    /// use number_tiles::engine::{Board, Cell};
    /// let b = Board::from_rows(&[&[2, 0], &[0, 4]]);
    /// assert_eq!(b.get(1, 1), Cell::Tile(4));
    /// assert_eq!(b.count_empty(), 2);
    /// ```
    pub fn from_rows(rows: &[&[Tile]]) -> Self {
        let mut board = Board::new(rows.len());
        for (row, values) in rows.iter().enumerate() {
            assert_eq!(values.len(), board.dimension, "row {row} is not {} cells wide", board.dimension);
            for (col, &v) in values.iter().enumerate() {
                board.set(row, col, Cell::from(v));
            }
        }
        board
    }

    #[inline]
    pub fn dimension(&self) -> usize { self.dimension }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell { self.cells[self.index(row, col)] }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Overwrite every cell with `cell`.
    pub fn fill_all(&mut self, cell: Cell) {
        self.cells.iter_mut().for_each(|c| *c = cell);
    }

    /// Empty coordinates in row-major order. Computed lazily from the
    /// current contents on every call.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(move |&(r, c)| self.get(r, c).is_empty())
    }

    /// Occupied cells in row-major order with their values.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.coords().filter_map(move |(r, c)| self.get(r, c).value().map(|v| ((r, c), v)))
    }

    pub fn count_empty(&self) -> usize { self.cells.iter().filter(|c| c.is_empty()).count() }

    /// Sum of all tile values on the board.
    pub fn tile_sum(&self) -> u64 { self.tiles().map(|(_, v)| v).sum() }

    /// Largest tile value present, or 0 on an empty board.
    pub fn highest_tile(&self) -> Tile { self.tiles().map(|(_, v)| v).max().unwrap_or(0) }

    fn coords(&self) -> impl Iterator<Item = Coord> {
        let d = self.dimension;
        (0..d).flat_map(move |r| (0..d).map(move |c| (r, c)))
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.dimension && col < self.dimension,
            "cell ({row}, {col}) is outside a {0}x{0} board",
            self.dimension
        );
        row * self.dimension + col
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Tile>> = self
            .cells
            .chunks(self.dimension)
            .map(|row| row.iter().map(|c| c.value().unwrap_or(0)).collect())
            .collect();
        write!(f, "Board({rows:?})")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.dimension * 8 - 1);
        for (r, row) in self.cells.chunks(self.dimension).enumerate() {
            if r > 0 {
                writeln!(f, "{separator}")?;
            }
            let line: Vec<String> = row.iter().map(format_cell).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => " ".repeat(7),
        Cell::Tile(v) => format!("{v:^7}"),
    }
}
