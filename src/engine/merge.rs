//! Line-merge pipeline: `condense` → `collapse` → `convert`.
//!
//! Every stage works on one line, already reordered so that slot 0 is the
//! leading edge (see [`line_coordinates`](super::line_coordinates)). Slots in
//! tokens and orders are line-local indices, never board coordinates.
//!
//! The split between single and double merges carries a rendering hint: in a
//! single merge the receiving tile never moved, so only one tile slides; in a
//! double merge both tiles slide to a shared destination.

use super::board::{Cell, Tile};

/// Intermediate per-tile token produced by [`condense`] and [`collapse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionToken {
    /// Tile sits at its original slot and has no merge partner yet.
    Stationary { origin: usize, value: Tile },
    /// Tile slides without merging.
    Relocate { origin: usize, value: Tile },
    /// `origin` slides onto a tile that never moved; `value` is the merged value.
    SingleMerge { origin: usize, value: Tile },
    /// Two tiles slide together into one; `value` is the merged value.
    DoubleMerge { first: usize, second: usize, value: Tile },
}

impl ActionToken {
    #[inline]
    pub fn value(self) -> Tile {
        match self {
            ActionToken::Stationary { value, .. }
            | ActionToken::Relocate { value, .. }
            | ActionToken::SingleMerge { value, .. }
            | ActionToken::DoubleMerge { value, .. } => value,
        }
    }

    /// Originating slot (the first one for a double merge).
    #[inline]
    pub fn origin(self) -> usize {
        match self {
            ActionToken::Stationary { origin, .. }
            | ActionToken::Relocate { origin, .. }
            | ActionToken::SingleMerge { origin, .. } => origin,
            ActionToken::DoubleMerge { first, .. } => first,
        }
    }

    #[inline]
    fn is_merged(self) -> bool {
        matches!(self, ActionToken::SingleMerge { .. } | ActionToken::DoubleMerge { .. })
    }
}

/// One atomic line mutation emitted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrder {
    /// Move `source` to `destination`, leaving `value` there. When `merged`
    /// is set the destination already held a tile and the score grows by `value`.
    Relocate { source: usize, destination: usize, value: Tile, merged: bool },
    /// Merge two sliding tiles into `destination`; the score grows by `value`.
    DoubleRelocate { first: usize, second: usize, destination: usize, value: Tile },
}

impl MoveOrder {
    #[inline]
    pub fn destination(self) -> usize {
        match self {
            MoveOrder::Relocate { destination, .. } | MoveOrder::DoubleRelocate { destination, .. } => destination,
        }
    }

    /// Score contribution of this order, if it is a merge.
    #[inline]
    pub fn merged_value(self) -> Option<Tile> {
        match self {
            MoveOrder::Relocate { value, merged: true, .. } | MoveOrder::DoubleRelocate { value, .. } => Some(value),
            MoveOrder::Relocate { merged: false, .. } => None,
        }
    }
}

/// Run the whole pipeline over one line.
///
/// ```
/// use number_tiles::engine::{merge, Cell, MoveOrder};
/// let line = [Cell::Tile(2), Cell::Empty, Cell::Empty, Cell::Tile(2)];
/// assert_eq!(
///     merge(&line),
///     vec![MoveOrder::Relocate { source: 3, destination: 0, value: 4, merged: true }]
/// );
/// ```
pub fn merge(line: &[Cell]) -> Vec<MoveOrder> {
    convert(&collapse(&condense(line)))
}

/// Drop empty cells, tagging each tile as stationary (no gap before it) or
/// relocating.
pub fn condense(line: &[Cell]) -> Vec<ActionToken> {
    let mut tokens: Vec<ActionToken> = Vec::with_capacity(line.len());
    for (origin, cell) in line.iter().enumerate() {
        if let Cell::Tile(value) = *cell {
            if tokens.len() == origin {
                tokens.push(ActionToken::Stationary { origin, value });
            } else {
                tokens.push(ActionToken::Relocate { origin, value });
            }
        }
    }
    tokens
}

/// Merge adjacent equal tokens in a single left-to-right pass.
///
/// A token consumed as the right half of a merge is never looked at again,
/// so `[2, 2, 2]` merges only the first pair. A stationary token stays
/// "untouched" only while its origin, its input position and the output
/// length all agree; once an earlier merge shortens the output it has to
/// slide and is reissued as a relocation.
///
/// # Panics
/// If the input already contains merge tokens.
pub fn collapse(tokens: &[ActionToken]) -> Vec<ActionToken> {
    assert!(
        tokens.iter().all(|t| !t.is_merged()),
        "collapse expects condensed tokens, got merge tokens in {tokens:?}"
    );

    let mut out: Vec<ActionToken> = Vec::with_capacity(tokens.len());
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx];
        let next = tokens.get(idx + 1).copied().filter(|n| n.value() == token.value());
        let untouched = matches!(token, ActionToken::Stationary { origin, .. } if origin == idx && idx == out.len());

        match (token, next) {
            (ActionToken::Stationary { value, .. }, Some(next)) if untouched => {
                out.push(ActionToken::SingleMerge { origin: next.origin(), value: value + next.value() });
                idx += 2;
            }
            (token, Some(next)) => {
                out.push(ActionToken::DoubleMerge {
                    first: token.origin(),
                    second: next.origin(),
                    value: token.value() + next.value(),
                });
                idx += 2;
            }
            (ActionToken::Stationary { origin, value }, None) if !untouched => {
                out.push(ActionToken::Relocate { origin, value });
                idx += 1;
            }
            (token, None) => {
                out.push(token);
                idx += 1;
            }
        }
    }
    out
}

/// Turn collapsed tokens into orders; a token's output position is its
/// destination slot. Stationary tokens produce nothing.
pub fn convert(tokens: &[ActionToken]) -> Vec<MoveOrder> {
    tokens
        .iter()
        .enumerate()
        .filter_map(|(destination, token)| match *token {
            ActionToken::Stationary { .. } => None,
            ActionToken::Relocate { origin, value } => {
                Some(MoveOrder::Relocate { source: origin, destination, value, merged: false })
            }
            ActionToken::SingleMerge { origin, value } => {
                Some(MoveOrder::Relocate { source: origin, destination, value, merged: true })
            }
            ActionToken::DoubleMerge { first, second, value } => {
                Some(MoveOrder::DoubleRelocate { first, second, destination, value })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionToken::*;

    fn line(values: &[Tile]) -> Vec<Cell> { values.iter().map(|&v| Cell::from(v)).collect() }

    fn apply(values: &[Tile]) -> (Vec<Tile>, u64) {
        let mut cells = line(values);
        let mut score = 0u64;
        for order in merge(&cells) {
            match order {
                MoveOrder::Relocate { source, destination, value, merged } => {
                    cells[source] = Cell::Empty;
                    cells[destination] = Cell::Tile(value);
                    if merged { score += value; }
                }
                MoveOrder::DoubleRelocate { first, second, destination, value } => {
                    cells[first] = Cell::Empty;
                    cells[second] = Cell::Empty;
                    cells[destination] = Cell::Tile(value);
                    score += value;
                }
            }
        }
        (cells.iter().map(|c| c.value().unwrap_or(0)).collect(), score)
    }

    #[test]
    fn condense_tags_stationary_and_relocating() {
        assert!(condense(&line(&[0, 0, 0, 0])).is_empty());
        assert_eq!(
            condense(&line(&[2, 4, 0, 8])),
            vec![
                Stationary { origin: 0, value: 2 },
                Stationary { origin: 1, value: 4 },
                Relocate { origin: 3, value: 8 },
            ]
        );
        assert_eq!(
            condense(&line(&[0, 2, 0, 2])),
            vec![Relocate { origin: 1, value: 2 }, Relocate { origin: 3, value: 2 }]
        );
    }

    #[test]
    fn collapse_four_equal_merges_pairwise() {
        let tokens = condense(&line(&[2, 2, 2, 2]));
        assert_eq!(
            collapse(&tokens),
            vec![SingleMerge { origin: 1, value: 4 }, DoubleMerge { first: 2, second: 3, value: 4 }]
        );
        assert_eq!(apply(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
    }

    #[test]
    fn three_in_a_row_merges_first_pair_only() {
        assert_eq!(
            collapse(&condense(&line(&[2, 2, 2, 0]))),
            vec![SingleMerge { origin: 1, value: 4 }, Relocate { origin: 2, value: 2 }]
        );
        assert_eq!(apply(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
        assert_eq!(apply(&[0, 4, 4, 4]), (vec![8, 4, 0, 0], 8));
    }

    #[test]
    fn gapped_pair_both_sliding_is_a_double_merge() {
        assert_eq!(
            merge(&line(&[0, 2, 0, 2])),
            vec![MoveOrder::DoubleRelocate { first: 1, second: 3, destination: 0, value: 4 }]
        );
        assert_eq!(apply(&[0, 2, 0, 2]), (vec![4, 0, 0, 0], 4));
    }

    #[test]
    fn unmoved_receiver_is_a_single_merge() {
        assert_eq!(
            merge(&line(&[2, 0, 0, 2])),
            vec![MoveOrder::Relocate { source: 3, destination: 0, value: 4, merged: true }]
        );
        assert_eq!(
            merge(&line(&[4, 8, 0, 8])),
            vec![MoveOrder::Relocate { source: 3, destination: 1, value: 16, merged: true }]
        );
    }

    #[test]
    fn stationary_after_merge_turns_into_relocation() {
        assert_eq!(
            merge(&line(&[4, 4, 8, 2])),
            vec![
                MoveOrder::Relocate { source: 1, destination: 0, value: 8, merged: true },
                MoveOrder::Relocate { source: 2, destination: 1, value: 8, merged: false },
                MoveOrder::Relocate { source: 3, destination: 2, value: 2, merged: false },
            ]
        );
        assert_eq!(apply(&[4, 4, 8, 8]), (vec![8, 16, 0, 0], 24));
    }

    #[test]
    fn packed_line_without_pairs_emits_nothing() {
        assert!(merge(&line(&[2, 4, 2, 4])).is_empty());
        assert!(merge(&line(&[8, 0, 0, 0])).is_empty());
        assert!(merge(&line(&[16, 32, 0, 0])).is_empty());
        assert!(merge(&line(&[0, 0, 0, 0])).is_empty());
    }

    #[test]
    fn lone_tile_slides_to_leading_edge() {
        assert_eq!(
            merge(&line(&[0, 0, 0, 2])),
            vec![MoveOrder::Relocate { source: 3, destination: 0, value: 2, merged: false }]
        );
    }

    #[test]
    fn works_on_wider_lines() {
        assert_eq!(apply(&[2, 0, 2, 4, 0, 4, 8]), (vec![4, 8, 8, 0, 0, 0, 0], 12));
        assert_eq!(apply(&[2, 2]), (vec![4, 0], 4));
    }

    #[test]
    fn largest_tiles_merge_without_overflow() {
        use crate::engine::board::MAX_TILE;
        assert_eq!(apply(&[MAX_TILE, 0, MAX_TILE]), (vec![2 * MAX_TILE, 0, 0], 2 * MAX_TILE));
        let big = 2 * MAX_TILE;
        assert_eq!(apply(&[big, big]), (vec![2 * big, 0], 2 * big));
    }

    #[test]
    fn order_helpers() {
        let single = MoveOrder::Relocate { source: 3, destination: 1, value: 8, merged: true };
        let plain = MoveOrder::Relocate { source: 3, destination: 1, value: 8, merged: false };
        let double = MoveOrder::DoubleRelocate { first: 1, second: 2, destination: 0, value: 4 };
        assert_eq!(single.merged_value(), Some(8));
        assert_eq!(plain.merged_value(), None);
        assert_eq!(double.merged_value(), Some(4));
        assert_eq!(double.destination(), 0);
    }

    #[test]
    #[should_panic(expected = "merge tokens")]
    fn collapse_rejects_merged_input() {
        let _ = collapse(&[SingleMerge { origin: 1, value: 4 }]);
    }
}
