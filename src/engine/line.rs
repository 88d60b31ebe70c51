use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::Coord;
use crate::error::ParseDirectionError;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts full names (`up`, `Left`, ...) and the `w/a/s/d` keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Board coordinates of one line, ordered from the leading edge.
///
/// Index 0 of the result is the cell tiles slide toward when moving in
/// `direction`; `line_index` selects the column (Up/Down) or row
/// (Left/Right).
///
/// ```
/// use number_tiles::engine::{line_coordinates, Direction};
/// assert_eq!(line_coordinates(Direction::Right, 1, 3), vec![(1, 2), (1, 1), (1, 0)]);
/// ```
pub fn line_coordinates(direction: Direction, line_index: usize, dimension: usize) -> Vec<Coord> {
    assert!(line_index < dimension, "line {line_index} is outside a {dimension}-wide board");
    (0..dimension)
        .map(|i| match direction {
            Direction::Up => (i, line_index),
            Direction::Down => (dimension - 1 - i, line_index),
            Direction::Left => (line_index, i),
            Direction::Right => (line_index, dimension - 1 - i),
        })
        .collect()
}
