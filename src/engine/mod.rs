//! Board model and move engine.
//!
//! - [`Board`]: square grid of [`Cell`]s with bounds-checked access.
//! - [`line_coordinates`]: a row or column in leading-edge-first order.
//! - [`merge`]: the three-stage line pipeline (`condense`, `collapse`, `convert`).
//! - [`Game`]: applies moves board-wide, keeps score, queues moves and
//!   notifies a [`GameObserver`].
//! - [`find_winning_tile`] / [`is_stuck`]: win and game-over scans.

mod board;
mod game;
mod line;
mod merge;
mod status;

pub use board::{Board, Cell, Coord, Tile, MAX_TILE};
pub use game::{Game, GameObserver, Score};
pub use line::{line_coordinates, Direction};
pub use merge::{collapse, condense, convert, merge, ActionToken, MoveOrder};
pub use status::{find_winning_tile, is_stuck};
