//! Random tile spawning, kept outside the deterministic engine.
//!
//! Pass a seeded RNG for reproducible games:
//! ```
//! use number_tiles::config::GameConfig;
//! use number_tiles::engine::{Direction, Game};
//! use number_tiles::spawn;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(&GameConfig::default()).unwrap();
//! spawn::start_new_game(&mut game, &mut rng);
//! assert_eq!(game.board().count_empty(), 14);
//! let _ = spawn::make_move(&mut game, Direction::Left, &mut rng);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::{Coord, Direction, Game, GameObserver, Tile};
use crate::queue::Scheduler;

/// 2 with probability 0.9, otherwise 4.
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

/// Drop a random tile on a uniformly chosen empty cell. `None` when the
/// board is full.
pub fn insert_random_tile<O, S, R>(game: &mut Game<O, S>, rng: &mut R) -> Option<(Coord, Tile)>
where
    O: GameObserver,
    S: Scheduler,
    R: Rng + ?Sized,
{
    let empties: Vec<Coord> = game.empty_cells().collect();
    let &at = empties.choose(rng)?;
    let value = random_tile_value(rng);
    game.insert_tile(at, value);
    Some((at, value))
}

/// Reset the game and place the two opening tiles.
pub fn start_new_game<O, S, R>(game: &mut Game<O, S>, rng: &mut R)
where
    O: GameObserver,
    S: Scheduler,
    R: Rng + ?Sized,
{
    game.reset();
    insert_random_tile(game, rng);
    insert_random_tile(game, rng);
}

/// Apply `direction` and, if the board changed, spawn one random tile.
pub fn make_move<O, S, R>(game: &mut Game<O, S>, direction: Direction, rng: &mut R) -> bool
where
    O: GameObserver,
    S: Scheduler,
    R: Rng + ?Sized,
{
    let changed = game.apply_move(direction);
    if changed {
        insert_random_tile(game, rng);
    }
    changed
}
