//! number-tiles: a sliding-tile merge puzzle (2048-style) engine
//!
//! This crate provides:
//! - A square `Board` of any dimension ≥ 2 and the three-stage line merge
//!   pipeline (`engine::merge`) that turns a line into elementary orders
//! - A `Game` orchestrator that applies moves board-wide, keeps score, and
//!   reports every mutation to a `GameObserver`
//! - A bounded FIFO move queue with an injectable settle-delay `Scheduler` (`queue`)
//! - JSON configuration (`config`), seeded random spawning (`spawn`), and a
//!   replayable JSON Lines event log (`transcript`)
//!
//! Quick start:
//! ```
//! use number_tiles::config::GameConfig;
//! use number_tiles::engine::{Direction, Game};
//! use number_tiles::spawn;
//! use number_tiles::transcript::Transcript;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::with_observer(&GameConfig::default(), Transcript::new()).unwrap();
//! spawn::start_new_game(&mut game, &mut rng);
//! for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     spawn::make_move(&mut game, dir, &mut rng);
//! }
//!
//! // The recorded events alone rebuild the same position.
//! let (board, score) = game.observer().replay(game.dimension()).unwrap();
//! assert_eq!(&board, game.board());
//! assert_eq!(score, game.score());
//! ```
//!
//! The engine itself is deterministic: tiles only appear through
//! `Game::insert_tile`, so callers choose where and what to spawn.
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod queue;
pub mod spawn;
pub mod transcript;
