use std::time::Duration;

use tracing::{debug, trace};

use super::board::{Board, Cell, Coord, Tile, MAX_TILE};
use super::line::{line_coordinates, Direction};
use super::merge::{merge, MoveOrder};
use super::status;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::queue::{ManualScheduler, MoveCommand, MoveQueue, Scheduler};

pub type Score = u64;

/// Receives one notification per board mutation, in the order applied.
///
/// Every method defaults to a no-op so observers implement only what they
/// render or record.
pub trait GameObserver {
    fn score_changed(&mut self, _score: Score) {}
    fn tile_relocated(&mut self, _from: Coord, _to: Coord, _value: Tile) {}
    fn tiles_merged(&mut self, _from: (Coord, Coord), _to: Coord, _value: Tile) {}
    fn tile_inserted(&mut self, _at: Coord, _value: Tile) {}
}

impl GameObserver for () {}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn score_changed(&mut self, score: Score) { (**self).score_changed(score) }
    fn tile_relocated(&mut self, from: Coord, to: Coord, value: Tile) { (**self).tile_relocated(from, to, value) }
    fn tiles_merged(&mut self, from: (Coord, Coord), to: Coord, value: Tile) {
        (**self).tiles_merged(from, to, value)
    }
    fn tile_inserted(&mut self, at: Coord, value: Tile) { (**self).tile_inserted(at, value) }
}

/// A game session: board, score, pending moves and the observer that is
/// told about every change.
///
/// The engine has no randomness; spawning is the caller's job (see
/// [`crate::spawn`]).
///
/// ```
/// use number_tiles::config::GameConfig;
/// use number_tiles::engine::{Direction, Game};
///
/// let mut game = Game::new(&GameConfig::default()).unwrap();
/// game.insert_tile((0, 3), 2);
/// game.insert_tile((0, 1), 2);
/// assert!(game.apply_move(Direction::Left));
/// assert_eq!(game.score(), 4);
/// assert!(!game.apply_move(Direction::Left));
/// ```
pub struct Game<O = (), S = ManualScheduler> {
    board: Board,
    threshold: Tile,
    score: Score,
    queue: MoveQueue,
    settle_delay: Duration,
    scheduler: S,
    observer: O,
}

impl Game {
    /// A session without observer, driven by a [`ManualScheduler`].
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Game::with_parts(config, (), ManualScheduler::new())
    }
}

impl<O: GameObserver> Game<O> {
    pub fn with_observer(config: &GameConfig, observer: O) -> Result<Self, ConfigError> {
        Game::with_parts(config, observer, ManualScheduler::new())
    }
}

impl<O: GameObserver, S: Scheduler> Game<O, S> {
    pub fn with_parts(config: &GameConfig, observer: O, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Game {
            board: Board::new(config.dimension),
            threshold: config.threshold,
            score: 0,
            queue: MoveQueue::with_capacity(config.max_commands),
            settle_delay: config.settle_delay(),
            scheduler,
            observer,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board { &self.board }

    #[inline]
    pub fn dimension(&self) -> usize { self.board.dimension() }

    #[inline]
    pub fn score(&self) -> Score { self.score }

    #[inline]
    pub fn threshold(&self) -> Tile { self.threshold }

    #[inline]
    pub fn observer(&self) -> &O { &self.observer }

    #[inline]
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    pub fn into_observer(self) -> O { self.observer }

    #[inline]
    pub fn scheduler(&self) -> &S { &self.scheduler }

    /// Number of queued moves not yet applied.
    #[inline]
    pub fn pending_moves(&self) -> usize { self.queue.len() }

    /// Zero the score, clear the board, drop queued moves and any pending
    /// resumption.
    pub fn reset(&mut self) {
        self.set_score(0);
        self.board.fill_all(Cell::Empty);
        self.queue.clear();
        self.scheduler.cancel();
        debug!(dimension = self.board.dimension(), "game reset");
    }

    /// Place a tile on an empty cell. Occupied targets are left alone and
    /// nothing is reported; the return value says whether the tile landed.
    ///
    /// # Panics
    /// If `value` is 0 or above [`MAX_TILE`].
    pub fn insert_tile(&mut self, at: Coord, value: Tile) -> bool {
        assert!((1..=MAX_TILE).contains(&value), "tile value {value} outside 1..={MAX_TILE}");
        let (row, col) = at;
        if !self.board.get(row, col).is_empty() {
            return false;
        }
        self.board.set(row, col, Cell::Tile(value));
        self.observer.tile_inserted(at, value);
        true
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ { self.board.empty_cells() }

    /// First tile (row-major) with a value of at least `threshold`.
    pub fn check_win(&self, threshold: Tile) -> Option<Coord> { status::find_winning_tile(&self.board, threshold) }

    /// [`check_win`](Self::check_win) against the configured threshold.
    pub fn has_won(&self) -> Option<Coord> { self.check_win(self.threshold) }

    /// True once the board is full and no adjacent pair can merge.
    pub fn check_game_over(&self) -> bool { status::is_stuck(&self.board) }

    /// Slide and merge every line toward `direction`.
    ///
    /// Returns true if any line produced at least one order. Runs to
    /// completion synchronously; observers hear about each order as it is
    /// applied.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let dimension = self.board.dimension();
        let mut changed = false;
        for line_index in 0..dimension {
            let coords = line_coordinates(direction, line_index, dimension);
            let cells: Vec<Cell> = coords.iter().map(|&(r, c)| self.board.get(r, c)).collect();
            let orders = merge(&cells);
            changed |= !orders.is_empty();
            for order in orders {
                self.apply_order(&coords, order);
            }
        }
        debug!(%direction, changed, score = self.score, "applied move");
        changed
    }

    /// Queue a move. If no resumption is pending the queue drains right
    /// away. Returns false when the queue is full and the move was dropped.
    pub fn queue_move(&mut self, direction: Direction, completion: impl FnOnce(bool) + 'static) -> bool {
        self.submit(MoveCommand::new(direction, completion))
    }

    pub fn submit(&mut self, command: MoveCommand) -> bool {
        if !self.queue.push(command) {
            return false;
        }
        if !self.scheduler.is_pending() {
            self.drain();
        }
        true
    }

    /// Entry point for the scheduled resumption: clears the pending marker
    /// and drains again. Returns whether a queued move changed the board.
    pub fn resume(&mut self) -> bool {
        self.scheduler.cancel();
        self.drain()
    }

    fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Some(command) = self.queue.pop() {
            changed = self.apply_move(command.direction);
            command.complete(changed);
            if changed {
                break;
            }
        }
        if changed {
            debug!(remaining = self.queue.len(), delay = ?self.settle_delay, "drain paused");
            self.scheduler.schedule(self.settle_delay);
        }
        changed
    }

    fn apply_order(&mut self, coords: &[Coord], order: MoveOrder) {
        trace!(?order, "applying order");
        match order {
            MoveOrder::Relocate { source, destination, value, merged } => {
                let (from, to) = (coords[source], coords[destination]);
                if merged {
                    self.set_score(self.score.saturating_add(value));
                }
                self.board.set(from.0, from.1, Cell::Empty);
                self.board.set(to.0, to.1, Cell::Tile(value));
                self.observer.tile_relocated(from, to, value);
            }
            MoveOrder::DoubleRelocate { first, second, destination, value } => {
                let (a, b, to) = (coords[first], coords[second], coords[destination]);
                self.set_score(self.score.saturating_add(value));
                self.board.set(a.0, a.1, Cell::Empty);
                self.board.set(b.0, b.1, Cell::Empty);
                self.board.set(to.0, to.1, Cell::Tile(value));
                self.observer.tiles_merged((a, b), to, value);
            }
        }
    }

    fn set_score(&mut self, score: Score) {
        self.score = score;
        self.observer.score_changed(score);
    }
}
