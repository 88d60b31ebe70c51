//! Pending move queue and the deferred-resumption seam.
//!
//! Moves are queued FIFO and drained by [`Game`](crate::engine::Game) one at a
//! time. A drain stops at the first move that changes the board and asks its
//! [`Scheduler`] to resume after the settle delay; whoever owns the game calls
//! [`Game::resume`](crate::engine::Game::resume) when that delay has passed.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::engine::Direction;

/// A requested move plus the callback told whether it changed the board.
pub struct MoveCommand {
    pub direction: Direction,
    completion: Box<dyn FnOnce(bool)>,
}

impl MoveCommand {
    pub fn new(direction: Direction, completion: impl FnOnce(bool) + 'static) -> Self {
        MoveCommand { direction, completion: Box::new(completion) }
    }

    /// A command whose outcome nobody listens for.
    pub fn detached(direction: Direction) -> Self { MoveCommand::new(direction, |_| {}) }

    pub(crate) fn complete(self, changed: bool) { (self.completion)(changed) }
}

impl fmt::Debug for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveCommand").field("direction", &self.direction).finish_non_exhaustive()
    }
}

/// Bounded FIFO of pending moves. When full, new commands are dropped.
#[derive(Debug)]
pub struct MoveQueue {
    pending: VecDeque<MoveCommand>,
    capacity: usize,
}

impl MoveQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 1, "move queue capacity must be at least 1");
        MoveQueue { pending: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append `command`; returns false (and drops it) when the queue is full.
    pub fn push(&mut self, command: MoveCommand) -> bool {
        if self.pending.len() >= self.capacity {
            debug!(direction = %command.direction, capacity = self.capacity, "move queue full, dropping command");
            return false;
        }
        self.pending.push_back(command);
        true
    }

    #[inline]
    pub fn pop(&mut self) -> Option<MoveCommand> { self.pending.pop_front() }

    #[inline]
    pub fn len(&self) -> usize { self.pending.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    #[inline]
    pub fn capacity(&self) -> usize { self.capacity }

    /// Discard every pending command without running its completion.
    pub fn clear(&mut self) { self.pending.clear() }
}

/// Deferred resumption of queue draining.
pub trait Scheduler {
    /// Arrange for the queue to be drained again after `delay`.
    fn schedule(&mut self, delay: Duration);
    /// Forget any pending resumption.
    fn cancel(&mut self);
    /// True while a resumption is outstanding.
    fn is_pending(&self) -> bool;
}

/// Scheduler that only records the request; the caller decides when the
/// delay has elapsed (a UI tick, `thread::sleep`, a test).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualScheduler {
    pending: Option<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self { Self::default() }

    /// Delay of the outstanding resumption, if any.
    #[inline]
    pub fn pending_delay(&self) -> Option<Duration> { self.pending }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) { self.pending = Some(delay); }

    fn cancel(&mut self) { self.pending = None; }

    fn is_pending(&self) -> bool { self.pending.is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fifo_order() {
        let mut q = MoveQueue::with_capacity(4);
        assert!(q.push(MoveCommand::detached(Direction::Up)));
        assert!(q.push(MoveCommand::detached(Direction::Left)));
        assert_eq!(q.pop().map(|c| c.direction), Some(Direction::Up));
        assert_eq!(q.pop().map(|c| c.direction), Some(Direction::Left));
        assert!(q.pop().is_none());
    }

    #[test]
    fn drops_newest_when_full() {
        let mut q = MoveQueue::with_capacity(2);
        assert!(q.push(MoveCommand::detached(Direction::Up)));
        assert!(q.push(MoveCommand::detached(Direction::Down)));
        assert!(!q.push(MoveCommand::detached(Direction::Right)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop().map(|c| c.direction), Some(Direction::Up));
        assert_eq!(q.pop().map(|c| c.direction), Some(Direction::Down));
    }

    #[test]
    fn completion_receives_outcome() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let cmd = MoveCommand::new(Direction::Right, move |changed| sink.borrow_mut().push(changed));
        cmd.complete(true);
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn clear_skips_completions() {
        let called = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&called);
        let mut q = MoveQueue::with_capacity(1);
        q.push(MoveCommand::new(Direction::Up, move |_| *flag.borrow_mut() = true));
        q.clear();
        assert!(q.is_empty());
        assert!(!*called.borrow());
    }

    #[test]
    fn manual_scheduler_tracks_pending() {
        let mut s = ManualScheduler::new();
        assert!(!s.is_pending());
        s.schedule(Duration::from_millis(300));
        assert_eq!(s.pending_delay(), Some(Duration::from_millis(300)));
        s.cancel();
        assert!(!s.is_pending());
    }
}
