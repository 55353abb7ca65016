//! Direction input buffering
//!
//! Key presses arrive every frame but the snake only moves every few frames.
//! Requests are queued here and applied one per movement tick, so a burst like
//! Up+Left while moving Right can never collapse into a same-tick reversal.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the delta (dcol, drow) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Sprite rotation in degrees for a segment facing this way
    pub fn angle_degrees(&self) -> u16 {
        match self {
            Direction::Up => 0,
            Direction::Right => 270,
            Direction::Down => 180,
            Direction::Left => 90,
        }
    }
}

/// Buffers requested turns until the next movement tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionManager {
    current: Option<Direction>,
    queue: VecDeque<Direction>,
}

impl DirectionManager {
    pub fn new(initial: Option<Direction>) -> Self {
        Self {
            current: initial,
            queue: VecDeque::new(),
        }
    }

    /// Direction applied by the most recent `dequeue`
    pub fn current(&self) -> Option<Direction> {
        self.current
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Queue a turn unless it reverses the previous one.
    ///
    /// Returns whether the request was kept. Dropped requests are normal
    /// key-mashing noise, not errors.
    pub fn enqueue(&mut self, requested: Direction) -> bool {
        let check_against = self
            .queue
            .back()
            .copied()
            .or(self.current)
            .unwrap_or(requested);

        if check_against.is_opposite(requested) {
            log::debug!("Dropped reversing turn {:?} after {:?}", requested, check_against);
            return false;
        }
        self.queue.push_back(requested);
        true
    }

    /// Apply the next queued turn, if any, and return the live direction.
    ///
    /// Call exactly once per movement tick.
    pub fn dequeue(&mut self) -> Option<Direction> {
        if let Some(next) = self.queue.pop_front() {
            self.current = Some(next);
        }
        self.current
    }

    /// Clear pending turns and set the live direction
    pub fn reset(&mut self, initial: Option<Direction>) {
        self.queue.clear();
        self.current = initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_first_request_before_start_is_always_legal() {
        let mut dm = DirectionManager::new(None);
        assert!(dm.enqueue(Direction::Left));
        assert_eq!(dm.dequeue(), Some(Direction::Left));
    }

    #[test]
    fn test_reversal_against_current_dropped() {
        let mut dm = DirectionManager::new(Some(Direction::Right));
        assert!(!dm.enqueue(Direction::Left));
        assert_eq!(dm.pending_len(), 0);
        assert_eq!(dm.dequeue(), Some(Direction::Right));
    }

    #[test]
    fn test_reversal_checked_against_last_queued() {
        // Moving right, player taps Up then Left quickly: both are legal in order
        let mut dm = DirectionManager::new(Some(Direction::Right));
        assert!(dm.enqueue(Direction::Up));
        assert!(dm.enqueue(Direction::Left));
        // Checked against the last queued Left, not the earlier Up
        assert!(dm.enqueue(Direction::Down));
        // Up now reverses the queued Down
        assert!(!dm.enqueue(Direction::Up));

        assert_eq!(dm.dequeue(), Some(Direction::Up));
        assert_eq!(dm.dequeue(), Some(Direction::Left));
        assert_eq!(dm.dequeue(), Some(Direction::Down));
        assert_eq!(dm.dequeue(), Some(Direction::Down));
    }

    #[test]
    fn test_dequeue_without_input_keeps_direction() {
        let mut dm = DirectionManager::new(Some(Direction::Up));
        for _ in 0..5 {
            assert_eq!(dm.dequeue(), Some(Direction::Up));
        }
        let mut idle = DirectionManager::new(None);
        assert_eq!(idle.dequeue(), None);
    }

    #[test]
    fn test_reset_clears_queue() {
        let mut dm = DirectionManager::new(Some(Direction::Up));
        dm.enqueue(Direction::Left);
        dm.reset(None);
        assert_eq!(dm.pending_len(), 0);
        assert_eq!(dm.current(), None);
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_realized_directions_never_reverse(
            start in proptest::option::of(any_direction()),
            bursts in proptest::collection::vec(
                proptest::collection::vec(any_direction(), 0..5),
                1..40,
            ),
        ) {
            let mut dm = DirectionManager::new(start);
            let mut previous = start;
            for burst in bursts {
                for d in burst {
                    dm.enqueue(d);
                }
                let applied = dm.dequeue();
                if let (Some(prev), Some(now)) = (previous, applied) {
                    prop_assert!(!prev.is_opposite(now), "{:?} -> {:?}", prev, now);
                }
                if applied.is_some() {
                    previous = applied;
                }
            }
        }

        #[test]
        fn prop_queue_is_pairwise_legal(
            start in any_direction(),
            requests in proptest::collection::vec(any_direction(), 0..30),
        ) {
            let mut dm = DirectionManager::new(Some(start));
            for d in requests {
                dm.enqueue(d);
            }
            let mut prev = start;
            for _ in 0..dm.pending_len() {
                let d = dm.dequeue().unwrap();
                prop_assert!(!prev.is_opposite(d));
                prev = d;
            }
        }
    }
}
