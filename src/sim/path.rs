//! Head path history
//!
//! Bounded log of the cells the head has visited, newest first. Attaching food
//! rides along it back toward the tail.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use crate::consts::PATH_HISTORY_CAPACITY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathHistory {
    cells: VecDeque<Cell>,
    capacity: usize,
}

impl Default for PathHistory {
    fn default() -> Self {
        Self::with_capacity(PATH_HISTORY_CAPACITY)
    }
}

impl PathHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cells: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record the current head (call once per movement tick)
    pub fn record(&mut self, head: Cell) {
        self.cells.push_front(head);
        if self.cells.len() > self.capacity {
            self.cells.pop_back();
        }
    }

    /// Cell at `index` ticks ago (0 = most recent)
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Oldest retained cell
    pub fn oldest(&self) -> Option<Cell> {
        self.cells.back().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the recorded cell closest to `target`; ties go to the most recent
    pub fn nearest_index(&self, target: Cell) -> Option<usize> {
        self.cells
            .iter()
            .enumerate()
            .min_by_key(|(i, c)| (c.distance_sq(target), *i))
            .map(|(i, _)| i)
    }
}
