//! Snake body
//!
//! An ordered chain of cells, head first. Movement is a rigid translation:
//! push a new head, then either pop the tail (slide) or keep it (grow).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::{Cell, Grid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Snake {
    segments: VecDeque<Cell>,
}

impl TryFrom<Vec<Cell>> for Snake {
    type Error = &'static str;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Snake::from_cells(cells).ok_or("snake needs at least one segment")
    }
}

impl From<Snake> for Vec<Cell> {
    fn from(snake: Snake) -> Self {
        snake.segments.into()
    }
}

impl Snake {
    /// Straight snake of `length` cells with the head at `head` facing `facing`.
    ///
    /// The body trails behind the head. A length of zero is treated as one.
    pub fn new(head: Cell, facing: Direction, length: usize) -> Self {
        let behind = facing.opposite();
        let mut segments = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        segments.push_back(cell);
        for _ in 1..length {
            cell = cell.step(behind);
            segments.push_back(cell);
        }
        Self { segments }
    }

    /// Build from explicit cells, head first. `None` for an empty list.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let segments: VecDeque<Cell> = cells.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a snake has at least one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.segments.get(index).copied()
    }

    /// All segments, head first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    /// Segments excluding the head
    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().skip(1).copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.segments.push_front(cell);
    }

    /// Drop the tail segment. The last remaining segment is never removed.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.segments.len() <= 1 {
            return None;
        }
        self.segments.pop_back()
    }

    /// Every consecutive pair is one step apart (edge wrap counts as a step)
    pub fn is_contiguous(&self, grid: &Grid) -> bool {
        self.segments
            .iter()
            .zip(self.segments.iter().skip(1))
            .all(|(a, b)| grid.are_adjacent(*a, *b))
    }

    /// Way the head points, judged from the segment behind it
    pub fn facing(&self, grid: &Grid) -> Option<Direction> {
        let neck = self.get(1)?;
        let head = self.head();
        Direction::ALL
            .into_iter()
            .find(|d| grid.wrap(neck.step(*d)) == head)
    }

    /// Direction from the tail toward the segment in front of it
    pub fn tail_direction(&self, grid: &Grid) -> Option<Direction> {
        let len = self.segments.len();
        if len < 2 {
            return None;
        }
        let tail = self.segments[len - 1];
        let prev = self.segments[len - 2];
        Direction::ALL
            .into_iter()
            .find(|d| grid.wrap(tail.step(*d)) == prev)
    }
}
