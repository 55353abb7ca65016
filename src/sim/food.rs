//! Food entities and their lifecycle
//!
//! A food item is not eaten on contact. The head touches it, the tail later
//! passes over it, and it then rides the head's recorded path until it lands on
//! the tail, where it becomes a permanent segment:
//!
//! `Idle -> Touched -> Attaching -> Consumed`

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use super::path::PathHistory;
use crate::consts::FOOD_VALUE;

/// Lifecycle state of a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodState {
    /// Freshly spawned, untouched
    Idle,
    /// Head has passed over it; `ready` once the tail has reached its cell too
    Touched { ready: bool },
    /// Following the path history toward the tail
    Attaching { path_index: usize },
    /// Became a snake segment (never stored in the active set)
    Consumed,
}

/// Presentation-only flavour. Scoring and collision never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisualKind {
    #[default]
    Plain,
    Hen,
    Apple,
    Rabbit,
}

impl VisualKind {
    pub const ALL: [VisualKind; 4] = [
        VisualKind::Plain,
        VisualKind::Hen,
        VisualKind::Apple,
        VisualKind::Rabbit,
    ];
}

/// A food entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub position: Cell,
    pub state: FoodState,
    pub visual_kind: VisualKind,
    /// Score awarded when consumed
    pub value: u64,
}

impl FoodItem {
    pub fn new(id: u32, position: Cell) -> Self {
        Self {
            id,
            position,
            state: FoodState::Idle,
            visual_kind: VisualKind::Plain,
            value: FOOD_VALUE,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == FoodState::Idle
    }

    pub fn path_index(&self) -> Option<usize> {
        match self.state {
            FoodState::Attaching { path_index } => Some(path_index),
            _ => None,
        }
    }

    /// Idle -> Touched. Returns false for any other state.
    pub fn touch(&mut self) -> bool {
        if self.state != FoodState::Idle {
            return false;
        }
        self.state = FoodState::Touched { ready: false };
        true
    }

    /// Record that the tail currently sits on this item's cell
    pub fn mark_ready(&mut self) -> bool {
        match self.state {
            FoodState::Touched { ready: false } => {
                self.state = FoodState::Touched { ready: true };
                true
            }
            _ => false,
        }
    }

    /// Touched (ready) -> Attaching
    pub fn begin_attach(&mut self, path_index: usize) -> bool {
        if self.state != (FoodState::Touched { ready: true }) {
            return false;
        }
        self.state = FoodState::Attaching { path_index };
        true
    }

    /// Attaching -> Consumed
    pub fn consume(&mut self) -> bool {
        if !matches!(self.state, FoodState::Attaching { .. }) {
            return false;
        }
        self.state = FoodState::Consumed;
        true
    }
}

/// Places food on free cells and moves attaching food along the path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSpawner {
    grid: Grid,
    next_id: u32,
}

impl FoodSpawner {
    pub fn new(grid: Grid) -> Self {
        Self { grid, next_id: 1 }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_at<R: Rng + ?Sized>(&mut self, position: Cell, rng: &mut R) -> FoodItem {
        let mut item = FoodItem::new(self.allocate_id(), position);
        item.visual_kind = VisualKind::ALL[rng.random_range(0..VisualKind::ALL.len())];
        item
    }

    /// Place up to `count` items on distinct cells outside `forbidden_seed`.
    ///
    /// A crowded board yields fewer items, never an error.
    pub fn spawn_initial<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        forbidden_seed: &HashSet<Cell>,
        rng: &mut R,
    ) -> Vec<FoodItem> {
        let mut forbidden = forbidden_seed.clone();
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(cell) = self.grid.random_free_cell(&forbidden, rng) else {
                log::warn!("Board full: placed {} of {} food items", items.len(), count);
                break;
            };
            forbidden.insert(cell);
            items.push(self.spawn_at(cell, rng));
        }
        items
    }

    /// Single replacement item, or `None` when the board is full
    pub fn spawn_replacement<R: Rng + ?Sized>(
        &mut self,
        forbidden: &HashSet<Cell>,
        rng: &mut R,
    ) -> Option<FoodItem> {
        let cell = self.grid.random_free_cell(forbidden, rng)?;
        Some(self.spawn_at(cell, rng))
    }

    /// Move an attaching item one step along the path.
    ///
    /// Sets the position to `path[path_index]`, then walks the index one step
    /// toward the present, stopping at 0. An index older than the retained
    /// history parks the item on the oldest point.
    pub fn advance(item: &mut FoodItem, path: &PathHistory) {
        let FoodState::Attaching { path_index } = item.state else {
            return;
        };
        if let Some(cell) = path.get(path_index).or_else(|| path.oldest()) {
            item.position = cell;
        }
        item.state = FoodState::Attaching {
            path_index: path_index.saturating_sub(1),
        };
    }

    /// Path index nearest to the item's cell, seeding its ride along the path
    pub fn resolve_attach_start(item: &FoodItem, path: &PathHistory) -> Option<usize> {
        path.nearest_index(item.position)
    }
}
