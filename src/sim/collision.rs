//! Collision classification for one movement tick
//!
//! Stateless checks run in a fixed order: border, then self, then food. A
//! lethal result from an earlier check means the later ones are never asked.

use super::direction::Direction;
use super::food::FoodItem;
use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Result of the border check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Inside,
    Lethal,
    /// Off the board with wrapping enabled; the head re-enters here
    WrapTo(Cell),
}

/// Result of the self-collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfHit {
    Safe,
    Lethal,
}

/// Head cell after one step in `direction`
#[inline]
pub fn candidate_head(snake: &Snake, direction: Direction) -> Cell {
    snake.head().step(direction)
}

pub fn classify_border(candidate: Cell, grid: &Grid, border_is_lethal: bool) -> Border {
    if grid.contains(candidate) {
        Border::Inside
    } else if border_is_lethal {
        Border::Lethal
    } else {
        Border::WrapTo(grid.wrap(candidate))
    }
}

/// Check the candidate head against the body (head excluded).
///
/// With the toggle off the snake may cross itself freely.
pub fn classify_self_collision(
    candidate: Cell,
    mut body: impl Iterator<Item = Cell>,
    self_collision_is_lethal: bool,
) -> SelfHit {
    if self_collision_is_lethal && body.any(|c| c == candidate) {
        SelfHit::Lethal
    } else {
        SelfHit::Safe
    }
}

/// Index of the idle food item sitting exactly on `candidate`
pub fn classify_food_hit(candidate: Cell, foods: &[FoodItem]) -> Option<usize> {
    foods
        .iter()
        .position(|f| f.is_idle() && f.position == candidate)
}
