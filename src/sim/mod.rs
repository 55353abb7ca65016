//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Movement only on move-delay boundaries
//! - Seeded RNG only
//! - Stable iteration order (food by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod direction;
pub mod food;
pub mod grid;
pub mod path;
pub mod snake;
pub mod state;
pub mod tick;

pub use collision::{
    Border, SelfHit, candidate_head, classify_border, classify_food_hit, classify_self_collision,
};
pub use direction::{Direction, DirectionManager};
pub use food::{FoodItem, FoodSpawner, FoodState, VisualKind};
pub use grid::{Cell, Grid};
pub use path::PathHistory;
pub use snake::Snake;
pub use state::{FoodView, GameState, LossCause, Outcome, SnakeView, initialize};
pub use tick::{GameEvent, KeyCode, KeyEvent, TickInput, TickResult, step, tick};
