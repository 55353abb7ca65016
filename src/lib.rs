//! Grid Serpent - A grid-based snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, input queue, collisions, food lifecycle)
//! - `level`: Difficulty presets and level file loading
//! - `error`: Configuration errors
//!
//! Rendering, audio and window plumbing live outside this crate. A shell feeds
//! raw key events into [`sim::tick`] once per frame and draws the returned views.

pub mod error;
pub mod level;
pub mod sim;

pub use error::ConfigError;
pub use level::{Difficulty, LevelConfig};

/// Game configuration constants
pub mod consts {
    /// Board width in pixels
    pub const WIDTH: i32 = 800;
    /// Board height in pixels
    pub const HEIGHT: i32 = 600;
    /// Side length of one grid cell in pixels
    pub const SIDE: i32 = 30;

    /// Render/poll frames per second
    pub const FPS: u32 = 60;
    /// Default snake moves per second
    pub const SNAKE_SPEED: u32 = 8;
    /// Speed multiplier while the punch key is held
    pub const PUNCH_MULTIPLIER: f32 = 2.0;

    /// Head positions retained for attaching food
    pub const PATH_HISTORY_CAPACITY: usize = 1000;
    /// Score awarded per consumed food item
    pub const FOOD_VALUE: u64 = 1;
}

/// Frames between movement ticks for a given speed.
///
/// Never less than one frame, so a very fast snake moves at most once per frame.
#[inline]
pub fn move_delay(fps: u32, moves_per_second: u32, speed_multiplier: f32) -> u32 {
    let rate = moves_per_second as f32 * speed_multiplier.max(f32::EPSILON);
    if rate <= 0.0 {
        return u32::MAX;
    }
    ((fps as f32 / rate).floor() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_delay_default_speed() {
        // 60 fps at 8 moves/s -> 7 frames, same as integer division
        assert_eq!(move_delay(consts::FPS, consts::SNAKE_SPEED, 1.0), 7);
    }

    #[test]
    fn test_move_delay_punch() {
        assert_eq!(move_delay(60, 8, consts::PUNCH_MULTIPLIER), 3);
    }

    #[test]
    fn test_move_delay_never_zero() {
        assert_eq!(move_delay(60, 1000, 4.0), 1);
    }

    #[test]
    fn test_move_delay_stopped() {
        assert_eq!(move_delay(60, 0, 1.0), u32::MAX);
    }
}
