//! Game session state
//!
//! Everything one play-through needs lives here, including the counters and the
//! seeded RNG, so two sessions built from the same seed replay identically.

use std::collections::HashSet;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::{Direction, DirectionManager};
use super::food::{FoodItem, FoodSpawner, FoodState, VisualKind};
use super::grid::{Cell, Grid};
use super::path::PathHistory;
use super::snake::Snake;
use crate::consts::FPS;
use crate::error::ConfigError;
use crate::level::LevelConfig;

/// Session outcome; anything but `Running` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Running,
    Lost,
    Won,
}

/// Why a session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Border,
    SelfCollision,
    /// Player quit mid-game
    Abandoned,
}

/// Render-facing copy of the snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeView {
    /// Top-left pixel of every segment, head first
    pub segments: Vec<IVec2>,
    /// Way the tail points toward the body, if there is a body
    pub tail_direction: Option<Direction>,
    /// Tail sprite rotation in degrees
    pub tail_angle: Option<u16>,
}

/// Render-facing copy of one food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    pub id: u32,
    pub pixel: IVec2,
    pub state: FoodState,
    pub visual_kind: VisualKind,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub level: LevelConfig,
    pub grid: Grid,
    pub snake: Snake,
    /// Active food items (sorted by id)
    pub foods: Vec<FoodItem>,
    pub path: PathHistory,
    pub directions: DirectionManager,
    pub spawner: FoodSpawner,
    pub score: u64,
    /// Food items turned into segments so far
    pub consumed: u64,
    /// Movement ticks performed
    pub time_ticks: u64,
    /// Frames processed since the first direction key
    pub frames: u64,
    /// Frames since the last movement tick
    pub move_counter: u32,
    /// External speed signal ("punch"); 1.0 is normal speed
    pub speed_multiplier: f32,
    /// Snake holds still until the first direction key
    pub started: bool,
    pub outcome: Outcome,
    pub loss_cause: Option<LossCause>,
    rng: Pcg32,
}

/// Build a fresh session: centred snake, food per level, score 0.
pub fn initialize(level: LevelConfig, grid: Grid, seed: u64) -> Result<GameState, ConfigError> {
    level.validate(&grid)?;

    let mut rng = Pcg32::seed_from_u64(seed);
    let snake = Snake::new(grid.center(), Direction::Right, level.initial_length);
    let mut spawner = FoodSpawner::new(grid);
    let forbidden: HashSet<Cell> = snake.cells().collect();
    let foods = spawner.spawn_initial(level.food_count, &forbidden, &mut rng);

    log::info!(
        "Session start: seed={} board={}x{} food={}/{} win={}",
        seed,
        grid.cols(),
        grid.rows(),
        foods.len(),
        level.food_count,
        level.win_score
    );

    let mut state = GameState {
        seed,
        level,
        grid,
        snake: snake.clone(),
        foods,
        path: PathHistory::default(),
        directions: DirectionManager::new(None),
        spawner,
        score: 0,
        consumed: 0,
        time_ticks: 0,
        frames: 0,
        move_counter: 0,
        speed_multiplier: 1.0,
        started: false,
        outcome: Outcome::Running,
        loss_cause: None,
        rng,
    };
    state.place_snake(snake);
    Ok(state)
}

impl GameState {
    /// Session from a named level on the default board
    pub fn from_level_name(name: &str, seed: u64) -> Result<Self, ConfigError> {
        initialize(LevelConfig::named(name)?, Grid::default(), seed)
    }

    pub fn is_running(&self) -> bool {
        self.outcome == Outcome::Running
    }

    /// Replace the snake and rebuild the path so `path[i]` is segment `i`
    pub fn place_snake(&mut self, snake: Snake) {
        self.path = PathHistory::with_capacity(self.path.capacity());
        let cells: Vec<Cell> = snake.cells().collect();
        for cell in cells.into_iter().rev() {
            self.path.record(cell);
        }
        self.snake = snake;
    }

    /// Cells no new food may use: the snake and every active item
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.snake
            .cells()
            .chain(self.foods.iter().map(|f| f.position))
            .collect()
    }

    /// Spawn one replacement item; `None` when the board is full
    pub(crate) fn spawn_replacement(&mut self) -> Option<u32> {
        let forbidden = self.occupied_cells();
        let item = self.spawner.spawn_replacement(&forbidden, &mut self.rng)?;
        let id = item.id;
        self.foods.push(item);
        self.normalize_order();
        Some(id)
    }

    pub(crate) fn lose(&mut self, cause: LossCause) {
        self.outcome = Outcome::Lost;
        self.loss_cause = Some(cause);
        log::info!(
            "Game over ({:?}) score={} length={} ticks={}",
            cause,
            self.score,
            self.snake.len(),
            self.time_ticks
        );
    }

    /// Keep food sorted by id for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.foods.sort_by_key(|f| f.id);
    }

    /// Wall-clock play time derived from frames
    pub fn elapsed_secs(&self) -> f32 {
        self.frames as f32 / FPS as f32
    }

    pub fn snake_view(&self) -> SnakeView {
        let tail_direction = self.snake.tail_direction(&self.grid);
        SnakeView {
            segments: self
                .snake
                .cells()
                .map(|c| self.grid.cell_to_pixel(c))
                .collect(),
            tail_direction,
            tail_angle: tail_direction.map(|d| d.angle_degrees()),
        }
    }

    pub fn food_view(&self) -> Vec<FoodView> {
        self.foods
            .iter()
            .map(|f| FoodView {
                id: f.id,
                pixel: self.grid.cell_to_pixel(f.position),
                state: f.state,
                visual_kind: f.visual_kind,
            })
            .collect()
    }
}
