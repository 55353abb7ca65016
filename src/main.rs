//! Grid Serpent headless driver
//!
//! Runs one autopilot session at the fixed frame rate without a window and
//! prints the final board.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use grid_serpent::LevelConfig;
use grid_serpent::consts::FPS;
use grid_serpent::sim::{
    Cell, FoodState, GameEvent, GameState, Grid, Outcome, TickInput, initialize, tick,
};

/// CLI arguments
#[derive(Parser)]
#[command(name = "grid-serpent")]
#[command(about = "Headless autopilot run of the grid snake simulation")]
struct Args {
    /// Level preset (easy, normal, hard)
    #[arg(long, default_value = "normal")]
    level: String,

    /// Custom level file (JSON); overrides --level
    #[arg(long)]
    level_file: Option<PathBuf>,

    /// RNG seed for food placement
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Stop after this many frames if the game is still running
    #[arg(long, default_value_t = 60 * 120)]
    max_frames: u64,
}

fn load_session(args: &Args) -> Result<GameState> {
    let Some(path) = &args.level_file else {
        return GameState::from_level_name(&args.level, args.seed)
            .with_context(|| format!("failed to start level '{}'", args.level));
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    let level = LevelConfig::from_json(&json)
        .with_context(|| format!("failed to parse level file {}", path.display()))?;
    initialize(level, Grid::default(), args.seed)
        .with_context(|| format!("invalid level file {}", path.display()))
}

fn render_board(state: &GameState) -> String {
    let grid = &state.grid;
    let mut out = String::new();
    out.push('+');
    out.push_str(&"-".repeat(grid.cols() as usize));
    out.push_str("+\n");
    for row in 0..grid.rows() {
        out.push('|');
        for col in 0..grid.cols() {
            let cell = Cell::new(col, row);
            let glyph = if cell == state.snake.head() {
                '@'
            } else if state.snake.contains(cell) {
                'o'
            } else if let Some(food) = state.foods.iter().find(|f| f.position == cell) {
                match food.state {
                    FoodState::Idle => '*',
                    FoodState::Touched { .. } => '+',
                    FoodState::Attaching { .. } | FoodState::Consumed => '~',
                }
            } else {
                ' '
            };
            out.push(glyph);
        }
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(grid.cols() as usize));
    out.push('+');
    out
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut state = load_session(&args)?;
    log::info!(
        "Grid Serpent starting: level={} seed={}",
        args.level_file
            .as_ref()
            .map_or(args.level.clone(), |p| p.display().to_string()),
        args.seed
    );

    let input = TickInput {
        events: Vec::new(),
        idle_mode: true,
    };
    for _ in 0..args.max_frames {
        let result = tick(&mut state, &input);
        for event in &result.events {
            match event {
                GameEvent::FoodConsumed { id, at } => {
                    log::info!("Ate food {} at {:?}, score {}", id, at, result.score)
                }
                GameEvent::SpawnSkipped => log::warn!("Board full, no food spawned"),
                _ => log::trace!("{:?}", event),
            }
        }
        if result.outcome != Outcome::Running {
            break;
        }
    }

    println!("{}", render_board(&state));
    let outcome = match state.outcome {
        Outcome::Running => "stopped (frame limit)".to_string(),
        Outcome::Won => "won".to_string(),
        Outcome::Lost => format!("lost ({:?})", state.loss_cause),
    };
    println!(
        "Outcome: {} | score {} | length {} | {:.1}s at {} fps",
        outcome,
        state.score,
        state.snake.len(),
        state.elapsed_secs(),
        FPS
    );
    Ok(())
}
