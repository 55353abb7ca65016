//! Frame and movement ticks
//!
//! [`tick`] runs once per rendered frame: it drains that frame's key events
//! into the direction queue, then runs a movement step if the move delay has
//! elapsed. Input is always fully drained before the step reads the queue.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::{
    Border, SelfHit, candidate_head, classify_border, classify_food_hit, classify_self_collision,
};
use super::direction::Direction;
use super::food::{FoodSpawner, FoodState};
use super::grid::Cell;
use super::state::{FoodView, GameState, LossCause, Outcome, SnakeView};
use crate::consts::{FPS, PUNCH_MULTIPLIER};
use crate::move_delay;

/// Keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    /// Quit the current game
    Escape,
    /// Hold for double speed
    Punch,
    /// Anything else the shell forwards; ignored
    Other(u32),
}

impl KeyCode {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A raw key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(key: KeyCode) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: KeyCode) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Input collected during one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<KeyEvent>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn keys(keys: &[KeyCode]) -> Self {
        Self {
            events: keys.iter().copied().map(KeyEvent::press).collect(),
            idle_mode: false,
        }
    }
}

/// Things that happened during a frame, for sound and animation hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Moved { head: Cell },
    Wrapped { to: Cell },
    FoodTouched { id: u32 },
    FoodAttaching { id: u32 },
    FoodConsumed { id: u32, at: Cell },
    FoodSpawned { id: u32 },
    /// Board full, no replacement this time
    SpawnSkipped,
    Lost(LossCause),
    Won,
}

/// What the shell gets back each frame
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub outcome: Outcome,
    pub score: u64,
    pub snake: SnakeView,
    pub foods: Vec<FoodView>,
    pub events: Vec<GameEvent>,
    /// Fraction of the move delay elapsed, for display interpolation
    pub move_progress: f32,
}

fn current_move_delay(state: &GameState) -> u32 {
    move_delay(FPS, state.level.moves_per_second, state.speed_multiplier)
}

fn tick_result(state: &GameState, events: Vec<GameEvent>) -> TickResult {
    let delay = current_move_delay(state).max(1);
    TickResult {
        outcome: state.outcome,
        score: state.score,
        snake: state.snake_view(),
        foods: state.food_view(),
        events,
        move_progress: (state.move_counter as f32 / delay as f32).min(1.0),
    }
}

fn handle_key(state: &mut GameState, event: KeyEvent, events: &mut Vec<GameEvent>) {
    match (event.key, event.pressed) {
        (KeyCode::Punch, pressed) => {
            state.speed_multiplier = if pressed { PUNCH_MULTIPLIER } else { 1.0 };
        }
        (KeyCode::Escape, true) if state.started => {
            state.lose(LossCause::Abandoned);
            events.push(GameEvent::Lost(LossCause::Abandoned));
        }
        (key, true) => {
            let Some(direction) = key.direction() else {
                return;
            };
            if !state.started {
                state.started = true;
                // A pre-seeded body forbids starting backwards into it
                let facing = state.snake.facing(&state.grid);
                state.directions.reset(facing);
                events.push(GameEvent::Started);
                log::debug!("Started moving {:?}", direction);
            }
            state.directions.enqueue(direction);
        }
        _ => {}
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    let mut events = Vec::new();
    if !state.is_running() {
        return tick_result(state, events);
    }

    for event in &input.events {
        handle_key(state, *event, &mut events);
        if !state.is_running() {
            return tick_result(state, events);
        }
    }

    if input.idle_mode && !state.started {
        state.started = true;
        let facing = state.snake.facing(&state.grid);
        state.directions.reset(facing);
        events.push(GameEvent::Started);
    }
    if !state.started {
        return tick_result(state, events);
    }

    state.frames += 1;
    state.move_counter += 1;
    if state.move_counter >= current_move_delay(state) {
        state.move_counter = 0;
        if input.idle_mode && state.directions.pending_len() == 0 {
            if let Some(direction) = autopilot::choose_direction(state) {
                state.directions.enqueue(direction);
            }
        }
        events.extend(step(state));
    }

    tick_result(state, events)
}

/// One movement step: move the head, resolve collisions, food and scoring.
///
/// Does nothing once the session is over. A lethal move leaves the snake,
/// food and score exactly as they were.
pub fn step(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    let direction = match state.directions.dequeue() {
        Some(direction) => direction,
        None => {
            state.directions.reset(Some(Direction::Right));
            Direction::Right
        }
    };

    // Collisions
    let mut head = candidate_head(&state.snake, direction);
    match classify_border(head, &state.grid, state.level.border_is_lethal) {
        Border::Inside => {}
        Border::Lethal => {
            state.lose(LossCause::Border);
            events.push(GameEvent::Lost(LossCause::Border));
            return events;
        }
        Border::WrapTo(cell) => {
            head = cell;
            events.push(GameEvent::Wrapped { to: cell });
        }
    }
    if classify_self_collision(
        head,
        state.snake.body(),
        state.level.self_collision_is_lethal,
    ) == SelfHit::Lethal
    {
        state.lose(LossCause::SelfCollision);
        events.push(GameEvent::Lost(LossCause::SelfCollision));
        return events;
    }

    // Move
    state.snake.push_head(head);
    state.path.record(head);
    state.time_ticks += 1;
    events.push(GameEvent::Moved { head });

    if let Some(i) = classify_food_hit(head, &state.foods) {
        if state.foods[i].touch() {
            log::debug!("Food {} touched at {:?}", state.foods[i].id, head);
            events.push(GameEvent::FoodTouched {
                id: state.foods[i].id,
            });
        }
    }

    // Attaching food rides the path; the first one to land on the tail is eaten
    let score_before = state.score;
    let tail = state.snake.tail();
    let mut landed = None;
    for (i, item) in state.foods.iter_mut().enumerate() {
        if !matches!(item.state, FoodState::Attaching { .. }) {
            continue;
        }
        FoodSpawner::advance(item, &state.path);
        if landed.is_none() && item.position == tail {
            landed = Some(i);
        }
    }
    if let Some(i) = landed {
        let mut item = state.foods.remove(i);
        item.consume();
        state.score += item.value;
        state.consumed += 1;
        log::debug!("Food {} consumed at {:?}, score {}", item.id, item.position, state.score);
        events.push(GameEvent::FoodConsumed {
            id: item.id,
            at: item.position,
        });
        match state.spawn_replacement() {
            Some(id) => events.push(GameEvent::FoodSpawned { id }),
            None => {
                log::warn!("No free cell for replacement food");
                events.push(GameEvent::SpawnSkipped);
            }
        }
    }

    // Grow (keep the tail) only when something was eaten
    if state.score == score_before {
        state.snake.pop_tail();
    }

    // The tail decides when touched food starts attaching
    let tail = state.snake.tail();
    let tail_index = state.snake.len() - 1;
    for item in state.foods.iter_mut() {
        match item.state {
            FoodState::Touched { ready: false } if item.position == tail => {
                item.mark_ready();
            }
            FoodState::Touched { ready: true } if item.position != tail => {
                // A cell the body still covers would seed inside the body; the
                // item sits just behind the tail
                let start = FoodSpawner::resolve_attach_start(item, &state.path)
                    .unwrap_or(tail_index + 1)
                    .max(tail_index + 1);
                item.begin_attach(start);
                log::debug!("Food {} attaching from path index {}", item.id, start);
                events.push(GameEvent::FoodAttaching { id: item.id });
            }
            _ => {}
        }
    }

    if state.score >= state.level.win_score {
        state.outcome = Outcome::Won;
        log::info!(
            "Won with score {} after {} ticks ({:.1}s)",
            state.score,
            state.time_ticks,
            state.elapsed_secs()
        );
        events.push(GameEvent::Won);
    }

    events
}
