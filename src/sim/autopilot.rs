//! Idle/demo mode player
//!
//! Greedy: head for the nearest idle food, never pick a move the collision
//! rules would call lethal, prefer going straight on ties.

use super::collision::{Border, SelfHit, classify_border, classify_self_collision};
use super::direction::Direction;
use super::grid::Cell;
use super::state::GameState;

/// Distance between cells, counting wrap-around when the border is open
fn board_distance(state: &GameState, a: Cell, b: Cell) -> i32 {
    if state.level.border_is_lethal {
        a.manhattan(b)
    } else {
        let dc = (a.col - b.col).abs();
        let dr = (a.row - b.row).abs();
        dc.min(state.grid.cols() - dc) + dr.min(state.grid.rows() - dr)
    }
}

/// Pick the next direction for the snake, or `None` if every move is lethal
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let current = state.directions.current();
    let target = state
        .foods
        .iter()
        .filter(|f| f.is_idle())
        .map(|f| f.position)
        .min_by_key(|c| (board_distance(state, state.snake.head(), *c), *c));

    Direction::ALL
        .into_iter()
        .filter(|d| current.is_none_or(|c| !c.is_opposite(*d)))
        .filter_map(|d| {
            let head = state.snake.head().step(d);
            let head = match classify_border(head, &state.grid, state.level.border_is_lethal) {
                Border::Inside => head,
                Border::WrapTo(cell) => cell,
                Border::Lethal => return None,
            };
            let hit = classify_self_collision(
                head,
                state.snake.body(),
                state.level.self_collision_is_lethal,
            );
            (hit == SelfHit::Safe).then_some((d, head))
        })
        .min_by_key(|(d, head)| {
            let distance = target.map_or(0, |t| board_distance(state, *head, t));
            (distance, Some(*d) != current)
        })
        .map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelConfig;
    use crate::sim::food::FoodItem;
    use crate::sim::grid::Grid;
    use crate::sim::snake::Snake;
    use crate::sim::state::initialize;

    fn state_with(level: LevelConfig, snake: Snake, facing: Direction) -> GameState {
        let mut state = initialize(level, Grid::new(300, 300, 30), 3).unwrap();
        state.foods.clear();
        state.place_snake(snake);
        state.directions.reset(Some(facing));
        state
    }

    #[test]
    fn test_heads_for_food() {
        let mut state = state_with(
            LevelConfig::default(),
            Snake::new(Cell::new(5, 5), Direction::Right, 1),
            Direction::Right,
        );
        state.foods.push(FoodItem::new(1, Cell::new(5, 2)));
        assert_eq!(choose_direction(&state), Some(Direction::Up));
    }

    #[test]
    fn test_keeps_straight_without_food() {
        let state = state_with(
            LevelConfig::default(),
            Snake::new(Cell::new(5, 5), Direction::Down, 1),
            Direction::Down,
        );
        assert_eq!(choose_direction(&state), Some(Direction::Down));
    }

    #[test]
    fn test_avoids_lethal_wall() {
        let level = LevelConfig {
            border_is_lethal: true,
            ..Default::default()
        };
        let mut state = state_with(
            level,
            Snake::new(Cell::new(9, 5), Direction::Right, 1),
            Direction::Right,
        );
        // Right runs into the wall
        state.foods.push(FoodItem::new(1, Cell::new(9, 6)));
        let choice = choose_direction(&state);
        assert_eq!(choice, Some(Direction::Down));
    }

    #[test]
    fn test_never_reverses() {
        let mut state = state_with(
            LevelConfig::default(),
            Snake::new(Cell::new(5, 5), Direction::Right, 2),
            Direction::Right,
        );
        state.foods.push(FoodItem::new(1, Cell::new(1, 5)));
        assert_ne!(choose_direction(&state), Some(Direction::Left));
    }
}
