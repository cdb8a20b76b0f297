/// The step function: advances a game by one tick.
///
/// Processing order:
///   1. Drain queued turns
///   2. Candidate head (unclamped)
///   3. Wall / self collision
///   4. Grow on food, else slide
///   5. Resample food
///
/// A terminal event leaves the body untouched, so the last committed head
/// is always inside the grid.

use std::collections::VecDeque;

use rand::Rng;

use crate::domain::grid::{Cell, Grid};
use crate::domain::rules::{self, MoveOutcome};
use super::event::GameEvent;
use super::game::GameState;

pub fn step<R: Rng + ?Sized>(game: &mut GameState, score_per_food: u32, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    game.tick += 1;

    game.apply_pending_turns();
    let candidate = game.head().step(game.direction);

    match rules::resolve_move(game.grid, &game.snake, candidate, game.food) {
        MoveOutcome::Wall => {
            events.push(GameEvent::HitWall { score: game.score });
        }
        MoveOutcome::SelfHit => {
            events.push(GameEvent::HitSelf { score: game.score });
        }
        MoveOutcome::Grow => {
            game.score += score_per_food;
            game.snake.push_front(candidate);
            events.push(GameEvent::FoodEaten { x: candidate.x, y: candidate.y, score: game.score });
            match spawn_food(game.grid, &game.snake, rng) {
                Some(food) => game.food = food,
                None => events.push(GameEvent::BoardFilled { score: game.score }),
            }
        }
        MoveOutcome::Slide => {
            game.snake.push_front(candidate);
            game.snake.pop_back();
        }
    }

    events
}

/// Pick a cell not covered by `body`, uniformly by rejection sampling.
/// Returns `None` when the body covers the whole grid.
pub fn spawn_food<R: Rng + ?Sized>(grid: Grid, body: &VecDeque<Cell>, rng: &mut R) -> Option<Cell> {
    if body.len() >= grid.area() {
        return None;
    }
    loop {
        let cell = Cell::new(
            rng.random_range(0..grid.width as i32),
            rng.random_range(0..grid.height as i32),
        );
        if !rules::occupied(body, cell) {
            return Some(cell);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Direction;
    use crate::sim::game::{START, START_FOOD};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fresh() -> GameState {
        GameState::new(Grid::default(), START, START_FOOD)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn five_ticks_without_input() {
        let mut g = fresh();
        let mut r = rng();
        for _ in 0..5 {
            assert!(step(&mut g, 10, &mut r).is_empty());
        }
        assert_eq!(g.head(), Cell::new(10, 2));
        assert_eq!(g.score, 0);
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn eating_grows_by_one_and_scores() {
        let mut g = fresh();
        let mut r = rng();
        // (5,2) → right ×5 → (10,2), down ×2 → (10,4) = food
        for _ in 0..5 {
            step(&mut g, 10, &mut r);
        }
        g.queue_turn(Direction::Down);
        step(&mut g, 10, &mut r);
        assert_eq!(g.len(), 1);
        let events = step(&mut g, 10, &mut r);
        assert_eq!(events, vec![GameEvent::FoodEaten { x: 10, y: 4, score: 10 }]);
        assert_eq!(g.score, 10);
        assert_eq!(g.len(), 2);
        assert_eq!(g.head(), Cell::new(10, 4));
        assert_ne!(g.food, Cell::new(10, 4));
        assert_ne!(g.food, Cell::new(10, 3));
    }

    #[test]
    fn length_changes_only_on_food() {
        let mut g = fresh();
        let mut r = rng();
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
        for i in 0..200 {
            if i % 3 == 0 {
                g.queue_turn(turns[(i / 3) % 4]);
            }
            let before = g.len();
            let events = step(&mut g, 10, &mut r);
            if events.iter().any(|e| e.is_terminal()) {
                assert_eq!(g.len(), before);
                break;
            }
            let ate = events.iter().any(|e| matches!(e, GameEvent::FoodEaten { .. }));
            assert_eq!(g.len(), before + usize::from(ate));
            assert!(g.grid.contains(g.head()));
        }
    }

    #[test]
    fn wall_at_right_edge() {
        let mut g = GameState::new(Grid::default(), Cell::new(15, 0), START_FOOD);
        let events = step(&mut g, 10, &mut rng());
        assert_eq!(events, vec![GameEvent::HitWall { score: 0 }]);
        assert_eq!(g.head(), Cell::new(15, 0));
    }

    #[test]
    fn wall_on_moving_axis_top() {
        let mut g = GameState::new(Grid::default(), Cell::new(3, 0), START_FOOD);
        g.queue_turn(Direction::Up);
        let events = step(&mut g, 10, &mut rng());
        assert_eq!(events, vec![GameEvent::HitWall { score: 0 }]);
    }

    #[test]
    fn hitting_own_body() {
        let mut g = fresh();
        g.snake = [(5, 2), (6, 2), (6, 3), (5, 3), (4, 3)]
            .iter()
            .map(|&(x, y)| Cell::new(x, y))
            .collect();
        g.direction = Direction::Down;
        let events = step(&mut g, 10, &mut rng());
        assert_eq!(events, vec![GameEvent::HitSelf { score: 0 }]);
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        let mut g = fresh();
        // 2x2 loop: head (5,2) going down into (5,3), tail at (5,3)
        g.snake = [(5, 2), (6, 2), (6, 3), (5, 3)]
            .iter()
            .map(|&(x, y)| Cell::new(x, y))
            .collect();
        g.direction = Direction::Down;
        let events = step(&mut g, 10, &mut rng());
        assert!(events.is_empty());
        assert_eq!(g.head(), Cell::new(5, 3));
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn food_never_lands_on_snake() {
        let grid = Grid::default();
        let body: VecDeque<Cell> = (0..16)
            .flat_map(|x| (0..7).map(move |y| Cell::new(x, y)))
            .collect();
        let mut r = rng();
        for _ in 0..500 {
            let food = spawn_food(grid, &body, &mut r).unwrap();
            assert!(!rules::occupied(&body, food));
            assert_eq!(food.y, 7);
        }
    }

    #[test]
    fn full_board_has_no_food() {
        let grid = Grid::new(2, 1);
        let body: VecDeque<Cell> = [Cell::new(0, 0), Cell::new(1, 0)].into_iter().collect();
        assert_eq!(spawn_food(grid, &body, &mut rng()), None);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut g = GameState::new(Grid::new(2, 1), Cell::new(0, 0), Cell::new(1, 0));
        let events = step(&mut g, 10, &mut rng());
        assert_eq!(
            events,
            vec![
                GameEvent::FoodEaten { x: 1, y: 0, score: 10 },
                GameEvent::BoardFilled { score: 10 },
            ]
        );
    }
}
