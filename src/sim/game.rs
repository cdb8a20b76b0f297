/// GameState: the complete snapshot of a running snake game.
///
/// ## Body
///
/// `snake` is head-first. Length starts at 1 and only `step` changes it:
/// +1 on a food tick, unchanged otherwise.
///
/// ## Turns
///
/// Key presses are not applied directly. They are queued with
/// `queue_turn()` and drained by `apply_pending_turns()` at the start of
/// the next tick, so a tick always reads a settled direction.

use std::collections::VecDeque;

use crate::domain::grid::{Cell, Direction, Grid};
use crate::domain::rules;

/// Starting head position on the default board.
pub const START: Cell = Cell::new(5, 2);
/// Starting food position on the default board.
pub const START_FOOD: Cell = Cell::new(10, 4);

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub snake: VecDeque<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub tick: u64,
    pending: VecDeque<Direction>,
}

impl GameState {
    pub fn new(grid: Grid, start: Cell, food: Cell) -> Self {
        let mut snake = VecDeque::with_capacity(grid.area());
        snake.push_back(start);
        GameState {
            grid,
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            tick: 0,
            pending: VecDeque::with_capacity(4),
        }
    }

    #[inline]
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Record a key press for the next tick.
    pub fn queue_turn(&mut self, dir: Direction) {
        self.pending.push_back(dir);
    }

    /// Apply queued turns in arrival order. Each is checked against the
    /// direction the tick started with, so two quick presses cannot add up
    /// to a reversal.
    pub fn apply_pending_turns(&mut self) {
        let heading = self.direction;
        while let Some(dir) = self.pending.pop_front() {
            if rules::accept_turn(heading, dir, self.snake.len()) {
                self.direction = dir;
            }
        }
    }

    /// Draw the framed board followed by the score line.
    pub fn render_board(&self) -> String {
        let w = self.grid.width;
        let h = self.grid.height;
        let mut board = vec![vec![' '; w]; h];

        for (i, part) in self.snake.iter().enumerate() {
            if self.grid.contains(*part) {
                board[part.y as usize][part.x as usize] = if i == 0 { 'O' } else { 'o' };
            }
        }
        if self.grid.contains(self.food) {
            board[self.food.y as usize][self.food.x as usize] = '*';
        }

        let bar = "═".repeat(w);
        let mut out = String::with_capacity((w + 3) * (h + 3) * 3);
        out.push('╔');
        out.push_str(&bar);
        out.push_str("╗\n");
        for row in &board {
            out.push('║');
            out.extend(row.iter());
            out.push_str("║\n");
        }
        out.push('╚');
        out.push_str(&bar);
        out.push_str("╝\n");
        out.push_str(&format!("Score: {}", self.score));
        out
    }
}
