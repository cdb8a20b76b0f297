/// Snake engine: the game state machine owned by the shell session.
///
/// ```text
///   Inactive ──start──▶ Active ──tick: wall/self/board full──▶ (game over) ──▶ Inactive
///                        │  ▲                                        prints skull + score
///                        │  └── start (restart: fresh state, same interval)
///                        └──exit──▶ Inactive
/// ```
///
/// The interval is armed exactly while a game is active. Game over is not a
/// resting state: it prints, drops the state and cancels the interval in the
/// same tick that detected it.

use std::time::Instant;

use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::art;
use crate::config::GameSettings;
use crate::domain::grid::{Cell, Direction};
use crate::host::Output;
use super::event::GameEvent;
use super::game::{GameState, START, START_FOOD};
use super::schedule::Interval;
use super::step;

pub struct SnakeEngine {
    settings: GameSettings,
    game: Option<GameState>,
    interval: Interval,
    rng: SmallRng,
}

impl SnakeEngine {
    pub fn new(settings: GameSettings, rng: SmallRng) -> Self {
        let interval = Interval::new(settings.tick_rate());
        SnakeEngine { settings, game: None, interval, rng }
    }

    pub fn is_active(&self) -> bool {
        self.game.is_some()
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Mutable access for scripted scenarios.
    #[cfg(test)]
    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }

    #[cfg(test)]
    pub fn timer_armed(&self) -> bool {
        self.interval.is_armed()
    }

    /// Begin a new game. An active game is replaced.
    pub fn start(&mut self, now: Instant, out: &mut dyn Output) {
        if self.is_active() {
            info!("snake restarted");
        } else {
            info!("snake started");
        }

        let grid = self.settings.grid;
        let start = Cell::new(
            START.x.min(grid.width as i32 - 1),
            START.y.min(grid.height as i32 - 1),
        );
        let mut game = GameState::new(grid, start, START_FOOD);
        if !grid.contains(START_FOOD) || START_FOOD == start {
            // Smaller boards: fall back to a random free cell.
            if let Some(food) = step::spawn_food(grid, &game.snake, &mut self.rng) {
                game.food = food;
            }
        }

        out.print(art::SNAKE_BANNER, false);
        out.print(&game.render_board(), false);
        self.game = Some(game);
        self.interval.start(now);
    }

    /// Queue a direction change for the next tick. Ignored when inactive.
    pub fn key_down(&mut self, dir: Direction) {
        if let Some(game) = self.game.as_mut() {
            game.queue_turn(dir);
        }
    }

    /// Advance the game if the interval is due.
    pub fn poll(&mut self, now: Instant, out: &mut dyn Output) -> Vec<GameEvent> {
        if self.interval.poll(now) {
            self.tick(out)
        } else {
            vec![]
        }
    }

    /// One simulation step plus its output.
    pub fn tick(&mut self, out: &mut dyn Output) -> Vec<GameEvent> {
        let game = match self.game.as_mut() {
            Some(g) => g,
            None => return vec![],
        };

        let events = step::step(game, self.settings.score_per_food, &mut self.rng);

        match events.iter().find(|e| e.is_terminal()) {
            Some(GameEvent::HitWall { score }) => {
                self.game_over("\nGame Over! You hit the wall!", *score, out);
            }
            Some(GameEvent::HitSelf { score }) => {
                self.game_over("\nGame Over! You hit yourself!", *score, out);
            }
            Some(GameEvent::BoardFilled { score }) => {
                self.game_over("\nYou filled the board!", *score, out);
            }
            _ => {
                if let Some(game) = self.game.as_ref() {
                    debug!(tick = game.tick, len = game.len(), score = game.score, "snake tick");
                    out.print(&game.render_board(), false);
                }
            }
        }

        events
    }

    /// End the game without a collision message. Returns false if no game was running.
    pub fn stop(&mut self) -> bool {
        self.interval.cancel();
        match self.game.take() {
            Some(game) => {
                info!(score = game.score, "snake exited");
                true
            }
            None => false,
        }
    }

    fn game_over(&mut self, headline: &str, score: u32, out: &mut dyn Output) {
        info!(score, "{}", headline.trim());
        out.print(headline, false);
        out.print(art::SKULL, false);
        out.print(&format!("Final Score: {score}\n"), false);
        self.game = None;
        self.interval.cancel();
    }
}
