/// Command dispatcher: one shell session.
///
/// Resolution order for a submitted line:
///   1. game active   → only `exit` is honoured, everything else is swallowed
///   2. application   → `AppResolver::resolve(name)` with (args, options)
///   3. built-in      → `Registry::get(name)`, no arguments
///   4. otherwise     → `<name>:command not found`
///
/// Every branch except the swallow re-renders the prompt.

use std::time::Instant;

use rand::rngs::SmallRng;
use tracing::debug;

use crate::art;
use crate::config::{GameSettings, ShellSettings};
use crate::domain::grid::Direction;
use crate::fs::{FileSystem, Path};
use crate::host::{Effect, Host, Output, Sfx};
use crate::sim::engine::SnakeEngine;
use crate::sim::event::GameEvent;
use super::apps::{AppContext, AppResolver};
use super::parse;
use super::prompt;
use super::registry::{Builtin, Registry};

pub struct Dispatcher<F, A> {
    fs: F,
    apps: A,
    registry: Registry,
    settings: ShellSettings,
    path: Path,
    engine: SnakeEngine,
}

impl<F: FileSystem, A: AppResolver> Dispatcher<F, A> {
    pub fn new(fs: F, apps: A, shell: ShellSettings, game: GameSettings, rng: SmallRng) -> Self {
        let path = fs.go_home();
        let registry = Registry::standard();
        debug!(builtins = ?registry.names(), "dispatcher ready");
        Dispatcher {
            fs,
            apps,
            registry,
            settings: shell,
            path,
            engine: SnakeEngine::new(game, rng),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn engine(&self) -> &SnakeEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut SnakeEngine {
        &mut self.engine
    }

    pub fn game_active(&self) -> bool {
        self.engine.is_active()
    }

    /// The prompt as it would be printed right now.
    pub fn prompt(&self) -> String {
        prompt::prompt_line(&self.settings.user, &self.path, &self.settings.home)
    }

    /// First output of a session: the banner and a prompt.
    pub fn greet(&self, out: &mut dyn Output) {
        out.print(art::WELCOME, false);
        self.print_prompt(out);
    }

    /// Handle one submitted line.
    pub fn submit(&mut self, line: &str, now: Instant, out: &mut dyn Output, host: &mut dyn Host) {
        if self.engine.is_active() {
            if line.trim().eq_ignore_ascii_case("exit") {
                self.engine.stop();
                out.print(art::SNAKE_ENDED, false);
                self.print_prompt(out);
            }
            return;
        }

        if let Some(cmd) = parse::parse(line) {
            debug!(name = %cmd.name, args = ?cmd.args, options = ?cmd.options, "cmd");
            if let Some(app) = self.apps.resolve(&cmd.name) {
                let mut ctx = AppContext {
                    out: &mut *out,
                    host: &mut *host,
                    fs: &self.fs,
                    path: &mut self.path,
                };
                app.run(&mut ctx, &cmd.args, &cmd.options);
            } else if let Some(builtin) = self.registry.get(&cmd.name) {
                self.run_builtin(builtin, now, out, host);
            } else {
                out.print(&format!("\n{}:command not found", cmd.name), false);
            }
        }

        self.print_prompt(out);
    }

    /// Key press from the terminal. Only reaches the game while it runs.
    pub fn key_down(&mut self, dir: Direction) {
        self.engine.key_down(dir);
    }

    /// Drive the game timer.
    pub fn poll(&mut self, now: Instant, out: &mut dyn Output) -> Vec<GameEvent> {
        self.engine.poll(now, out)
    }

    fn print_prompt(&self, out: &mut dyn Output) {
        out.print(&self.prompt(), false);
    }

    fn run_builtin(&mut self, builtin: Builtin, now: Instant, out: &mut dyn Output, host: &mut dyn Host) {
        match builtin {
            Builtin::Help => out.print(art::HELP, false),
            Builtin::Secret => out.print(art::SECRET, false),
            Builtin::Matrix => {
                out.print(art::MATRIX, false);
                host.start_effect(Effect::MatrixRain, self.settings.effect_duration);
                host.play_sound(Sfx::Matrix);
            }
            Builtin::Hack => {
                out.print(art::HACK, false);
                host.play_video("hack");
                host.play_sound(Sfx::Hack);
            }
            Builtin::Coffee => out.print(art::COFFEE, false),
            Builtin::Home => {
                host.scroll_to_top();
                out.print(art::HOME, false);
            }
            Builtin::Snake => self.engine.start(now, out),
        }
    }
}
