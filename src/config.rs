/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::grid::Grid;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub game: GameSettings,
    pub shell: ShellSettings,
    pub log_file: PathBuf,
    pub log_level: String,
}

#[derive(Clone, Debug)]
pub struct GameSettings {
    pub tick_rate_ms: u64,
    pub grid: Grid,
    pub score_per_food: u32,
}

impl GameSettings {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            tick_rate_ms: default_tick_rate(),
            grid: Grid::new(default_width(), default_height()),
            score_per_food: default_score_per_food(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShellSettings {
    pub user: String,
    pub home: String,
    pub effect_duration: Duration,
}

impl Default for ShellSettings {
    fn default() -> Self {
        ShellSettings {
            user: default_user(),
            home: default_home(),
            effect_duration: Duration::from_secs(default_effect_secs()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("grid {width}x{height} is too small (minimum 2x1)")]
    GridTooSmall { width: usize, height: usize },

    #[error("tick_rate_ms must be greater than zero")]
    ZeroTickRate,

    #[error("home must be an absolute path, got {0:?}")]
    RelativeHome(String),
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    shell: TomlShell,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
    #[serde(default = "default_score_per_food")]
    score_per_food: u32,
}

#[derive(Deserialize, Debug)]
struct TomlShell {
    #[serde(default = "default_user")]
    user: String,
    #[serde(default = "default_home")]
    home: String,
    #[serde(default = "default_effect_secs")]
    effect_secs: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 200 }
fn default_width() -> usize { 16 }
fn default_height() -> usize { 8 }
fn default_score_per_food() -> u32 { 10 }

fn default_user() -> String { "user".into() }
fn default_home() -> String { "/home/user".into() }
fn default_effect_secs() -> u64 { 10 }

fn default_log_file() -> String { "termfolio.log".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            tick_rate_ms: default_tick_rate(),
            width: default_width(),
            height: default_height(),
            score_per_food: default_score_per_food(),
        }
    }
}

impl Default for TomlShell {
    fn default() -> Self {
        TomlShell {
            user: default_user(),
            home: default_home(),
            effect_secs: default_effect_secs(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl TomlConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.game.width < 2 || self.game.height < 1 {
            return Err(ConfigError::GridTooSmall {
                width: self.game.width,
                height: self.game.height,
            });
        }
        if self.game.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if !self.shell.home.starts_with('/') {
            return Err(ConfigError::RelativeHome(self.shell.home.clone()));
        }
        Ok(())
    }
}

// ── Loading ──

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig::from_toml(TomlConfig::default())
    }
}

impl AppConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/termfolio`.
    /// A missing file or missing keys fall back to defaults; a file that
    /// cannot be read, parsed or validated is an error.
    pub fn load() -> Result<Self, ConfigError> {
        load_from(&candidate_dirs())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: TomlConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(AppConfig::from_toml(cfg))
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        AppConfig {
            game: GameSettings {
                tick_rate_ms: cfg.game.tick_rate_ms,
                grid: Grid::new(cfg.game.width, cfg.game.height),
                score_per_food: cfg.game.score_per_food,
            },
            shell: ShellSettings {
                user: cfg.shell.user,
                home: cfg.shell.home,
                effect_duration: Duration::from_secs(cfg.shell.effect_secs),
            },
            log_file: PathBuf::from(cfg.general.log_file),
            log_level: cfg.general.log_level,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/termfolio");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories. The first existing
/// file wins and is reported as-is when it cannot be read or is invalid.
fn load_from(search_dirs: &[PathBuf]) -> Result<AppConfig, ConfigError> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        return AppConfig::from_toml_str(&text);
    }
    Ok(AppConfig::default())
}
