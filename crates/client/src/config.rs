//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Headless client configuration.
///
/// Everything the driver needs before building a session: where content
/// comes from, how the camera is sized, where logs go and which seed drives
/// the dice.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Seed of the combat and AI random source.
    pub seed: u64,
    /// ASCII map file. `None` plays the built-in dungeon.
    pub map_path: Option<PathBuf>,
    /// Stat table file (TOML or RON). `None` uses the built-in table.
    pub stats_path: Option<PathBuf>,
    /// Rule configuration file (TOML). `None` uses the defaults.
    pub config_path: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub view: ViewConfig,
    /// Run the whole enemy phase as soon as the player's budget runs out.
    /// When off, `.` advances it one step at a time.
    pub auto_enemy_turn: bool,
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SEED` - RNG seed (default: current time)
    /// - `DUNGEON_MAP` - ASCII map file
    /// - `DUNGEON_STATS` - stat table file
    /// - `DUNGEON_CONFIG` - rule configuration file
    /// - `DUNGEON_LOG_DIR` - log directory (default: platform cache dir)
    /// - `DUNGEON_VIEW_WIDTH` / `DUNGEON_VIEW_HEIGHT` - camera size in tiles (default: 20 x 15)
    /// - `DUNGEON_AUTO_ENEMY` - `false` to step the enemy phase by hand (default: true)
    pub fn from_env() -> Self {
        let mut config = Self {
            seed: read_env("DUNGEON_SEED").unwrap_or_else(time_seed),
            map_path: read_env("DUNGEON_MAP"),
            stats_path: read_env("DUNGEON_STATS"),
            config_path: read_env("DUNGEON_CONFIG"),
            log_dir: read_env("DUNGEON_LOG_DIR").unwrap_or_else(default_log_dir),
            view: ViewConfig::default(),
            auto_enemy_turn: read_env("DUNGEON_AUTO_ENEMY").unwrap_or(true),
        };

        if let Some(width) = read_env::<u32>("DUNGEON_VIEW_WIDTH") {
            config.view.width = width.max(ViewConfig::MIN_SIZE);
        }
        if let Some(height) = read_env::<u32>("DUNGEON_VIEW_HEIGHT") {
            config.view.height = height.max(ViewConfig::MIN_SIZE);
        }

        config
    }
}

/// Camera size in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
}

impl ViewConfig {
    pub const MIN_SIZE: u32 = 5;
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
        }
    }
}

/// Platform cache directory for logs.
///
/// - macOS: `~/Library/Caches/dungeon/logs`
/// - Linux: `~/.cache/dungeon/logs` (or `$XDG_CACHE_HOME/dungeon/logs`)
/// - Windows: `%LOCALAPPDATA%\dungeon\cache\logs`
/// - Fallback: `/tmp/dungeon/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon"))
        .join("logs")
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
