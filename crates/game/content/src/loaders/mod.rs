//! Content loaders for reading dungeon data from files.
//!
//! Each loader turns one file into a plain `game-core` value: stat tables
//! (TOML or RON), rule configuration (TOML) and ASCII maps.

pub mod config;
pub mod factory;
pub mod map;
pub mod stats;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;
pub use stats::StatsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
