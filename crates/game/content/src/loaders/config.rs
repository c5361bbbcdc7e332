//! Rule configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
///
/// Keys left out of the file keep their built-in defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.die_sides == 0 {
            anyhow::bail!("die_sides must be at least 1");
        }
        Ok(config)
    }
}
