//! Content factory for building dungeons from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{Dungeon, GameConfig, StatTable, StatsOracle};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader, StatsLoader};

/// Content factory that loads dungeon content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── stats.toml
/// └── maps/
///     ├── caves.txt
///     └── arena.txt
/// ```
///
/// Missing `config.toml` or `stats.toml` fall back to the built-in values.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rule configuration from `config.toml`, or the defaults if absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the stat table from `stats.toml`, or the built-in table if absent.
    pub fn load_stats(&self) -> LoadResult<StatTable> {
        let path = self.data_dir.join("stats.toml");
        if !path.exists() {
            return Ok(StatTable::default());
        }
        StatsLoader::load(&path)
    }

    /// Load map rows from `maps/{map_name}.txt`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<Vec<String>> {
        let path = self.data_dir.join("maps").join(format!("{}.txt", map_name));
        MapLoader::load(&path)
    }

    /// Build a dungeon from `maps/{map_name}.txt` with this directory's stats
    /// and configuration.
    pub fn load_dungeon(&self, map_name: &str) -> LoadResult<(Dungeon, GameConfig)> {
        let config = self.load_config()?;
        let stats = self.load_stats()?;
        let rows = self.load_map(map_name)?;
        let dungeon = Self::dungeon(&rows, &stats, &config)
            .with_context(|| format!("Failed to build map '{}'", map_name))?;
        Ok((dungeon, config))
    }

    /// Build a dungeon from map rows, turning map errors into load errors.
    pub fn dungeon<S: AsRef<str>>(
        rows: &[S],
        stats: &(impl StatsOracle + ?Sized),
        config: &GameConfig,
    ) -> LoadResult<Dungeon> {
        Dungeon::from_ascii(rows, stats, config).context("Invalid dungeon map")
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use game_core::{CharacterKind, Position};

    use super::*;
    use crate::DEFAULT_DUNGEON;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn builds_the_default_dungeon() {
        let dungeon =
            ContentFactory::dungeon(DEFAULT_DUNGEON, &StatTable::default(), &GameConfig::default())
                .unwrap();
        assert_eq!(dungeon.width(), 30);
    }

    #[test]
    fn map_errors_carry_context() {
        let err = ContentFactory::dungeon(&["@ ", " "], &StatTable::default(), &GameConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid dungeon map"));
        assert!(format!("{err:#}").contains("map row 1 has width 1, expected 2"));
    }

    #[test]
    fn loads_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("maps")).unwrap();
        std::fs::write(dir.path().join("maps").join("tiny.txt"), "@*2\n").unwrap();
        std::fs::write(dir.path().join("config.toml"), "gold_amount = 7\n").unwrap();
        std::fs::write(
            dir.path().join("stats.toml"),
            "[orc]\nhealth = 9\nspeed = 1\nattack = 1\ndefend = 1\n",
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        let (dungeon, config) = factory.load_dungeon("tiny").unwrap();

        assert_eq!(config.gold_amount, 7);
        let orc = dungeon.enemy_at(Position::new(2, 0)).unwrap();
        let orc = dungeon.character(orc).unwrap();
        assert_eq!(orc.kind, CharacterKind::Orc);
        assert_eq!(orc.max_health, 9);
        assert_eq!(dungeon.pickups().next().map(|(_, p)| p.amount), Some(7));
    }

    #[test]
    fn absent_files_use_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(factory.load_stats().unwrap(), StatTable::default());
        assert!(factory.load_map("missing").is_err());
    }
}
