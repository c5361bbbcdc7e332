//! Builds the engine a session plays on.
use anyhow::{Context, Result};
use game_content::{ConfigLoader, ContentFactory, DEFAULT_DUNGEON, MapLoader, StatsLoader};
use game_core::{GameConfig, GameEngine, StatTable};
use tracing::info;

use crate::config::ClientConfig;

/// Loads rules, stats and the map named by `config`, falling back to the
/// built-in content for anything left unset.
pub fn build_engine(config: &ClientConfig) -> Result<GameEngine> {
    let rules = match &config.config_path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => GameConfig::default(),
    };

    let stats = match &config.stats_path {
        Some(path) => StatsLoader::load(path)
            .with_context(|| format!("Failed to load stats from {}", path.display()))?,
        None => StatTable::default(),
    };

    let dungeon = match &config.map_path {
        Some(path) => {
            let rows = MapLoader::load(path)?;
            ContentFactory::dungeon(&rows, &stats, &rules)
                .with_context(|| format!("Failed to build map {}", path.display()))?
        }
        None => ContentFactory::dungeon(DEFAULT_DUNGEON, &stats, &rules)?,
    };

    info!(
        width = dungeon.width(),
        height = dungeon.height(),
        enemies = dungeon.live_enemies().len(),
        "dungeon ready"
    );
    Ok(GameEngine::new(dungeon, rules))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::ViewConfig;

    fn client_config() -> ClientConfig {
        ClientConfig {
            seed: 7,
            map_path: None,
            stats_path: None,
            config_path: None,
            log_dir: std::env::temp_dir(),
            view: ViewConfig::default(),
            auto_enemy_turn: true,
        }
    }

    #[test]
    fn defaults_to_the_built_in_dungeon() {
        let engine = build_engine(&client_config()).unwrap();
        assert_eq!(engine.dungeon().width(), 30);
        assert_eq!(engine.dungeon().height(), 35);
        assert_eq!(engine.epoch(), 1);
    }

    #[test]
    fn loads_files_when_configured() {
        let mut map = NamedTempFile::new().unwrap();
        writeln!(map, "#####\n#@ 1#\n#####").unwrap();
        let mut rules = NamedTempFile::new().unwrap();
        writeln!(rules, "die_sides = 10").unwrap();

        let config = ClientConfig {
            map_path: Some(map.path().to_path_buf()),
            config_path: Some(rules.path().to_path_buf()),
            ..client_config()
        };
        let engine = build_engine(&config).unwrap();
        assert_eq!(engine.dungeon().width(), 5);
        assert_eq!(engine.config().die_sides, 10);
    }

    #[test]
    fn reports_broken_maps() {
        let mut map = NamedTempFile::new().unwrap();
        writeln!(map, "#####\n# 1#").unwrap();
        let config = ClientConfig {
            map_path: Some(map.path().to_path_buf()),
            ..client_config()
        };
        let err = build_engine(&config).unwrap_err();
        assert!(err.to_string().starts_with("Failed to build map"));
    }
}
