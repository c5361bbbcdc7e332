//! Stat table loader.
//!
//! A stat file has one section per character kind. Sections left out keep the
//! built-in stats, so a file overriding only the orc is valid:
//!
//! ```toml
//! [orc]
//! health = 12
//! speed = 2
//! attack = 6
//! defend = 3
//! xp = 40
//! ```

use std::path::Path;

use game_core::{CharacterKind, StatBlock, StatTable};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// On-disk shape of a stat table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatTableFile {
    player: Option<StatBlock>,
    goblin: Option<StatBlock>,
    orc: Option<StatBlock>,
}

impl StatTableFile {
    fn into_table(self) -> StatTable {
        let mut table = StatTable::default();
        for (kind, stats) in [
            (CharacterKind::Player, self.player),
            (CharacterKind::Goblin, self.goblin),
            (CharacterKind::Orc, self.orc),
        ] {
            if let Some(stats) = stats {
                table = table.with(kind, stats);
            }
        }
        table
    }
}

/// Loader for [`StatTable`]s from TOML or RON files.
pub struct StatsLoader;

impl StatsLoader {
    /// Load a stat table, picking the format from the file extension
    /// (`.ron` for RON, anything else for TOML).
    pub fn load(path: &Path) -> LoadResult<StatTable> {
        let content = read_file(path)?;
        let is_ron = path.extension().is_some_and(|ext| ext == "ron");
        let table = if is_ron {
            Self::parse_ron(&content)?
        } else {
            Self::parse(&content)?
        };
        tracing::debug!(path = %path.display(), "stat table loaded");
        Ok(table)
    }

    /// Parse a stat table from TOML text.
    pub fn parse(content: &str) -> LoadResult<StatTable> {
        let file: StatTableFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stats TOML: {}", e))?;
        Self::validate(file.into_table())
    }

    /// Parse a stat table from RON text.
    pub fn parse_ron(content: &str) -> LoadResult<StatTable> {
        let file: StatTableFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stats RON: {}", e))?;
        Self::validate(file.into_table())
    }

    fn validate(table: StatTable) -> LoadResult<StatTable> {
        for (kind, stats) in [
            (CharacterKind::Player, table.player),
            (CharacterKind::Goblin, table.goblin),
            (CharacterKind::Orc, table.orc),
        ] {
            if stats.health == 0 {
                anyhow::bail!("{kind} must start with positive health");
            }
            if stats.speed == 0 {
                anyhow::bail!("{kind} must have a speed of at least 1");
            }
            if let Some(chance) = stats.critical_chance {
                if !(0.0..=1.0).contains(&chance) {
                    anyhow::bail!("{kind} critical_chance {chance} is outside [0, 1]");
                }
            }
        }
        Ok(table)
    }
}
