//! ASCII map loader.
//!
//! Map files hold one dungeon row per line. Only line endings are stripped:
//! leading and trailing spaces are floor tiles.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};

/// Loader for ASCII map files.
pub struct MapLoader;

impl MapLoader {
    /// Load map rows from a text file.
    ///
    /// Shape and glyph validation happen when the rows are turned into a
    /// dungeon.
    pub fn load(path: &Path) -> LoadResult<Vec<String>> {
        let content = read_file(path)?;
        let rows = Self::parse(&content);
        if rows.is_empty() {
            anyhow::bail!("Map file {} has no rows", path.display());
        }
        tracing::debug!(path = %path.display(), rows = rows.len(), "map file loaded");
        Ok(rows)
    }

    /// Split map text into rows, dropping `\r` and a trailing empty line.
    pub fn parse(content: &str) -> Vec<String> {
        content
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect()
    }
}
