//! Static dungeon content and data-file loaders.
//!
//! This crate houses the built-in dungeon map and provides loaders for
//! user-supplied content:
//! - ASCII map files (one row per line)
//! - Stat tables (TOML or RON)
//! - Rule configuration (TOML)
//!
//! Content only feeds dungeon construction; nothing here is consulted once a
//! session is running. Validation of map glyphs and shape stays in
//! [`game_core::Dungeon::from_ascii`].

pub mod maps;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use maps::DEFAULT_DUNGEON;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader, StatsLoader};
