//! Headless terminal client for the dungeon crawler.
//!
//! Reads one command per line, drives [`game_core::GameEngine`] and prints a
//! text frame of the camera window after every accepted command. Logs go to a
//! file so stdout carries nothing but the game.
pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod render;
pub mod session;
pub mod viewport;

pub use bootstrap::build_engine;
pub use config::{ClientConfig, ViewConfig};
pub use logging::setup_logging;
pub use session::{Command, CommandError, Flow, Session};
pub use viewport::Viewport;
