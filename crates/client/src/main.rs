//! Dungeon crawler binary.
//!
//! ```bash
//! DUNGEON_SEED=42 DUNGEON_MAP=maps/cave.txt cargo run -p dungeon-client
//! ```
//!
//! Logs are written to `$DUNGEON_LOG_DIR/dungeon.log`; set `RUST_LOG=debug`
//! for per-command and per-combat detail.

use std::io;

use anyhow::Result;
use dungeon_client::{ClientConfig, Session, build_engine, setup_logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let (_guard, log_file) = setup_logging(&config.log_dir)?;

    tracing::info!("Starting dungeon client");
    tracing::info!("Seed: {}", config.seed);
    tracing::debug!(?config, "client configuration");

    let engine = build_engine(&config)?;
    let mut session = Session::new(engine, config.seed, config.view, config.auto_enemy_turn);

    println!("Logging to {}. Type ? for help.", log_file.display());
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    session.run(stdin.lock(), &mut stdout)?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
