//! Read-only inputs to the simulation.
//!
//! The random source and the stat tables are injected from outside so the
//! engine never depends on a concrete generator or a content format.
mod rng;
mod tables;

pub use rng::{PcgRng, RngOracle, ScriptedRng, roll_from_unit};
pub use tables::{StatBlock, StatTable, StatsOracle};
