//! Field-of-view computation and fog-of-war bookkeeping.
//!
//! Visibility is recomputed from the player's cell once per logical step by a
//! breadth-first flood that only accepts a cell when every cell sampled on the
//! straight line back to the player has already been accepted. Sight therefore
//! only travels through chains of confirmed-visible floor, which approximates
//! shadow casting without any trigonometry.
//!
//! Each pass bumps a monotonically increasing epoch and stamps it onto every
//! visible tile. A tile whose stamp equals the current epoch is visible, a
//! smaller non-zero stamp means remembered (fogged), and zero means never seen.

use std::collections::VecDeque;

use tracing::trace;

use crate::config::GameConfig;
use crate::state::{CharacterId, Dungeon, Grid, Position, Tile};

/// Neighbour expansion order: left, down, right, up.
const NEIGHBOURS: [(i32, i32); GameConfig::CARDINAL_NEIGHBOURS] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// How a tile relates to the current visibility epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileVisibility {
    /// Never stamped. Consumers must not render or query its content.
    Unseen,
    /// Stamped on an earlier pass but not the latest one.
    Remembered,
    /// Stamped on the latest pass.
    Visible,
}

impl TileVisibility {
    pub fn classify(stamp: u64, epoch: u64) -> Self {
        if stamp == 0 {
            TileVisibility::Unseen
        } else if stamp == epoch {
            TileVisibility::Visible
        } else {
            TileVisibility::Remembered
        }
    }
}

/// Summary of one visibility pass.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct VisibilityReport {
    pub epoch: u64,
    pub visible_tiles: usize,
    /// Enemies whose `seen` flag was set for the first time on this pass.
    pub newly_seen: Vec<CharacterId>,
}

/// Per-cell state of the flood fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resolution {
    Unvisited,
    /// Enqueued, not yet confirmed.
    Candidate,
    Visible,
}

/// Incremental visibility engine holding the epoch counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityEngine {
    epoch: u64,
}

impl VisibilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch of the most recent pass (0 before the first pass).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn classify(&self, tile: &Tile) -> TileVisibility {
        TileVisibility::classify(tile.visibility_stamp, self.epoch)
    }

    pub fn is_visible(&self, tile: &Tile) -> bool {
        self.classify(tile) == TileVisibility::Visible
    }

    pub fn is_remembered(&self, tile: &Tile) -> bool {
        self.classify(tile) == TileVisibility::Remembered
    }

    /// Runs one full pass from the player's cell, stamping visible tiles and
    /// flagging every enemy standing on one as seen.
    pub fn recompute(&mut self, dungeon: &mut Dungeon) -> VisibilityReport {
        self.epoch += 1;
        let epoch = self.epoch;

        let origin = dungeon.player().position();
        let visible = visible_cells(dungeon.grid(), origin);

        let mut sighted = Vec::new();
        let grid = dungeon.grid_mut();
        for &cell in &visible {
            if let Ok(tile) = grid.tile_mut(cell) {
                tile.visibility_stamp = epoch;
                if let Some(id) = tile.character() {
                    sighted.push(id);
                }
            }
        }

        let mut newly_seen = Vec::new();
        for id in sighted {
            if let Some(character) = dungeon.character_mut(id) {
                if character.kind.uses_seen_flag() && character.mark_seen() {
                    newly_seen.push(id);
                }
            }
        }

        trace!(
            epoch,
            visible = visible.len(),
            newly_seen = newly_seen.len(),
            "visibility recomputed"
        );

        VisibilityReport {
            epoch,
            visible_tiles: visible.len(),
            newly_seen,
        }
    }
}

/// Flood fill from `origin`, returning every cell visible from it.
///
/// Walls reached from a visible cell are included but never expand the
/// frontier and never count as transparent for later line checks.
pub fn visible_cells(grid: &Grid, origin: Position) -> Vec<Position> {
    let width = grid.width() as usize;
    let mut resolution = vec![Resolution::Unvisited; grid.tiles().len()];
    let index = |position: Position| -> Option<usize> {
        grid.contains(position)
            .then(|| position.y as usize * width + position.x as usize)
    };

    let mut visible = Vec::new();
    let Some(origin_index) = index(origin) else {
        return visible;
    };
    resolution[origin_index] = Resolution::Visible;

    let mut frontier = VecDeque::from([origin]);
    while let Some(cell) = frontier.pop_front() {
        let Ok(tile) = grid.tile_at(cell) else {
            continue;
        };

        if !tile.kind.is_transparent() {
            visible.push(cell);
            continue;
        }

        let clear = sight_line(cell, origin)
            .iter()
            .all(|sample| index(*sample).is_some_and(|i| resolution[i] == Resolution::Visible));
        if !clear {
            continue;
        }

        if let Some(i) = index(cell) {
            resolution[i] = Resolution::Visible;
        }
        visible.push(cell);

        for (dx, dy) in NEIGHBOURS {
            let next = cell.offset(dx, dy);
            if let Some(i) = index(next) {
                if resolution[i] == Resolution::Unvisited {
                    resolution[i] = Resolution::Candidate;
                    frontier.push_back(next);
                }
            }
        }
    }

    visible
}

/// Intermediate cells sampled on the straight line from `from` to `to`,
/// excluding both endpoints.
///
/// Uses `max(|dx|, |dy|)` evenly spaced samples, rounding half up.
pub fn sight_line(from: Position, to: Position) -> Vec<Position> {
    let dx = i64::from(to.x - from.x);
    let dy = i64::from(to.y - from.y);
    let length = dx.abs().max(dy.abs());

    (1..length)
        .map(|i| {
            Position::new(
                from.x + round_half_up(i * dx, length) as i32,
                from.y + round_half_up(i * dy, length) as i32,
            )
        })
        .collect()
}

/// `round(numerator / denominator)` with halves rounded towards +infinity.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}
