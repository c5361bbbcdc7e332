//! Greedy single-step enemy behaviour.
//!
//! Enemies do not path-find. Each activation step either attacks an adjacent
//! player or takes one cardinal step that reduces the distance along an open
//! axis, preferring the axis with the larger gap.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::env::RngOracle;
use crate::state::{CharacterId, Dungeon, Position};

/// What an enemy wants to do with its current activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyIntent {
    /// The player is adjacent: attack, ending this enemy's turn.
    Attack { target: CharacterId },
    /// Step one tile by `(dx, dy)`, spending one move point.
    Step { dx: i32, dy: i32 },
    /// No open axis towards the player: give up for this turn.
    Hold,
}

impl EnemyIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyIntent::Attack { .. } => "attack",
            EnemyIntent::Step { .. } => "step",
            EnemyIntent::Hold => "hold",
        }
    }
}

/// Decides the intent of `enemy` for one activation step.
///
/// Reads the dungeon only; applying the intent is left to the caller.
pub fn decide(
    dungeon: &Dungeon,
    enemy: CharacterId,
    rng: &mut (impl RngOracle + ?Sized),
) -> EnemyIntent {
    let Some(origin) = dungeon.character(enemy).map(|c| c.position()) else {
        return EnemyIntent::Hold;
    };
    let target = dungeon.player().position();
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;

    if origin.taxicab(target) == 1 {
        return EnemyIntent::Attack {
            target: dungeon.player_id(),
        };
    }

    let intent = choose_step(origin, dx, dy, |p| dungeon.grid().is_blocked_for_enemy(p), rng);
    trace!(%enemy, %origin, dx, dy, intent = intent.as_str(), "enemy decided");
    intent
}

/// Picks an axis step towards `(dx, dy)` given a blocking predicate.
fn choose_step(
    origin: Position,
    dx: i32,
    dy: i32,
    is_blocked: impl Fn(Position) -> bool,
    rng: &mut (impl RngOracle + ?Sized),
) -> EnemyIntent {
    let horizontal = (dx.signum(), 0);
    let vertical = (0, dy.signum());

    let mut open: ArrayVec<(i32, i32), 2> = ArrayVec::new();
    for (sx, sy) in [horizontal, vertical] {
        if (sx, sy) != (0, 0) && !is_blocked(origin.offset(sx, sy)) {
            open.push((sx, sy));
        }
    }

    let (sx, sy) = match open.as_slice() {
        [] => return EnemyIntent::Hold,
        [only] => *only,
        [along_x, along_y, ..] => {
            if dx.abs() > dy.abs() {
                *along_x
            } else if dy.abs() > dx.abs() {
                *along_y
            } else if rng.coin_flip() {
                *along_x
            } else {
                *along_y
            }
        }
    };

    EnemyIntent::Step { dx: sx, dy: sy }
}
