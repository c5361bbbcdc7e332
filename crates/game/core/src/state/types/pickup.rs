use super::Position;

/// A gold pile waiting on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    pub position: Position,
    pub amount: u32,
}

impl Pickup {
    pub const fn new(position: Position, amount: u32) -> Self {
        Self { position, amount }
    }

    /// Display name used by inspection panels, e.g. `Gold: 25`.
    pub fn name(&self) -> String {
        format!("Gold: {}", self.amount)
    }
}
