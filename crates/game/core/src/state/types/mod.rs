pub mod character;
pub mod common;
pub mod pickup;
pub mod turn;
pub mod world;

pub use character::{Character, CharacterKind, Progression};
pub use common::{CharacterId, PickupId, Position};
pub use pickup::Pickup;
pub use turn::{TurnPhase, TurnState};
pub use world::{Grid, Occupant, Tile, TileKind};
