use crate::error::GridError;

use super::{CharacterId, PickupId, Position};

/// Static terrain of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Wall,
    Floor,
}

impl TileKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TileKind::Floor)
    }

    /// Whether sight passes through this tile.
    pub fn is_transparent(self) -> bool {
        matches!(self, TileKind::Floor)
    }
}

/// What currently stands on a tile. Tiles refer to arena slots, never to the
/// entities themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    Character(CharacterId),
    Pickup(PickupId),
}

/// One cell of the dungeon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    pub occupant: Option<Occupant>,
    /// Last visibility epoch at which this tile was confirmed visible; 0 = never seen.
    pub visibility_stamp: u64,
}

impl Tile {
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            occupant: None,
            visibility_stamp: 0,
        }
    }

    pub fn character(&self) -> Option<CharacterId> {
        match self.occupant {
            Some(Occupant::Character(id)) => Some(id),
            _ => None,
        }
    }

    pub fn pickup(&self) -> Option<PickupId> {
        match self.occupant {
            Some(Occupant::Pickup(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_seen(&self) -> bool {
        self.visibility_stamp > 0
    }
}

/// Rectangular tile matrix stored row-major.
///
/// Every coordinate query is bounds-checked before indexing; out-of-range
/// coordinates surface as [`GridError::OutOfBounds`] or as "blocked".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled with `kind`.
    pub fn filled(width: u32, height: u32, kind: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(kind); width as usize * height as usize],
        }
    }

    /// Wraps a row-major tile vector. The length must equal `width * height`.
    pub(crate) fn from_tiles(width: u32, height: u32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), width as usize * height as usize);
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Result<usize, GridError> {
        if !self.contains(position) {
            return Err(GridError::OutOfBounds { position });
        }
        Ok(position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn tile_at(&self, position: Position) -> Result<&Tile, GridError> {
        let index = self.index(position)?;
        Ok(&self.tiles[index])
    }

    pub fn tile_mut(&mut self, position: Position) -> Result<&mut Tile, GridError> {
        let index = self.index(position)?;
        Ok(&mut self.tiles[index])
    }

    /// True for out-of-bounds cells, walls, and cells holding a character.
    ///
    /// Pickups do not block: walking onto one collects it.
    pub fn is_blocked(&self, position: Position) -> bool {
        match self.tile_at(position) {
            Ok(tile) => !tile.kind.is_passable() || tile.character().is_some(),
            Err(_) => true,
        }
    }

    /// Stricter variant used by enemies: any occupant blocks.
    pub fn is_blocked_for_enemy(&self, position: Position) -> bool {
        match self.tile_at(position) {
            Ok(tile) => !tile.kind.is_passable() || tile.occupant.is_some(),
            Err(_) => true,
        }
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
