//! Authoritative dungeon state.
//!
//! [`Dungeon`] owns the tile grid together with dense arenas of characters and
//! pickups. Tiles refer to arena slots by index, so moving or removing an
//! entity never leaves a dangling link; the reciprocal position/occupant
//! relation is only ever updated by the methods on [`Dungeon`].
pub mod types;

use tracing::debug;

use crate::config::GameConfig;
use crate::env::StatsOracle;
use crate::error::{GridError, MapError};

pub use types::{
    Character, CharacterId, CharacterKind, Grid, Occupant, Pickup, PickupId, Position,
    Progression, Tile, TileKind, TurnPhase, TurnState,
};

/// What an external consumer may learn about a tile's occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OccupantSummary {
    Player,
    Enemy(CharacterKind),
    Gold(u32),
}

/// Dungeon grid plus every entity living in it.
#[derive(Clone, Debug, PartialEq)]
pub struct Dungeon {
    grid: Grid,
    characters: Vec<Character>,
    pickups: Vec<Option<Pickup>>,
    player: CharacterId,
    /// Live enemies in map-scan order.
    enemies: Vec<CharacterId>,
    gold: u32,
}

impl Dungeon {
    /// Builds a dungeon from equal-width ASCII rows.
    ///
    /// Glyphs: `#` wall, space floor, `@` player start (exactly one), `1` goblin,
    /// `2` orc, `*` gold. Ragged rows, a missing or duplicated player marker and
    /// unknown glyphs are fatal.
    pub fn from_ascii<S>(
        rows: &[S],
        stats: &(impl StatsOracle + ?Sized),
        config: &GameConfig,
    ) -> Result<Self, MapError>
    where
        S: AsRef<str>,
    {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        for (row, line) in rows.iter().enumerate() {
            let actual = line.as_ref().chars().count();
            if actual != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut characters = Vec::new();
        let mut enemies = Vec::new();
        let mut pickups = Vec::new();
        let mut player: Option<(CharacterId, Position)> = None;

        for (y, line) in rows.iter().enumerate() {
            for (x, glyph) in line.as_ref().chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let mut tile = Tile::new(TileKind::Floor);

                match glyph {
                    ' ' => {}
                    '#' => tile.kind = TileKind::Wall,
                    '*' => {
                        let id = PickupId(pickups.len() as u32);
                        pickups.push(Some(Pickup::new(position, config.gold_amount)));
                        tile.occupant = Some(Occupant::Pickup(id));
                    }
                    other => {
                        let kind = CharacterKind::from_glyph(other)
                            .ok_or(MapError::UnknownGlyph { glyph: other, position })?;
                        let id = CharacterId(characters.len() as u32);

                        if kind.is_enemy() {
                            enemies.push(id);
                        } else if let Some((_, first)) = player {
                            return Err(MapError::DuplicatePlayer {
                                first,
                                second: position,
                            });
                        } else {
                            player = Some((id, position));
                        }

                        characters.push(Character::new(
                            kind,
                            position,
                            stats.stats_for(kind),
                            config,
                        ));
                        tile.occupant = Some(Occupant::Character(id));
                    }
                }

                tiles.push(tile);
            }
        }

        let (player, _) = player.ok_or(MapError::MissingPlayer)?;

        debug!(
            width,
            height = rows.len(),
            enemies = enemies.len(),
            pickups = pickups.len(),
            "dungeon built from ascii map"
        );

        let dungeon = Self {
            grid: Grid::from_tiles(width as u32, rows.len() as u32, tiles),
            characters,
            pickups,
            player,
            enemies,
            gold: 0,
        };
        dungeon.debug_assert_consistent();
        Ok(dungeon)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn tile_at(&self, position: Position) -> Result<&Tile, GridError> {
        self.grid.tile_at(position)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.grid.is_blocked(position)
    }

    pub fn player_id(&self) -> CharacterId {
        self.player
    }

    pub fn player(&self) -> &Character {
        &self.characters[self.player.index()]
    }

    pub fn player_mut(&mut self) -> &mut Character {
        &mut self.characters[self.player.index()]
    }

    /// Gold collected by the player so far.
    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.index())
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.index())
    }

    /// All characters ever placed, dead ones included, with their ids.
    pub fn characters(&self) -> impl Iterator<Item = (CharacterId, &Character)> + '_ {
        self.characters
            .iter()
            .enumerate()
            .map(|(index, character)| (CharacterId(index as u32), character))
    }

    /// Ids of enemies still alive, in map-scan order.
    pub fn live_enemies(&self) -> &[CharacterId] {
        &self.enemies
    }

    pub fn pickup(&self, id: PickupId) -> Option<&Pickup> {
        self.pickups.get(id.index()).and_then(Option::as_ref)
    }

    /// Live pickups with their ids.
    pub fn pickups(&self) -> impl Iterator<Item = (PickupId, &Pickup)> + '_ {
        self.pickups
            .iter()
            .enumerate()
            .filter_map(|(index, pickup)| pickup.as_ref().map(|p| (PickupId(index as u32), p)))
    }

    pub fn character_at(&self, position: Position) -> Option<CharacterId> {
        self.grid.tile_at(position).ok()?.character()
    }

    pub fn enemy_at(&self, position: Position) -> Option<CharacterId> {
        self.character_at(position)
            .filter(|id| self.character(*id).is_some_and(Character::is_enemy))
    }

    pub fn occupant_summary(&self, position: Position) -> Option<OccupantSummary> {
        match self.grid.tile_at(position).ok()?.occupant? {
            Occupant::Character(id) => {
                let character = self.character(id)?;
                Some(if character.is_enemy() {
                    OccupantSummary::Enemy(character.kind)
                } else {
                    OccupantSummary::Player
                })
            }
            Occupant::Pickup(id) => self.pickup(id).map(|p| OccupantSummary::Gold(p.amount)),
        }
    }

    /// Moves a character to `to`, updating both the tiles and the stored coordinates.
    ///
    /// The player collects a pickup standing on the destination; the amount is
    /// returned. Walls, other characters and, for enemies, pickups are refused.
    pub fn move_character(&mut self, id: CharacterId, to: Position) -> Result<Option<u32>, GridError> {
        let Some(character) = self.characters.get(id.index()) else {
            return Err(GridError::MissingCharacter { id });
        };
        let from = character.position;
        let is_enemy = character.is_enemy();

        let destination = self.grid.tile_at(to)?;
        if !destination.kind.is_passable() {
            return Err(GridError::Wall { position: to });
        }
        let collected = match destination.occupant {
            None => None,
            Some(Occupant::Pickup(pickup)) if !is_enemy => Some(pickup),
            Some(_) => return Err(GridError::Occupied { position: to }),
        };

        debug_assert_eq!(
            self.grid.tile_at(from).ok().and_then(Tile::character),
            Some(id),
            "character {id} is not recorded at its own position {from}"
        );

        let amount = collected.and_then(|pickup| self.take_pickup(pickup));
        if let Some(amount) = amount {
            self.gold = self.gold.saturating_add(amount);
        }

        self.grid.tile_mut(from)?.occupant = None;
        self.grid.tile_mut(to)?.occupant = Some(Occupant::Character(id));
        self.characters[id.index()].position = to;

        Ok(amount)
    }

    /// Removes a dead character from its tile and from the live-enemy list.
    pub fn remove_character(&mut self, id: CharacterId) {
        let Some(character) = self.characters.get_mut(id.index()) else {
            return;
        };
        let position = character.position;
        character.mark_dead();

        if let Ok(tile) = self.grid.tile_mut(position) {
            if tile.character() == Some(id) {
                tile.occupant = None;
            }
        }
        self.enemies.retain(|enemy| *enemy != id);
    }

    /// Places a new gold pickup on an empty floor tile.
    pub fn place_pickup(&mut self, position: Position, amount: u32) -> Result<PickupId, GridError> {
        let tile = self.grid.tile_at(position)?;
        if !tile.kind.is_passable() {
            return Err(GridError::Wall { position });
        }
        if tile.occupant.is_some() {
            return Err(GridError::Occupied { position });
        }

        let id = PickupId(self.pickups.len() as u32);
        self.pickups.push(Some(Pickup::new(position, amount)));
        self.grid.tile_mut(position)?.occupant = Some(Occupant::Pickup(id));
        Ok(id)
    }

    /// Removes a pickup from the dungeon, returning it.
    pub fn remove_pickup(&mut self, id: PickupId) -> Option<Pickup> {
        let pickup = self.pickups.get_mut(id.index())?.take()?;
        if let Ok(tile) = self.grid.tile_mut(pickup.position) {
            if tile.pickup() == Some(id) {
                tile.occupant = None;
            }
        }
        Some(pickup)
    }

    fn take_pickup(&mut self, id: PickupId) -> Option<u32> {
        self.remove_pickup(id).map(|pickup| pickup.amount)
    }

    /// Checks the reciprocal grid/character relation in debug builds.
    pub fn debug_assert_consistent(&self) {
        #[cfg(debug_assertions)]
        {
            for (id, character) in self.characters() {
                let recorded = self
                    .grid
                    .tile_at(character.position)
                    .ok()
                    .and_then(Tile::character);
                if character.is_alive() {
                    debug_assert_eq!(recorded, Some(id), "{id} missing from its tile");
                } else {
                    debug_assert_ne!(recorded, Some(id), "dead {id} still on the grid");
                }
            }
            for position in self.grid.positions() {
                if let Ok(tile) = self.grid.tile_at(position) {
                    debug_assert!(
                        tile.kind.is_passable() || tile.occupant.is_none(),
                        "wall at {position} holds an occupant"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StatTable;

    fn build(rows: &[&str]) -> Result<Dungeon, MapError> {
        Dungeon::from_ascii(rows, &StatTable::default(), &GameConfig::default())
    }

    #[test]
    fn parses_entities_from_glyphs() {
        let dungeon = build(&["#####", "#@1*#", "# 2 #", "#####"]).unwrap();

        assert_eq!(dungeon.width(), 5);
        assert_eq!(dungeon.height(), 4);
        assert_eq!(dungeon.player().position(), Position::new(1, 1));
        assert_eq!(dungeon.live_enemies().len(), 2);
        assert_eq!(
            dungeon.occupant_summary(Position::new(2, 1)),
            Some(OccupantSummary::Enemy(CharacterKind::Goblin))
        );
        assert_eq!(
            dungeon.occupant_summary(Position::new(2, 2)),
            Some(OccupantSummary::Enemy(CharacterKind::Orc))
        );
        assert_eq!(
            dungeon.occupant_summary(Position::new(3, 1)),
            Some(OccupantSummary::Gold(25))
        );
        assert_eq!(
            dungeon.tile_at(Position::ORIGIN).unwrap().kind,
            TileKind::Wall
        );
    }

    #[test]
    fn rejects_malformed_maps() {
        assert_eq!(build(&[]), Err(MapError::Empty));
        assert_eq!(
            build(&["@  ", "  "]),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(build(&["  1"]), Err(MapError::MissingPlayer));
        assert_eq!(
            build(&["@ @"]),
            Err(MapError::DuplicatePlayer {
                first: Position::new(0, 0),
                second: Position::new(2, 0)
            })
        );
        assert_eq!(
            build(&["@ x"]),
            Err(MapError::UnknownGlyph {
                glyph: 'x',
                position: Position::new(2, 0)
            })
        );
    }

    #[test]
    fn move_keeps_tile_and_position_in_sync() {
        let mut dungeon = build(&["@  "]).unwrap();
        let player = dungeon.player_id();

        assert_eq!(dungeon.move_character(player, Position::new(1, 0)), Ok(None));
        assert_eq!(dungeon.player().position(), Position::new(1, 0));
        assert_eq!(dungeon.character_at(Position::new(1, 0)), Some(player));
        assert_eq!(dungeon.character_at(Position::ORIGIN), None);
        dungeon.debug_assert_consistent();
    }

    #[test]
    fn player_collects_gold_on_contact() {
        let mut dungeon = build(&["@* "]).unwrap();
        let player = dungeon.player_id();

        assert_eq!(
            dungeon.move_character(player, Position::new(1, 0)),
            Ok(Some(25))
        );
        assert_eq!(dungeon.gold(), 25);
        assert_eq!(dungeon.pickups().count(), 0);
        assert_eq!(dungeon.character_at(Position::new(1, 0)), Some(player));
    }

    #[test]
    fn enemies_cannot_step_on_pickups_or_walls() {
        let mut dungeon = build(&["@1*#"]).unwrap();
        let goblin = dungeon.live_enemies()[0];

        assert_eq!(
            dungeon.move_character(goblin, Position::new(2, 0)),
            Err(GridError::Occupied {
                position: Position::new(2, 0)
            })
        );
        assert_eq!(
            dungeon.move_character(goblin, Position::new(0, 0)),
            Err(GridError::Occupied {
                position: Position::new(0, 0)
            })
        );
        assert_eq!(
            dungeon.move_character(goblin, Position::new(1, 1)),
            Err(GridError::OutOfBounds {
                position: Position::new(1, 1)
            })
        );
        assert_eq!(dungeon.character(goblin).unwrap().position(), Position::new(1, 0));
    }

    #[test]
    fn removing_a_character_clears_tile_and_enemy_list() {
        let mut dungeon = build(&["@ 1"]).unwrap();
        let goblin = dungeon.live_enemies()[0];

        dungeon.remove_character(goblin);
        assert!(dungeon.live_enemies().is_empty());
        assert_eq!(dungeon.character_at(Position::new(2, 0)), None);
        assert!(!dungeon.character(goblin).unwrap().is_alive());
        dungeon.debug_assert_consistent();
    }

    #[test]
    fn pickups_can_be_placed_and_removed() {
        let mut dungeon = build(&["@ #"]).unwrap();

        assert_eq!(
            dungeon.place_pickup(Position::new(2, 0), 5),
            Err(GridError::Wall {
                position: Position::new(2, 0)
            })
        );
        let id = dungeon.place_pickup(Position::new(1, 0), 5).unwrap();
        assert_eq!(dungeon.pickup(id).map(Pickup::name), Some("Gold: 5".to_string()));
        assert_eq!(dungeon.remove_pickup(id).map(|p| p.amount), Some(5));
        assert_eq!(dungeon.remove_pickup(id), None);
        assert!(!dungeon.is_blocked(Position::new(1, 0)));
    }
}
