//! Built-in dungeon layouts.

/// The default 30 x 35 dungeon.
///
/// `#` wall, space floor, `@` player start, `1` goblin, `2` orc, `*` gold.
pub const DEFAULT_DUNGEON: &[&str] = &[
    "      ########################",
    "                             #",
    "      #                      #",
    "      ###################### #",
    "      #                      #",
    "      # #*       ########### #",
    "      #          #         # #",
    "#######      #   #         # #",
    "    @            #         # #",
    "                 #         # #",
    "#######  #       #         # #",
    "      #          #         # #",
    "      #   1      # ####### # #",
    "      #          #       #   #",
    "      ######  ########## #####",
    "           #  #        #     #",
    "           #  #        ##### #",
    "           #  #            # #",
    "           #  #            # #",
    "############  #######      # #",
    "#         2         #      # #",
    "#     # # # # #     #      # #",
    "#     # # # # #   # #      # #",
    "#                   #      # #",
    "#                   ######## #",
    "#         ####               #",
    "#               ############ #",
    "#               #          # #",
    "#################          # #",
    "      #       #              #",
    "      #       #              #",
    "      #       #              #",
    "      #                      #",
    "      #                      #",
    "      ########################",
];

#[cfg(test)]
mod tests {
    use game_core::{CharacterKind, Dungeon, GameConfig, Position, StatTable};

    use super::*;

    #[test]
    fn default_dungeon_is_rectangular() {
        assert_eq!(DEFAULT_DUNGEON.len(), 35);
        assert!(DEFAULT_DUNGEON.iter().all(|row| row.chars().count() == 30));
    }

    #[test]
    fn default_dungeon_builds() {
        let dungeon =
            Dungeon::from_ascii(DEFAULT_DUNGEON, &StatTable::default(), &GameConfig::default())
                .unwrap();

        assert_eq!(dungeon.width(), 30);
        assert_eq!(dungeon.height(), 35);
        assert_eq!(dungeon.player().position(), Position::new(4, 8));
        assert_eq!(dungeon.pickups().count(), 1);

        let kinds: Vec<CharacterKind> = dungeon
            .live_enemies()
            .iter()
            .filter_map(|id| dungeon.character(*id).map(|c| c.kind))
            .collect();
        assert_eq!(kinds, vec![CharacterKind::Goblin, CharacterKind::Orc]);
    }
}
