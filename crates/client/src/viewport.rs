//! Scrolling camera over the dungeon.
//!
//! The camera scrolls one tile at a time whenever the player leaves the
//! middle band of the view (20% to 80% of each axis) and never scrolls past
//! the map edges.

use game_core::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    offset_x: u32,
    offset_y: u32,
    max_offset_x: u32,
    max_offset_y: u32,
}

impl Viewport {
    /// A `width` x `height` window over a `map_width` x `map_height` map,
    /// anchored at the top-left corner. A view larger than the map shrinks to it.
    pub fn new(width: u32, height: u32, map_width: u32, map_height: u32) -> Self {
        let width = width.clamp(1, map_width.max(1));
        let height = height.clamp(1, map_height.max(1));
        Self {
            width,
            height,
            offset_x: 0,
            offset_y: 0,
            max_offset_x: map_width.saturating_sub(width),
            max_offset_y: map_height.saturating_sub(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map coordinates of the top-left visible cell.
    pub fn offset(&self) -> (u32, u32) {
        (self.offset_x, self.offset_y)
    }

    /// Scrolls at most one tile per axis towards `player`. Returns true if the
    /// camera moved.
    pub fn step(&mut self, player: Position) -> bool {
        let moved_x = scroll_axis(
            &mut self.offset_x,
            player.x,
            self.width,
            self.max_offset_x,
        );
        let moved_y = scroll_axis(
            &mut self.offset_y,
            player.y,
            self.height,
            self.max_offset_y,
        );
        moved_x || moved_y
    }

    /// Scrolls until the player sits inside the margin band or the camera
    /// reaches the map edge.
    pub fn follow(&mut self, player: Position) {
        while self.step(player) {}
    }

    /// Map positions covered by the view, row by row.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Position>> + '_ {
        let (ox, oy) = (self.offset_x as i32, self.offset_y as i32);
        let width = self.width as i32;
        (0..self.height as i32)
            .map(move |row| (0..width).map(move |col| Position::new(ox + col, oy + row)))
    }

}

/// Moves `offset` one tile if `coordinate` sits beyond the 80% line or
/// before the 20% line of a `span`-wide view.
///
/// Scrolling back never lands the coordinate beyond the 80% line, so on views
/// too narrow to have a middle band the camera settles instead of bouncing.
fn scroll_axis(offset: &mut u32, coordinate: i32, span: u32, max_offset: u32) -> bool {
    let relative = i64::from(coordinate) - i64::from(*offset);
    let span = i64::from(span);

    if relative * 5 > span * 4 && *offset < max_offset {
        *offset += 1;
        true
    } else if relative * 5 < span && relative * 5 <= span * 4 - 5 && *offset > 0 {
        *offset -= 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_put_while_player_is_central() {
        let mut view = Viewport::new(10, 10, 30, 35);
        view.follow(Position::new(5, 5));
        assert_eq!(view.offset(), (0, 0));
    }

    #[test]
    fn scrolls_one_tile_per_step() {
        let mut view = Viewport::new(10, 10, 30, 35);
        assert!(view.step(Position::new(12, 0)));
        assert_eq!(view.offset(), (1, 0));

        view.follow(Position::new(12, 0));
        // 12 - 4 = 8 is exactly the 80% line.
        assert_eq!(view.offset(), (4, 0));
    }

    #[test]
    fn scrolls_back_towards_the_origin() {
        let mut view = Viewport::new(10, 10, 30, 35);
        view.follow(Position::new(29, 34));
        assert_eq!(view.offset(), (20, 25));

        view.follow(Position::new(21, 26));
        // 21 - 19 = 2 is exactly the 20% line.
        assert_eq!(view.offset(), (19, 24));
    }

    #[test]
    fn clamps_at_map_edges() {
        let mut view = Viewport::new(10, 10, 12, 12);
        view.follow(Position::new(11, 11));
        assert_eq!(view.offset(), (2, 2));

        let mut tiny = Viewport::new(40, 40, 5, 3);
        assert_eq!((tiny.width(), tiny.height()), (5, 3));
        tiny.follow(Position::new(4, 2));
        assert_eq!(tiny.offset(), (0, 0));
    }

    #[test]
    fn rows_cover_the_window() {
        let view = Viewport::new(3, 2, 10, 10);
        let cells: Vec<Vec<Position>> = view.rows().map(|row| row.collect()).collect();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1][2], Position::new(2, 1));
    }

    #[test]
    fn single_tile_view_settles_on_the_player() {
        let mut view = Viewport::new(1, 5, 10, 10);
        view.follow(Position::new(5, 0));
        assert_eq!(view.offset(), (5, 0));

        view.follow(Position::new(2, 0));
        assert_eq!(view.offset(), (2, 0));

        let mut column = Viewport::new(5, 1, 10, 10);
        column.follow(Position::new(0, 7));
        assert_eq!(column.offset(), (0, 7));
        let cells: Vec<Vec<Position>> = column.rows().map(|row| row.collect()).collect();
        assert!(cells[0].contains(&Position::new(0, 7)));
    }
}
