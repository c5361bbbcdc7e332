//! Text frames.
//!
//! The camera window is laid out into a ratatui [`Buffer`] and then flattened
//! to plain text, so the same buffer can back a full terminal UI later.
//!
//! | Cell                         | Glyph              |
//! |------------------------------|--------------------|
//! | unseen                       | space              |
//! | remembered wall / floor      | `%` / `,`          |
//! | visible wall / floor         | `#` / `.`          |
//! | visible player, enemy, gold  | `@`, `1`/`2`, `*`  |

use std::fmt::Write;

use game_core::{
    CharacterKind, CombatEvent, EnemyStepReport, EntityStats, GameEngine, Inspection,
    OccupantSummary, TileKind, TileView, TileVisibility,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::viewport::Viewport;

/// Glyph for one cell as the player currently knows it.
pub fn glyph(view: &TileView) -> char {
    match (view.visibility, view.kind, view.occupant) {
        (TileVisibility::Unseen, _, _) | (_, None, _) => ' ',
        (TileVisibility::Remembered, Some(TileKind::Wall), _) => '%',
        (TileVisibility::Remembered, Some(TileKind::Floor), _) => ',',
        (TileVisibility::Visible, _, Some(OccupantSummary::Player)) => CharacterKind::Player.glyph(),
        (TileVisibility::Visible, _, Some(OccupantSummary::Enemy(kind))) => kind.glyph(),
        (TileVisibility::Visible, _, Some(OccupantSummary::Gold(_))) => '*',
        (TileVisibility::Visible, Some(TileKind::Wall), None) => '#',
        (TileVisibility::Visible, Some(TileKind::Floor), None) => '.',
    }
}

/// Terminal style for one cell.
pub fn style(view: &TileView) -> Style {
    let color = match (view.visibility, view.occupant) {
        (TileVisibility::Unseen, _) => return Style::default(),
        (TileVisibility::Remembered, _) => Color::DarkGray,
        (TileVisibility::Visible, Some(OccupantSummary::Player)) => Color::Yellow,
        (TileVisibility::Visible, Some(OccupantSummary::Enemy(_))) => Color::LightRed,
        (TileVisibility::Visible, Some(OccupantSummary::Gold(_))) => Color::LightYellow,
        (TileVisibility::Visible, None) => Color::Gray,
    };
    Style::default().fg(color)
}

/// Lays the camera window out into a bordered buffer.
pub fn frame_buffer(engine: &GameEngine, viewport: &Viewport) -> Buffer {
    let lines: Vec<Line> = viewport
        .rows()
        .map(|row| {
            Line::from(
                row.map(|position| match engine.tile_view(position.x, position.y) {
                    Ok(view) => Span::styled(glyph(&view).to_string(), style(&view)),
                    Err(_) => Span::raw(" "),
                })
                .collect::<Vec<_>>(),
            )
        })
        .collect();

    let area = Rect::new(0, 0, bordered(viewport.width()), bordered(viewport.height()));
    let mut buffer = Buffer::empty(area);
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .render(area, &mut buffer);
    buffer
}

/// Renders the camera window, one line per row, framed by a border.
pub fn frame(engine: &GameEngine, viewport: &Viewport) -> String {
    buffer_text(&frame_buffer(engine, viewport))
}

/// Flattens a buffer to its symbols, dropping styles.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity((usize::from(area.width) + 1) * usize::from(area.height));
    for y in area.top()..area.bottom() {
        if y > area.top() {
            out.push('\n');
        }
        for x in area.left()..area.right() {
            out.push_str(buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()));
        }
    }
    out
}

fn bordered(span: u32) -> u16 {
    u16::try_from(span.saturating_add(2)).unwrap_or(u16::MAX)
}

/// One-line player summary.
pub fn status_line(stats: &EntityStats) -> String {
    format!(
        "HP {}/{}  Lv {}  XP {}/{}  Gold {}  Moves {}/{}  ATK {}  DEF {}",
        stats.health,
        stats.max_health,
        stats.level.unwrap_or_default(),
        stats.xp,
        stats.target_xp.unwrap_or_default(),
        stats.gold,
        stats.move_remaining,
        stats.speed,
        stats.attack,
        stats.defend,
    )
}

pub fn event_line(event: &CombatEvent) -> String {
    format!("{} {} [{}]", event.position, event.text, event.color.hint())
}

pub fn enemy_step_line(report: &EnemyStepReport) -> String {
    let mut line = format!("enemy step {}:", report.step);
    if report.actions.is_empty() {
        line.push_str(" nobody moves");
    }
    for action in &report.actions {
        let _ = write!(line, " {}={}", action.enemy, action.intent.as_str());
    }
    line
}

/// Sidebar text for an inspected cell.
pub fn inspection(inspection: Option<&Inspection>) -> String {
    let Some(inspection) = inspection else {
        return "Unknown".to_string();
    };
    let mut out = inspection.title();
    for (label, value) in inspection.rows() {
        let _ = write!(out, "\n  {label}: {value}");
    }
    out
}
