//! Draws a [`World`] into the virtual terminal.

use crate::terminal::{BaseColor, Color, ColorPair, VirtualTerminal};
use crate::world::{Position, Tile, World, MAP_HEIGHT, MAP_WIDTH};

/// Rows reserved for the message log, including its title row.
pub const LOG_HEIGHT: u16 = 8;
/// First row of the map.
pub const MAP_TOP: i32 = 1;
/// First column of the side panel.
pub const PANEL_LEFT: i32 = MAP_WIDTH + 2;

pub const HEADER: &str = " glyph-loop | arrows: move  .: rest  w: wait  click: step  wheel: scroll log";

const HEADER_COLORS: ColorPair =
    ColorPair::new(Color::Light(BaseColor::White), Color::Dark(BaseColor::Blue));
const WALL_COLORS: ColorPair =
    ColorPair::new(Color::Dark(BaseColor::Black), Color::Dark(BaseColor::White));
const FLOOR_COLORS: ColorPair =
    ColorPair::new(Color::Dark(BaseColor::White), Color::TerminalDefault);
const DOOR_COLORS: ColorPair =
    ColorPair::new(Color::Dark(BaseColor::Yellow), Color::TerminalDefault);
const EXIT_COLORS: ColorPair =
    ColorPair::new(Color::Light(BaseColor::Green), Color::TerminalDefault);
const PLAYER_COLORS: ColorPair =
    ColorPair::new(Color::Light(BaseColor::White), Color::TerminalDefault);
const PANEL_COLORS: ColorPair =
    ColorPair::new(Color::Dark(BaseColor::Cyan), Color::TerminalDefault);
const TEXT_COLORS: ColorPair = ColorPair::DEFAULT;

/// Screen row where the log panel starts for a terminal `height` rows tall.
pub fn log_top(height: u16) -> i32 {
    height.saturating_sub(LOG_HEIGHT) as i32
}

/// Map coordinates under screen cell (x, y), if any.
pub fn screen_to_map(x: u16, y: u16) -> Option<Position> {
    let pos = Position::new(x as i32, y as i32 - MAP_TOP);
    (pos.x < MAP_WIDTH && pos.y >= 0 && pos.y < MAP_HEIGHT).then_some(pos)
}

/// Full redraw of the screen.
pub fn draw(term: &mut VirtualTerminal, world: &World, seed: u32, log_scroll: usize) {
    let size = term.size();
    term.clear(Color::TerminalDefault);

    for x in 0..size.width as i32 {
        term.put(x, 0, ' ', HEADER_COLORS);
    }
    term.print(0, 0, HEADER, HEADER_COLORS);

    for y in 0..MAP_HEIGHT {
        for x in 0..MAP_WIDTH {
            let (ch, colors) = match world.tile(Position::new(x, y)) {
                Tile::Wall => ('#', WALL_COLORS),
                Tile::Floor => ('.', FLOOR_COLORS),
                Tile::Door => ('+', DOOR_COLORS),
                Tile::Exit => ('>', EXIT_COLORS),
            };
            term.put(x, y + MAP_TOP, ch, colors);
        }
    }
    for monster in &world.monsters {
        let colors = ColorPair::new(monster_color(monster.kind), Color::TerminalDefault);
        term.put(monster.pos.x, monster.pos.y + MAP_TOP, monster.kind.ch(), colors);
    }
    term.put(world.player.x, world.player.y + MAP_TOP, '@', PLAYER_COLORS);

    let panel = [
        format!("seed {seed}"),
        format!("turn {}", world.turn),
        format!("pos {},{}", world.player.x, world.player.y),
        format!("monsters {}", world.monsters.len()),
    ];
    for (i, line) in panel.iter().enumerate() {
        term.print(PANEL_LEFT, MAP_TOP + 1 + i as i32, line, PANEL_COLORS);
    }
    if world.escaped {
        term.print(PANEL_LEFT, MAP_TOP + 6, "ESCAPED", EXIT_COLORS);
    }

    draw_log(term, world.log(), log_scroll);
}

fn draw_log(term: &mut VirtualTerminal, log: &[String], scroll: usize) {
    let size = term.size();
    let top = log_top(size.height);
    for x in 0..size.width as i32 {
        term.put(x, top, '─', PANEL_COLORS);
    }
    term.print(1, top, " Log ", PANEL_COLORS);
    for y in top + 1..size.height as i32 {
        for x in 0..size.width as i32 {
            term.put(x, y, ' ', TEXT_COLORS);
        }
    }

    let rows = LOG_HEIGHT.saturating_sub(1) as usize;
    let end = log.len().saturating_sub(scroll);
    let start = end.saturating_sub(rows);
    for (i, line) in log[start..end].iter().enumerate() {
        term.print(1, top + 1 + i as i32, line, TEXT_COLORS);
    }
}

fn monster_color(kind: crate::world::MonsterKind) -> Color {
    use crate::world::MonsterKind;

    match kind {
        MonsterKind::Defender => Color::Light(BaseColor::Cyan),
        MonsterKind::Hunter => Color::Light(BaseColor::Yellow),
        MonsterKind::Reaper => Color::Light(BaseColor::Red),
    }
}

/// Largest useful log scroll offset.
pub fn max_log_scroll(log_len: usize) -> usize {
    log_len.saturating_sub(LOG_HEIGHT.saturating_sub(1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_loop_types::GridSize;

    fn row(term: &VirtualTerminal, y: u16) -> String {
        (0..term.size().width)
            .map(|x| term.cell(x, y).glyph_char())
            .collect()
    }

    #[test]
    fn header_player_and_log_title_are_drawn() {
        let mut term = VirtualTerminal::new();
        term.resize(GridSize::new(80, 36));
        let world = World::generate(1);
        draw(&mut term, &world, 1, 0);

        assert!(row(&term, 0).starts_with(" glyph-loop |"));
        assert_eq!(term.cell(3, 4).glyph_char(), '@');
        assert!(row(&term, 28).starts_with("─ Log ─"));
        assert!(row(&term, 29).contains("You wake up"));
    }

    #[test]
    fn screen_to_map_skips_header_row() {
        assert_eq!(screen_to_map(3, 4), Some(Position::new(3, 3)));
        assert_eq!(screen_to_map(3, 0), None);
        assert_eq!(screen_to_map(MAP_WIDTH as u16, 4), None);
    }

    #[test]
    fn scroll_offset_shows_older_lines() {
        let mut term = VirtualTerminal::new();
        term.resize(GridSize::new(40, 10));
        let log: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();

        draw_log(&mut term, &log, 0);
        assert!(row(&term, 9).starts_with(" line 19"));

        draw_log(&mut term, &log, max_log_scroll(log.len()));
        assert!(row(&term, 3).starts_with(" line 0 "));
    }
}
