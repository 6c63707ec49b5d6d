//! Dungeon state: a seeded room grid, the player and a few wandering monsters.
//!
//! The world is strictly turn-based: nothing moves unless the player acts.

use crate::rng::SimpleRng;

/// Map width in tiles.
pub const MAP_WIDTH: i32 = 37;
/// Map height in tiles.
pub const MAP_HEIGHT: i32 = 25;

const ROOM_XS: &[i32] = &[3, 9, 15, 21, 27, 33];
const ROOM_YS: &[i32] = &[3, 9, 15, 21];

/// Where the player starts. Always inside a plain square room.
pub const START: Position = Position { x: 3, y: 3 };
/// The exit tile, centre of the last room.
pub const EXIT: Position = Position { x: 33, y: 21 };

const MONSTER_ATTEMPTS: usize = 64;
/// Messages kept in the log; older ones are discarded.
pub const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|&d| from.step(d) == to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Door,
    Exit,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterKind {
    Defender,
    Hunter,
    Reaper,
}

impl MonsterKind {
    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Defender => "defender",
            MonsterKind::Hunter => "hunter",
            MonsterKind::Reaper => "reaper",
        }
    }

    pub fn ch(self) -> char {
        match self {
            MonsterKind::Defender => 'D',
            MonsterKind::Hunter => 'H',
            MonsterKind::Reaper => 'R',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub pos: Position,
}

/// Something the player can do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Rest,
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoomStyle {
    Square,
    Rounded,
    Diamond,
    Hallway,
    Plus,
    RoundedPlus,
    Corner,
    ExitSquare,
}

const RANDOM_STYLES: [RoomStyle; 7] = [
    RoomStyle::Square,
    RoomStyle::Rounded,
    RoomStyle::Diamond,
    RoomStyle::Hallway,
    RoomStyle::Plus,
    RoomStyle::RoundedPlus,
    RoomStyle::Corner,
];

impl RoomStyle {
    /// 5x5 row-major pattern: `.` floor, `#` wall, `>` exit.
    fn pattern(self) -> &'static [u8; 25] {
        match self {
            RoomStyle::Square => b".........................",
            RoomStyle::Rounded => b"#...#...............#...#",
            RoomStyle::Diamond => b"##.###...#.....#...###.##",
            RoomStyle::Hallway => b"##.####.##.....##.####.##",
            RoomStyle::Plus => b".......#...###...#.......",
            RoomStyle::RoundedPlus => b"#...#..#...###...#..#...#",
            RoomStyle::Corner => b"##..###..#.........###.##",
            RoomStyle::ExitSquare => b"............>............",
        }
    }
}

/// The whole simulation state.
#[derive(Debug, Clone)]
pub struct World {
    tiles: Vec<Tile>,
    pub player: Position,
    pub monsters: Vec<Monster>,
    pub turn: u64,
    pub escaped: bool,
    log: Vec<String>,
    rng: SimpleRng,
}

impl World {
    /// Generate a fresh dungeon. The layout is a pure function of `seed`.
    pub fn generate(seed: u32) -> Self {
        let mut world = Self {
            tiles: vec![Tile::Wall; (MAP_WIDTH * MAP_HEIGHT) as usize],
            player: START,
            monsters: Vec::new(),
            turn: 0,
            escaped: false,
            log: Vec::new(),
            rng: SimpleRng::new(seed),
        };

        for &y in ROOM_YS {
            for &x in ROOM_XS {
                let at = Position::new(x, y);
                let style = if at == START {
                    RoomStyle::Square
                } else if at == EXIT {
                    RoomStyle::ExitSquare
                } else {
                    world
                        .rng
                        .choose(&RANDOM_STYLES)
                        .copied()
                        .unwrap_or(RoomStyle::Square)
                };
                world.place_room(at, style);
                if x > ROOM_XS[0] {
                    world.set_tile(Position::new(x - 3, y), Tile::Door);
                }
                if y > ROOM_YS[0] {
                    world.set_tile(Position::new(x, y - 3), Tile::Door);
                }
            }
        }
        world.set_tile(EXIT, Tile::Exit);

        for _ in 0..MONSTER_ATTEMPTS {
            let pos = Position::new(
                world.rng.range(1, MAP_WIDTH - 2),
                world.rng.range(1, MAP_HEIGHT - 2),
            );
            if world.is_open(pos) && world.tile(pos) == Tile::Floor {
                let kind = match world.rng.next_range(3) {
                    0 => MonsterKind::Defender,
                    1 => MonsterKind::Hunter,
                    _ => MonsterKind::Reaper,
                };
                world.monsters.push(Monster { kind, pos });
            }
        }

        world.message("You wake up inside a quiet server. Find the exit (>).");
        world
    }

    /// Stamp a 5x5 room centred on `at` using one of eight symmetries.
    fn place_room(&mut self, at: Position, style: RoomStyle) {
        let pattern = style.pattern();
        let symmetry = self.rng.next_range(8);
        for y in 0..5i32 {
            for x in 0..5i32 {
                let index = match symmetry {
                    0 => y * 5 + x,
                    1 => y * 5 + (4 - x),
                    2 => (4 - y) * 5 + x,
                    3 => (4 - y) * 5 + (4 - x),
                    4 => x * 5 + y,
                    5 => x * 5 + (4 - y),
                    6 => (4 - x) * 5 + y,
                    _ => (4 - x) * 5 + (4 - y),
                };
                let tile = match pattern[index as usize] {
                    b'.' => Tile::Floor,
                    b'>' => Tile::Exit,
                    _ => Tile::Wall,
                };
                self.set_tile(Position::new(at.x - 2 + x, at.y - 2 + y), tile);
            }
        }
    }

    fn in_bounds(pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < MAP_WIDTH && pos.y < MAP_HEIGHT
    }

    pub fn tile(&self, pos: Position) -> Tile {
        if !Self::in_bounds(pos) {
            return Tile::Wall;
        }
        self.tiles[(pos.y * MAP_WIDTH + pos.x) as usize]
    }

    fn set_tile(&mut self, pos: Position, tile: Tile) {
        if Self::in_bounds(pos) {
            self.tiles[(pos.y * MAP_WIDTH + pos.x) as usize] = tile;
        }
    }

    pub fn monster_at(&self, pos: Position) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.pos == pos)
    }

    /// Walkable and unoccupied.
    pub fn is_open(&self, pos: Position) -> bool {
        self.tile(pos).is_walkable() && self.player != pos && self.monster_at(pos).is_none()
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.log.push(text.into());
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Apply one player action. Returns whether a turn passed.
    pub fn act(&mut self, action: Action) -> bool {
        if self.escaped {
            return false;
        }
        match action {
            Action::Move(dir) => {
                let target = self.player.step(dir);
                if let Some(monster) = self.monster_at(target) {
                    let name = monster.kind.name();
                    self.message(format!("You bump into the {name}."));
                    return false;
                }
                if !self.tile(target).is_walkable() {
                    return false;
                }
                self.player = target;
                if self.tile(target) == Tile::Exit {
                    self.escaped = true;
                    self.message("You slip through the exit. The server goes silent.");
                }
            }
            Action::Rest => self.message("You rest for a moment."),
            Action::Wait => {}
        }
        self.turn += 1;
        self.move_monsters();
        true
    }

    fn move_monsters(&mut self) {
        for i in 0..self.monsters.len() {
            let dir = Direction::ALL[self.rng.next_range(4) as usize];
            let target = self.monsters[i].pos.step(dir);
            if self.is_open(target) && self.tile(target) != Tile::Exit {
                self.monsters[i].pos = target;
            }
        }
    }
}
