#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use serde::Serialize;

use crate::config::GameplayConfig;
use crate::game::{BOARD_WIDTH, STARTING_LEVEL, line_clear_points};
use crate::rng::RandomSource;

/// Block offsets of one rotation state inside the 5x5 bounding box, as (column, row).
pub type Shape = [(i32, i32); 4];

const I_SHAPES: [Shape; 2] = [
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(2, 1), (2, 2), (2, 3), (2, 4)],
];

const J_SHAPES: [Shape; 4] = [
    [(1, 2), (2, 2), (3, 2), (3, 3)],
    [(2, 1), (2, 2), (1, 3), (2, 3)],
    [(1, 2), (1, 3), (2, 3), (3, 3)],
    [(2, 1), (3, 1), (2, 2), (2, 3)],
];

const L_SHAPES: [Shape; 4] = [
    [(1, 2), (2, 2), (3, 2), (1, 3)],
    [(1, 1), (2, 1), (2, 2), (2, 3)],
    [(3, 2), (1, 3), (2, 3), (3, 3)],
    [(2, 1), (2, 2), (2, 3), (3, 3)],
];

const O_SHAPES: [Shape; 1] = [[(1, 2), (2, 2), (1, 3), (2, 3)]];

const S_SHAPES: [Shape; 2] = [
    [(2, 2), (3, 2), (1, 3), (2, 3)],
    [(2, 1), (2, 2), (3, 2), (3, 3)],
];

const T_SHAPES: [Shape; 4] = [
    [(1, 2), (2, 2), (3, 2), (2, 3)],
    [(2, 1), (1, 2), (2, 2), (2, 3)],
    [(2, 2), (1, 3), (2, 3), (3, 3)],
    [(2, 1), (2, 2), (3, 2), (2, 3)],
];

const Z_SHAPES: [Shape; 2] = [
    [(1, 2), (2, 2), (2, 3), (3, 3)],
    [(3, 1), (2, 2), (3, 2), (2, 3)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    #[must_use]
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Board occupancy tag, 1..=7. Zero is reserved for empty cells.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            TetrominoType::I => 1,
            TetrominoType::J => 2,
            TetrominoType::L => 3,
            TetrominoType::O => 4,
            TetrominoType::S => 5,
            TetrominoType::T => 6,
            TetrominoType::Z => 7,
        }
    }

    #[must_use]
    pub fn shapes(self) -> &'static [Shape] {
        match self {
            TetrominoType::I => &I_SHAPES,
            TetrominoType::J => &J_SHAPES,
            TetrominoType::L => &L_SHAPES,
            TetrominoType::O => &O_SHAPES,
            TetrominoType::S => &S_SHAPES,
            TetrominoType::T => &T_SHAPES,
            TetrominoType::Z => &Z_SHAPES,
        }
    }

    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.shapes().len()
    }

    #[must_use]
    pub fn get_color(self) -> Color {
        match self {
            TetrominoType::I => Color::rgb(0, 200, 200),
            TetrominoType::J => Color::rgb(0, 0, 200),
            TetrominoType::L => Color::rgb(200, 150, 0),
            TetrominoType::O => Color::rgb(200, 200, 0),
            TetrominoType::S => Color::rgb(0, 200, 0),
            TetrominoType::T => Color::rgb(200, 0, 200),
            TetrominoType::Z => Color::rgb(200, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Effect carried by the cells of a special piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GimmickKind {
    Slowdown,
    Speedup,
    LineExplosion,
    GravityShift,
}

impl GimmickKind {
    pub const ALL: [GimmickKind; 4] = [
        GimmickKind::Slowdown,
        GimmickKind::Speedup,
        GimmickKind::LineExplosion,
        GimmickKind::GravityShift,
    ];

    #[must_use]
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Index used by the presentation layer's symbol table.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            GimmickKind::Slowdown => 0,
            GimmickKind::Speedup => 1,
            GimmickKind::LineExplosion => 2,
            GimmickKind::GravityShift => 3,
        }
    }

    #[must_use]
    pub fn get_color(self) -> Color {
        match self {
            GimmickKind::Slowdown => Color::rgb(255, 215, 0),
            GimmickKind::Speedup => Color::rgb(255, 0, 255),
            GimmickKind::LineExplosion => Color::rgb(0, 255, 255),
            GimmickKind::GravityShift => Color::rgb(255, 105, 180),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Column of a freshly spawned piece's bounding box.
pub const SPAWN_COLUMN: i32 = (BOARD_WIDTH / 2) as i32 - 2;

/// A falling piece. Always fully initialized; locking copies its cells into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub tetromino_type: TetrominoType,
    pub rotation: usize,
    pub position: Position,
    pub gimmick: Option<GimmickKind>,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub fn new(tetromino_type: TetrominoType) -> Self {
        Self {
            tetromino_type,
            rotation: 0,
            position: Position::new(SPAWN_COLUMN, 0),
            gimmick: None,
            color: tetromino_type.get_color(),
        }
    }

    #[must_use]
    pub fn special(tetromino_type: TetrominoType, gimmick: GimmickKind) -> Self {
        Self {
            gimmick: Some(gimmick),
            color: gimmick.get_color(),
            ..Self::new(tetromino_type)
        }
    }

    /// Spawns a piece at the top of the board. A missing kind is drawn uniformly,
    /// then the special roll decides whether the piece carries a gimmick.
    pub fn spawn<R: RandomSource + ?Sized>(
        rng: &mut R,
        tetromino_type: Option<TetrominoType>,
        special_chance: f32,
    ) -> Self {
        let tetromino_type = tetromino_type.unwrap_or_else(|| TetrominoType::random(rng));
        if rng.chance(special_chance) {
            Self::special(tetromino_type, GimmickKind::random(rng))
        } else {
            Self::new(tetromino_type)
        }
    }

    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        self.gimmick.is_some()
    }

    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        let shapes = self.tetromino_type.shapes();
        &shapes[self.rotation % shapes.len()]
    }

    /// Absolute board coordinates of the piece's four cells.
    #[must_use]
    pub fn get_blocks(&self) -> [Position; 4] {
        (*self.shape()).map(|(col, row)| self.position.offset(col, row))
    }

    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.tetromino_type.rotation_count();
    }

    /// Inverse of [`Piece::rotate`], used to roll back a rejected rotation.
    pub fn rotate_back(&mut self) {
        let count = self.tetromino_type.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }
}

/// Score, level and speed bookkeeping for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub fall_interval: f32,
}

impl GameState {
    #[must_use]
    pub fn new(tuning: &GameplayConfig) -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            lines_cleared: 0,
            fall_interval: tuning.fall_interval_for(STARTING_LEVEL),
        }
    }

    pub fn reset(&mut self, tuning: &GameplayConfig) {
        *self = Self::new(tuning);
    }

    /// Scores a simultaneous clear of `lines_cleared` rows. Returns `true` on level up.
    pub fn update_score(&mut self, lines_cleared: usize, tuning: &GameplayConfig) -> bool {
        if lines_cleared == 0 {
            return false;
        }

        self.add_bonus(line_clear_points(lines_cleared).saturating_mul(self.level));
        self.lines_cleared += u32::try_from(lines_cleared).unwrap_or(u32::MAX);
        self.update_level(tuning)
    }

    pub fn add_bonus(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn update_level(&mut self, tuning: &GameplayConfig) -> bool {
        let level = self.lines_cleared / crate::game::LINES_PER_LEVEL + STARTING_LEVEL;
        if level > self.level {
            self.level = level;
            self.fall_interval = tuning.fall_interval_for(level);
            true
        } else {
            false
        }
    }
}
