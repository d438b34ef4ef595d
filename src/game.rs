#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Line clear scoring (level 1 values, multiplied by level)
pub const POINTS_SINGLE: u32 = 100;
pub const POINTS_DOUBLE: u32 = 300;
pub const POINTS_TRIPLE: u32 = 500;
pub const POINTS_TETRIS: u32 = 800;

// Level progression
pub const LINES_PER_LEVEL: u32 = 10;
pub const STARTING_LEVEL: u32 = 1;

// Game timing (seconds)
pub const INITIAL_FALL_INTERVAL: f32 = 0.8;
pub const LEVEL_SPEED_STEP: f32 = 0.05;
pub const MIN_FALL_INTERVAL: f32 = 0.05;
pub const LOCK_GRACE: f32 = 0.3; // Delay before a freshly spawned piece may fall

// Gimmick parameters
pub const SPECIAL_CHANCE: f32 = 0.05; // 5% of spawned pieces carry a gimmick
pub const SLOW_FACTOR: f32 = 1.5;
pub const FAST_FACTOR: f32 = 0.7;
pub const EXPLOSION_RADIUS: usize = 1;
pub const EXPLOSION_BONUS: u32 = 50;
pub const GIMMICK_DURATION_TICKS: u32 = 200;

// Wall kick column offsets tried in order after a blocked rotation
pub const WALL_KICKS: [i32; 4] = [1, -1, 2, -2];

/// Base points for clearing `rows` lines at once, before the level multiplier.
#[must_use]
pub fn line_clear_points(rows: usize) -> u32 {
    match rows {
        1 => POINTS_SINGLE,
        2 => POINTS_DOUBLE,
        3 => POINTS_TRIPLE,
        4 => POINTS_TETRIS,
        _ => 0,
    }
}
