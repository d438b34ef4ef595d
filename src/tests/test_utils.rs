use std::collections::VecDeque;

use crate::board::{Board, Cell};
use crate::components::{Piece, TetrominoType};
use crate::config::GameplayConfig;
use crate::rng::RandomSource;
use crate::systems::GameSession;

/// Replays scripted answers; falls back to index 0 and no special roll once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    pub indices: VecDeque<usize>,
    pub chances: VecDeque<bool>,
}

impl ScriptedRng {
    #[must_use]
    pub fn new(indices: &[usize], chances: &[bool]) -> Self {
        Self {
            indices: indices.iter().copied().collect(),
            chances: chances.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRng {
    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len
    }

    fn chance(&mut self, _probability: f32) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}

/// A session whose pieces are all plain I pieces.
#[must_use]
pub fn create_test_session() -> GameSession<ScriptedRng> {
    GameSession::with_config(GameplayConfig::default(), ScriptedRng::default())
}

#[must_use]
pub fn cell(tetromino_type: TetrominoType) -> Cell {
    Cell {
        tetromino_type,
        color: tetromino_type.get_color(),
        gimmick: None,
    }
}

/// Fills row `y` except for the listed columns.
pub fn fill_row(board: &mut Board, y: i32, gaps: &[i32]) {
    for x in 0..board.width as i32 {
        if !gaps.contains(&x) {
            board.set(x, y, Some(cell(TetrominoType::O)));
        }
    }
}

/// A vertical I piece whose four cells sit in column `column`, rows 1..=4.
#[must_use]
pub fn vertical_i(column: i32) -> Piece {
    let mut piece = Piece::new(TetrominoType::I).at(column - 2, 0);
    piece.rotate();
    piece
}
