#![warn(clippy::all, clippy::pedantic)]

//! Read-only view of a session for renderers and HUDs.

use serde::Serialize;

use crate::components::{Color, GimmickKind, Piece, Position, TetrominoType};
use crate::gimmicks::GimmickSummary;
use crate::systems::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: TetrominoType,
    pub rotation: usize,
    pub position: Position,
    pub cells: [Position; 4],
    pub color: Color,
    pub gimmick: Option<GimmickKind>,
}

impl From<Piece> for PieceSnapshot {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.tetromino_type,
            rotation: piece.rotation,
            position: piece.position,
            cells: piece.get_blocks(),
            color: piece.color,
            gimmick: piece.gimmick,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major occupancy tags: 0 empty, 1..=7 piece kind.
    pub occupancy: Vec<Vec<u8>>,
    pub colors: Vec<Vec<Color>>,
    pub gimmicks: Vec<Vec<Option<GimmickKind>>>,
    pub active: PieceSnapshot,
    /// Row the active piece would settle at if dropped now.
    pub ghost_y: i32,
    pub next: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub state: SessionState,
    pub effects: GimmickSummary,
}

impl GameSnapshot {
    #[must_use]
    pub fn playable(&self) -> bool {
        self.state == SessionState::Active
    }
}
