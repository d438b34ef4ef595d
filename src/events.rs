#![warn(clippy::all, clippy::pedantic)]

use serde::Serialize;

use crate::board::GimmickTrigger;
use crate::components::{Color, GimmickKind, Position};

/// Things that happened during a command or tick. The presentation layer turns
/// these into particles and sounds; the engine never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PieceLocked {
        cells: Vec<Position>,
        color: Color,
        gimmick: Option<GimmickKind>,
    },
    RowsCleared {
        rows: Vec<usize>,
        cells: Vec<(Position, Color)>,
        gimmicks: Vec<GimmickTrigger>,
    },
    GimmickActivated {
        kind: GimmickKind,
        position: Position,
    },
    CellDestroyed {
        position: Position,
        color: Color,
    },
    LevelUp {
        level: u32,
    },
    GameOver {
        score: u32,
    },
}
