pub mod board;
pub mod components;
pub mod config;
pub mod events;
pub mod game;
pub mod gimmicks;
pub mod rng;
pub mod snapshot;
pub mod systems;

#[cfg(test)]
mod tests;

pub use board::{Board, Cell, GimmickTrigger, LockResult};
pub use components::{Color, GimmickKind, Piece, Position, TetrominoType};
pub use events::GameEvent;
pub use gimmicks::{GimmickState, GravityDirection};
pub use rng::RandomSource;
pub use snapshot::GameSnapshot;
pub use systems::{Command, GameSession, SessionState};
