#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use log::{debug, info, trace};
use serde::Serialize;

use crate::board::{Board, GimmickTrigger};
use crate::components::{Color, GameState, GimmickKind, Piece, Position, TetrominoType};
use crate::config::GameplayConfig;
use crate::events::GameEvent;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, WALL_KICKS};
use crate::gimmicks::GimmickState;
use crate::rng::RandomSource;
use crate::snapshot::{GameSnapshot, PieceSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SessionState {
    #[default]
    Active,
    Paused,
    GameOver,
}

/// Player and driver commands, one per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Restart,
}

/// One play of the game: board, pieces, scoring and gimmick timers.
///
/// Every command runs to completion before returning, so callers never observe
/// a half-resolved lock. Randomness comes only from the injected `R`.
#[derive(Debug, Clone)]
pub struct GameSession<R: RandomSource = fastrand::Rng> {
    pub(crate) board: Board,
    pub(crate) active_piece: Piece,
    pub(crate) next_piece: Piece,
    pub(crate) game_state: GameState,
    pub(crate) gimmicks: GimmickState,
    pub(crate) state: SessionState,
    pub(crate) drop_timer: f32,
    config: GameplayConfig,
    events: Vec<GameEvent>,
    rng: R,
}

impl GameSession<fastrand::Rng> {
    /// A session with default tuning and a seeded generator.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(crate::rng::seeded(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self::with_config(GameplayConfig::default(), rng)
    }

    #[must_use]
    pub fn with_config(config: GameplayConfig, mut rng: R) -> Self {
        let active_piece = Piece::spawn(&mut rng, None, config.special_chance);
        let next_piece = Piece::spawn(&mut rng, None, config.special_chance);

        Self {
            board: Board::new(BOARD_WIDTH, BOARD_HEIGHT),
            active_piece,
            next_piece,
            game_state: GameState::new(&config),
            gimmicks: GimmickState::new(),
            state: SessionState::Active,
            drop_timer: 0.0,
            config,
            events: Vec::new(),
            rng,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[must_use]
    pub fn gimmicks(&self) -> &GimmickState {
        &self.gimmicks
    }

    #[must_use]
    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.game_state.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.game_state.level
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.game_state.lines_cleared
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Draws a new piece, random kind unless one is given.
    pub fn spawn_piece(&mut self, tetromino_type: Option<TetrominoType>) -> Piece {
        let piece = Piece::spawn(&mut self.rng, tetromino_type, self.config.special_chance);
        debug!(
            "Spawned {:?} piece (gimmick: {:?})",
            piece.tetromino_type, piece.gimmick
        );
        piece
    }

    /// Advances timers by one frame of `delta_seconds`. Does nothing unless active.
    pub fn tick(&mut self, delta_seconds: f32) {
        if self.state != SessionState::Active {
            return;
        }

        self.gimmicks.tick();

        let drop_delay = self.game_state.fall_interval * self.gimmicks.time_scale_factor();
        self.drop_timer += delta_seconds;
        trace!(
            "Drop timer: {}, Drop delay: {}",
            self.drop_timer, drop_delay
        );

        if self.drop_timer > drop_delay {
            self.drop_timer = 0.0;
            self.apply_gravity_step();
        }
    }

    /// Moves the active piece one cell along the current gravity direction.
    pub fn apply_gravity_step(&mut self) {
        let (dx, dy) = self.gimmicks.gravity_direction().offset();
        self.try_move(dx, dy);
    }

    /// Translates the active piece if the target is free. A blocked downward
    /// move locks the piece instead and still counts as success.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.state != SessionState::Active {
            return false;
        }

        if !self.board.would_collide(&self.active_piece, dx, dy) {
            self.active_piece.position = self.active_piece.position.offset(dx, dy);
            return true;
        }

        if dy > 0 {
            self.lock_and_advance();
            return true;
        }

        false
    }

    /// Rotates clockwise, trying the wall kicks in order. Returns `false` and
    /// leaves the piece unchanged when no placement fits.
    pub fn rotate(&mut self) -> bool {
        if self.state != SessionState::Active {
            return false;
        }

        self.active_piece.rotate();
        if !self.board.would_collide(&self.active_piece, 0, 0) {
            return true;
        }

        let kick = WALL_KICKS
            .iter()
            .copied()
            .find(|&dx| !self.board.would_collide(&self.active_piece, dx, 0));

        if let Some(dx) = kick {
            trace!("Rotation wall kick by {dx}");
            self.active_piece.position = self.active_piece.position.offset(dx, 0);
            true
        } else {
            self.active_piece.rotate_back();
            false
        }
    }

    /// Rows the active piece can fall before it would collide, capped at the board height.
    #[must_use]
    pub fn drop_distance(&self) -> i32 {
        let cap = self.board.height as i32;
        let mut distance = 0;
        while distance < cap && !self.board.would_collide(&self.active_piece, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Landing row of the active piece's bounding box, for the ghost preview.
    #[must_use]
    pub fn ghost_row(&self) -> i32 {
        self.active_piece.position.y + self.drop_distance()
    }

    /// Drops the active piece to its resting row and locks it. Returns the distance fallen.
    pub fn hard_drop(&mut self) -> i32 {
        if self.state != SessionState::Active {
            return 0;
        }

        let distance = self.drop_distance();
        self.active_piece.position = self.active_piece.position.offset(0, distance);
        debug!("Hard drop by {distance} rows");
        self.lock_and_advance();
        distance
    }

    /// Locks the active piece, resolves full rows and their gimmicks, then
    /// promotes the next piece. Gimmicks fire top to bottom, left to right.
    pub fn lock_and_advance(&mut self) {
        let piece = self.active_piece;
        if self.board.lock(&piece).game_over {
            info!("Game over with score {}", self.game_state.score);
            self.state = SessionState::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.game_state.score,
            });
            return;
        }

        info!("Locking {:?} piece in place", piece.tetromino_type);
        self.events.push(GameEvent::PieceLocked {
            cells: piece.get_blocks().to_vec(),
            color: piece.color,
            gimmick: piece.gimmick,
        });

        let full_rows = self.board.find_full_rows();
        if !full_rows.is_empty() {
            self.resolve_full_rows(full_rows);
        }

        self.active_piece = self.next_piece;
        self.next_piece = self.spawn_piece(None);
        self.drop_timer = -self.config.lock_grace;
    }

    fn resolve_full_rows(&mut self, full_rows: Vec<usize>) {
        let mut triggers = Vec::new();
        for &y in &full_rows {
            for trigger in self.board.collect_gimmicks(&[y]) {
                // An earlier explosion may already have destroyed this cell
                let Position { x, y: row } = trigger.position;
                if self.board.gimmick(x, row) != Some(trigger.kind) {
                    trace!("Skipping destroyed {:?} cell at ({x}, {row})", trigger.kind);
                    continue;
                }
                self.activate_gimmick(trigger);
                triggers.push(trigger);
            }
        }

        let cells: Vec<(Position, Color)> = full_rows
            .iter()
            .flat_map(|&y| {
                let board = &self.board;
                (0..board.width as i32).filter_map(move |x| {
                    board
                        .get(x, y as i32)
                        .map(|cell| (Position::new(x, y as i32), cell.color))
                })
            })
            .collect();

        self.board.clear_and_compact(&full_rows);

        let cleared = full_rows.len();
        let leveled_up = self.game_state.update_score(cleared, &self.config);
        info!(
            "Cleared {} lines (score: {}, total lines: {})",
            cleared, self.game_state.score, self.game_state.lines_cleared
        );

        self.events.push(GameEvent::RowsCleared {
            rows: full_rows,
            cells,
            gimmicks: triggers,
        });

        if leveled_up {
            info!(
                "Level up to {} (fall interval {:.2}s)",
                self.game_state.level, self.game_state.fall_interval
            );
            self.events.push(GameEvent::LevelUp {
                level: self.game_state.level,
            });
        }
    }

    /// Applies one gimmick triggered from a cleared row.
    pub fn activate_gimmick(&mut self, trigger: GimmickTrigger) {
        let GimmickTrigger { kind, position } = trigger;
        debug!(
            "Activating {:?} gimmick at ({}, {})",
            kind, position.x, position.y
        );

        let duration = self.config.gimmick_duration_ticks;
        match kind {
            GimmickKind::Slowdown => {
                self.gimmicks
                    .activate_time_scale(self.config.slow_factor, duration);
            }
            GimmickKind::Speedup => {
                self.gimmicks
                    .activate_time_scale(self.config.fast_factor, duration);
            }
            GimmickKind::LineExplosion => {
                let destroyed =
                    self.board
                        .clear_area(position.x, position.y, self.config.explosion_radius);
                self.events.extend(
                    destroyed
                        .into_iter()
                        .map(|(position, color)| GameEvent::CellDestroyed { position, color }),
                );
                let bonus = self
                    .config
                    .explosion_bonus
                    .saturating_mul(self.game_state.level);
                self.game_state.add_bonus(bonus);
            }
            GimmickKind::GravityShift => self.gimmicks.shift_gravity(duration),
        }

        self.events
            .push(GameEvent::GimmickActivated { kind, position });
    }

    /// Flips between active and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Active => SessionState::Paused,
            SessionState::Paused => SessionState::Active,
            SessionState::GameOver => SessionState::GameOver,
        };
        debug!("Session state now {:?}", self.state);
    }

    /// Starts a fresh game with the same tuning and random source.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.board.clear();
        self.game_state.reset(&self.config);
        self.gimmicks.reset();
        self.state = SessionState::Active;
        self.drop_timer = 0.0;
        self.events.clear();
        self.active_piece = self.spawn_piece(None);
        self.next_piece = self.spawn_piece(None);
    }

    /// Dispatches a driver command. Returns whether the command took effect.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.try_move(0, 1),
            Command::Rotate => self.rotate(),
            Command::HardDrop => {
                if self.state == SessionState::Active {
                    self.hard_drop();
                    true
                } else {
                    false
                }
            }
            Command::TogglePause => {
                self.toggle_pause();
                self.state != SessionState::GameOver
            }
            Command::Restart => {
                self.restart();
                true
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let rows = 0..self.board.height as i32;
        let cols = 0..self.board.width as i32;

        GameSnapshot {
            width: self.board.width,
            height: self.board.height,
            occupancy: rows
                .clone()
                .map(|y| cols.clone().map(|x| self.board.occupancy(x, y)).collect())
                .collect(),
            colors: rows
                .clone()
                .map(|y| cols.clone().map(|x| self.board.color(x, y)).collect())
                .collect(),
            gimmicks: rows
                .map(|y| cols.clone().map(|x| self.board.gimmick(x, y)).collect())
                .collect(),
            active: PieceSnapshot::from(self.active_piece),
            ghost_y: self.ghost_row(),
            next: PieceSnapshot::from(self.next_piece),
            score: self.game_state.score,
            level: self.game_state.level,
            lines: self.game_state.lines_cleared,
            state: self.state,
            effects: self.gimmicks.summary(),
        }
    }
}
