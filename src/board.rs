#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use log::{debug, trace};
use serde::Serialize;

use crate::components::{Color, GimmickKind, Piece, Position, TetrominoType};

/// A settled cell. The gimmick tag is only present on cells that came from a special piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub tetromino_type: TetrominoType,
    pub color: Color,
    pub gimmick: Option<GimmickKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockResult {
    pub game_over: bool,
}

/// A gimmick-tagged cell found in a full row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GimmickTrigger {
    pub kind: GimmickKind,
    pub position: Position,
}

/// The grid of settled cells, stored row-major (`cells[y][x]`) with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<Option<Cell>>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(None);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some((x as usize, y as usize))
        }
    }

    /// The settled cell at `(x, y)`, or `None` when empty or off the board.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).and_then(|(x, y)| self.cells[y][x])
    }

    /// Writes a cell directly. Returns `false` when `(x, y)` is off the board.
    pub fn set(&mut self, x: i32, y: i32, cell: Option<Cell>) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.cells[y][x] = cell;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Occupancy tag: 0 for empty, otherwise the piece kind's tag.
    #[must_use]
    pub fn occupancy(&self, x: i32, y: i32) -> u8 {
        self.get(x, y).map_or(0, |cell| cell.tetromino_type.tag())
    }

    #[must_use]
    pub fn color(&self, x: i32, y: i32) -> Color {
        self.get(x, y).map_or(Color::BLACK, |cell| cell.color)
    }

    #[must_use]
    pub fn gimmick(&self, x: i32, y: i32) -> Option<GimmickKind> {
        self.get(x, y).and_then(|cell| cell.gimmick)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_some()).count())
            .sum()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<Cell>>] {
        &self.cells
    }

    /// Whether `piece` translated by `(dx, dy)` would leave the board or overlap a settled cell.
    /// Cells above the top edge only collide with the side walls.
    #[must_use]
    pub fn would_collide(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.get_blocks().iter().any(|block| {
            let x = block.x + dx;
            let y = block.y + dy;

            if x < 0 || x as usize >= self.width || y >= self.height as i32 {
                return true;
            }

            y >= 0 && self.is_occupied(x, y)
        })
    }

    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        !self.would_collide(piece, 0, 0)
    }

    /// Merges `piece` into the grid. A piece reaching above the top edge, or one
    /// overlapping settled cells, cannot be placed: the board is left untouched.
    pub fn lock(&mut self, piece: &Piece) -> LockResult {
        let blocks = piece.get_blocks();

        if blocks.iter().any(|block| block.y < 0) {
            debug!("Piece locked above the visible board");
            return LockResult { game_over: true };
        }

        if blocks
            .iter()
            .any(|block| self.index(block.x, block.y).is_none() || self.is_occupied(block.x, block.y))
        {
            debug!("Piece locked over settled cells");
            return LockResult { game_over: true };
        }

        let cell = Cell {
            tetromino_type: piece.tetromino_type,
            color: piece.color,
            gimmick: piece.gimmick,
        };
        for block in blocks {
            self.set(block.x, block.y, Some(cell));
        }

        LockResult::default()
    }

    /// Indices of completely filled rows, top to bottom.
    #[must_use]
    pub fn find_full_rows(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(Option::is_some))
            .map(|(y, _)| y)
            .collect()
    }

    /// Gimmick-tagged cells in `rows`, ordered top to bottom then left to right.
    /// Must run before [`Board::clear_and_compact`], which discards the tags.
    #[must_use]
    pub fn collect_gimmicks(&self, rows: &[usize]) -> Vec<GimmickTrigger> {
        let mut rows = rows.to_vec();
        rows.sort_unstable();
        rows.dedup();

        rows.into_iter()
            .filter(|&y| y < self.height)
            .flat_map(|y| {
                self.cells[y].iter().enumerate().filter_map(move |(x, cell)| {
                    cell.and_then(|cell| cell.gimmick).map(|kind| GimmickTrigger {
                        kind,
                        position: Position::new(x as i32, y as i32),
                    })
                })
            })
            .collect()
    }

    /// Removes `rows` simultaneously: surviving rows keep their order and settle
    /// at the bottom, freed rows at the top are empty.
    pub fn clear_and_compact(&mut self, rows: &[usize]) {
        let width = self.width;
        let mut survivors: Vec<Vec<Option<Cell>>> = self
            .cells
            .drain(..)
            .enumerate()
            .filter(|(y, _)| !rows.contains(y))
            .map(|(_, row)| row)
            .collect();

        let removed = self.height - survivors.len();
        trace!("Compacting board after removing {removed} rows");

        let mut cells = vec![vec![None; width]; removed];
        cells.append(&mut survivors);
        self.cells = cells;
    }

    /// Clears every occupied cell within Chebyshev distance `radius` of the center
    /// and returns the destroyed cells with their colors.
    pub fn clear_area(&mut self, center_x: i32, center_y: i32, radius: usize) -> Vec<(Position, Color)> {
        // Any radius past the board span already covers every cell
        let span = self.width.max(self.height);
        let radius = i32::try_from(radius.min(span)).unwrap_or(i32::MAX);
        let mut destroyed = Vec::new();

        for y in center_y.saturating_sub(radius)..=center_y.saturating_add(radius) {
            for x in center_x.saturating_sub(radius)..=center_x.saturating_add(radius) {
                if let Some(cell) = self.get(x, y) {
                    self.set(x, y, None);
                    destroyed.push((Position::new(x, y), cell.color));
                }
            }
        }

        destroyed
    }
}
