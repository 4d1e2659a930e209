//! The Tetris occupancy grid and its collision/attach/compaction rules.
//!
//! Cells hold color codes; 0 means empty. The grid is a fixed-size value
//! type owned by the engine, so it lives and dies with the game.

use arrayvec::ArrayVec;

use tui_brick_types::{FIELD_HEIGHT, FIELD_WIDTH};

use crate::pieces::Tetromino;

/// 20x10 grid of color codes, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[u8; FIELD_WIDTH]; FIELD_HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[0; FIELD_WIDTH]; FIELD_HEIGHT],
        }
    }

    pub fn cells(&self) -> &[[u8; FIELD_WIDTH]; FIELD_HEIGHT] {
        &self.cells
    }

    pub fn get(&self, row: i8, col: i8) -> Option<u8> {
        if row < 0 || row >= FIELD_HEIGHT as i8 || col < 0 || col >= FIELD_WIDTH as i8 {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    pub fn set(&mut self, row: usize, col: usize, code: u8) {
        if row < FIELD_HEIGHT && col < FIELD_WIDTH {
            self.cells[row][col] = code;
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[0; FIELD_WIDTH]; FIELD_HEIGHT];
    }

    /// Does the piece poke out past the left border?
    pub fn off_left(piece: &Tetromino) -> bool {
        piece.cells().any(|(_, col)| col < 0)
    }

    /// Does the piece poke out past the right border?
    pub fn off_right(piece: &Tetromino) -> bool {
        piece.cells().any(|(_, col)| col > FIELD_WIDTH as i8 - 1)
    }

    /// Does the piece overlap the settled stack or the floor? Columns
    /// outside the board are ignored here; border legality is a separate
    /// check so rotation can clamp against the walls afterwards.
    pub fn hits_stack(&self, piece: &Tetromino) -> bool {
        piece.cells().any(|(row, col)| {
            if row > FIELD_HEIGHT as i8 - 1 {
                return true;
            }
            matches!(self.get(row, col), Some(code) if code != 0)
        })
    }

    /// Full legality check used for spawn and lateral movement: within both
    /// borders, above the floor, and off the settled stack.
    pub fn collides(&self, piece: &Tetromino) -> bool {
        Self::off_left(piece) || Self::off_right(piece) || self.hits_stack(piece)
    }

    /// Permanently stamp the piece's occupied cells with its color.
    pub fn attach(&mut self, piece: &Tetromino) {
        let code = piece.shape.color().code();
        for (row, col) in piece.cells() {
            if row >= 0 && (row as usize) < FIELD_HEIGHT && col >= 0 && (col as usize) < FIELD_WIDTH
            {
                self.cells[row as usize][col as usize] = code;
            }
        }
    }

    fn find_full_row(&self) -> Option<usize> {
        (0..FIELD_HEIGHT).find(|&row| self.cells[row].iter().all(|&code| code != 0))
    }

    /// Drop everything above `row` down by one; row 0 becomes empty and the
    /// cleared row's content is discarded.
    fn shift_down(&mut self, row: usize) {
        for r in (1..=row).rev() {
            self.cells[r] = self.cells[r - 1];
        }
        self.cells[0] = [0; FIELD_WIDTH];
    }

    /// Clear every fully-occupied row, compacting the stack. Returns the
    /// indices of the cleared rows in clearing order (at most 4 with legal
    /// pieces).
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        while let Some(row) = self.find_full_row() {
            self.shift_down(row);
            if cleared.try_push(row).is_err() {
                break;
            }
        }
        cleared
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
