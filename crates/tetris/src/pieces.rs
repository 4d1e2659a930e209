//! Tetromino shapes, rotation masks and random generation.
//!
//! Each shape carries one 4x4 binary mask per rotation state. Rotation is a
//! plain index into that table (no wall kicks); the symmetric square has one
//! state, I/S/Z have two, T/L/J have four. Only mask cells ever collide or
//! attach.

use tui_brick_types::{Color, SimpleRng, FIELD_WIDTH, PREVIEW_SIZE};

/// One rotation state: 4x4 occupancy, 1 = filled.
pub type Mask = [[u8; PREVIEW_SIZE]; PREVIEW_SIZE];

/// The seven classical shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    I,
    S,
    Z,
    T,
    L,
    J,
    O,
}

pub const ALL_SHAPES: [Shape; 7] = [
    Shape::I,
    Shape::S,
    Shape::Z,
    Shape::T,
    Shape::L,
    Shape::J,
    Shape::O,
];

const I_MASKS: [Mask; 2] = [
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
];

const S_MASKS: [Mask; 2] = [
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const Z_MASKS: [Mask; 2] = [
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
];

const T_MASKS: [Mask; 4] = [
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const L_MASKS: [Mask; 4] = [
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
];

const J_MASKS: [Mask; 4] = [
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [1, 0, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
];

const O_MASKS: [Mask; 1] = [[[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]];

impl Shape {
    /// Rotation masks in rotation-index order.
    pub fn masks(self) -> &'static [Mask] {
        match self {
            Shape::I => &I_MASKS,
            Shape::S => &S_MASKS,
            Shape::Z => &Z_MASKS,
            Shape::T => &T_MASKS,
            Shape::L => &L_MASKS,
            Shape::J => &J_MASKS,
            Shape::O => &O_MASKS,
        }
    }

    /// Number of distinct rotation states.
    pub fn rotation_count(self) -> usize {
        self.masks().len()
    }

    pub fn color(self) -> Color {
        match self {
            Shape::I => Color::Cyan,
            Shape::S => Color::Green,
            Shape::Z => Color::Red,
            Shape::T => Color::Magenta,
            Shape::L => Color::White,
            Shape::J => Color::Blue,
            Shape::O => Color::Yellow,
        }
    }

    /// Draw a shape uniformly at random.
    pub fn random(rng: &mut SimpleRng) -> Self {
        ALL_SHAPES[rng.next_range(ALL_SHAPES.len() as u32) as usize]
    }
}

/// A falling piece: shape identity, rotation index and the board-relative
/// anchor of the mask's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub shape: Shape,
    pub rotation: usize,
    pub row: i8,
    pub col: i8,
}

impl Tetromino {
    /// New piece at the spawn anchor: row 0, horizontally centered.
    pub fn spawn(shape: Shape) -> Self {
        Self {
            shape,
            rotation: 0,
            row: 0,
            col: FIELD_WIDTH as i8 / 2 - 1,
        }
    }

    /// The mask for the current rotation state.
    pub fn mask(&self) -> &'static Mask {
        &self.shape.masks()[self.rotation]
    }

    /// Board coordinates of every occupied mask cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let mask = self.mask();
        (0..PREVIEW_SIZE).flat_map(move |i| {
            (0..PREVIEW_SIZE).filter_map(move |j| {
                (mask[i][j] != 0).then(|| (self.row + i as i8, self.col + j as i8))
            })
        })
    }

    /// Copy with the rotation index advanced by one, wrapping around.
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % self.shape.rotation_count(),
            ..*self
        }
    }

    /// Copy shifted by whole cells.
    pub fn shifted(&self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }
}
