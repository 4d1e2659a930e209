//! Tetris engine.
//!
//! Pure game logic: the occupancy grid, the seven tetrominoes and the
//! spawn/move/rotate/attach/line-clear state machine. No I/O besides the
//! high-score file, no rendering.

pub mod board;
pub mod game;
pub mod pieces;

pub use board::Board;
pub use game::{TetrisGame, TetrisState, BASE_DROP_MS, DROP_STEP_MS, ROW_SCORES};
pub use pieces::{Shape, Tetromino, ALL_SHAPES};
