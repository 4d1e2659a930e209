//! Brick-game console (workspace facade crate).
//!
//! Re-exports the `tui_brick::{snake,tetris,score,input,term,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use tui_brick_input as input;
pub use tui_brick_score as score;
pub use tui_brick_snake as snake;
pub use tui_brick_term as term;
pub use tui_brick_tetris as tetris;
pub use tui_brick_types as types;
