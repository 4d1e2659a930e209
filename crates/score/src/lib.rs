//! High-score persistence.
//!
//! Each game keeps one plain-text file holding a single decimal integer.
//! Loading is infallible by contract: a missing or garbled file means "no
//! score yet". Saving can fail (read-only directory, for example) but a
//! failed save must never disturb the running game, so engines go through
//! [`save_best_effort`] which reports the problem to the operator and moves
//! on.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

/// File name used by the Snake engine, relative to its runtime directory.
pub const SNAKE_SCORE_FILE: &str = "snake_high_score.txt";

/// File name used by the Tetris engine, relative to its runtime directory.
pub const TETRIS_SCORE_FILE: &str = "tetris_high_score.txt";

/// Load a stored high score. Absence or malformed content yields 0.
pub fn load(path: &Path) -> u32 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

/// Overwrite the file with `value`.
pub fn save(path: &Path, value: u32) -> Result<()> {
    fs::write(path, format!("{value}\n"))
        .with_context(|| format!("writing high score to {}", path.display()))
}

/// Save, logging failure instead of propagating it. In-memory state is the
/// caller's and stays untouched either way.
pub fn save_best_effort(path: &Path, value: u32) {
    if let Err(err) = save(path, value) {
        warn!("high score not persisted: {err:#}");
    }
}
