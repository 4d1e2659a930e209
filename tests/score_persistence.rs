//! High-score file contract, exercised through the facade.

use std::fs;

use tempfile::tempdir;

use tui_brick::score::{load, save, SNAKE_SCORE_FILE, TETRIS_SCORE_FILE};
use tui_brick::snake::SnakeGame;

#[test]
fn missing_file_means_zero() {
    let dir = tempdir().unwrap();
    assert_eq!(load(&dir.path().join(SNAKE_SCORE_FILE)), 0);
}

#[test]
fn garbage_content_means_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(TETRIS_SCORE_FILE);
    fs::write(&path, "not a number\n").unwrap();
    assert_eq!(load(&path), 0);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SNAKE_SCORE_FILE);
    save(&path, 4242).unwrap();
    assert_eq!(load(&path), 4242);

    // Overwrite, not append.
    save(&path, 7).unwrap();
    assert_eq!(load(&path), 7);
}

#[test]
fn engines_read_their_own_files() {
    let dir = tempdir().unwrap();
    save(&dir.path().join(SNAKE_SCORE_FILE), 55).unwrap();

    let game = SnakeGame::new(dir.path(), 1);
    assert_eq!(game.high_score(), 55);

    // The two games keep separate files.
    assert_eq!(load(&dir.path().join(TETRIS_SCORE_FILE)), 0);
}

#[test]
fn unwritable_path_reports_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-subdir").join(SNAKE_SCORE_FILE);
    assert!(save(&path, 1).is_err());
}
