//! Terminal Tetris runner (default binary).
//!
//! Polls crossterm for key events on a short timeout, feeds elapsed wall time
//! into the engine, and redraws after every frame.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_brick::input::{handle_key_event, should_quit};
use tui_brick::term::{GameView, TerminalSession};
use tui_brick::tetris::TetrisGame;
use tui_brick::types::UserAction;

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    env_logger::init();

    let mut term = TerminalSession::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalSession) -> Result<()> {
    let runtime_dir = std::env::current_dir()?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut game = TetrisGame::new(&runtime_dir, seed);
    let view = GameView::new("TETRIS");
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        view.draw(term.stdout(), &game.game_info())?;

        if event::poll(frame)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply(action);
                        if action == UserAction::Terminate {
                            return Ok(());
                        }
                    }
                }
            }
        }

        let elapsed = last_frame.elapsed().as_millis() as u32;
        last_frame = Instant::now();
        game.tick(elapsed);

        if game.finished() {
            // Leave the final board on screen until one more key press.
            view.draw(term.stdout(), &game.game_info())?;
            wait_for_key()?;
            return Ok(());
        }
    }
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
