//! The Tetris state machine.
//!
//! States: Start, Spawn, Moving, Attaching, GameOver, Paused, Exit. Spawn
//! and Attaching are transient and are resolved to a stable state before
//! `apply` returns, so callers only ever observe the stable ones. The
//! driver feeds actions and elapsed time; the engine stays passive between
//! calls.

use std::path::{Path, PathBuf};

use tui_brick_score::{load, save_best_effort, TETRIS_SCORE_FILE};
use tui_brick_types::{
    GameInfo, Level, SimpleRng, UserAction, FIELD_HEIGHT, FIELD_WIDTH, MAX_LEVEL, PREVIEW_SIZE,
};

use crate::board::Board;
use crate::pieces::{Shape, Tetromino};

/// Points for clearing 1..=4 rows in one attach pass.
pub const ROW_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Points per level step: level = score / 600 + 1, capped.
pub const POINTS_PER_LEVEL: u32 = 600;

/// Auto-descend delay at level 0 and its per-level reduction
/// (`500 - 35 * level` milliseconds).
pub const BASE_DROP_MS: u32 = 500;
pub const DROP_STEP_MS: u32 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisState {
    Start,
    Spawn,
    Moving,
    Attaching,
    GameOver,
    Paused,
    Exit,
}

/// The Tetris game engine. One per driver, owned by it.
#[derive(Debug)]
pub struct TetrisGame {
    board: Board,
    current: Option<Tetromino>,
    next: Shape,
    score: u32,
    high_score: u32,
    level: Level,
    state: TetrisState,
    rng: SimpleRng,
    score_path: PathBuf,
    drop_timer_ms: u32,
}

impl TetrisGame {
    /// Create a fresh game in the Start state. The high score is read from
    /// `runtime_dir/tetris_high_score.txt`; absence means zero.
    pub fn new(runtime_dir: &Path, seed: u32) -> Self {
        let score_path = runtime_dir.join(TETRIS_SCORE_FILE);
        let high_score = load(&score_path);
        let mut rng = SimpleRng::new(seed);
        let next = Shape::random(&mut rng);
        Self {
            board: Board::new(),
            current: None,
            next,
            score: 0,
            high_score,
            level: Level::Pending,
            state: TetrisState::Start,
            rng,
            score_path,
            drop_timer_ms: 0,
        }
    }

    pub fn state(&self) -> TetrisState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Tetromino> {
        self.current
    }

    pub fn next_shape(&self) -> Shape {
        self.next
    }

    /// True once the Escape/Terminate signal drove the machine to Exit.
    pub fn finished(&self) -> bool {
        self.state == TetrisState::Exit
    }

    /// Apply one user action. Up is deliberately unmapped. Illegal moves
    /// and rotations are rejected without any state change.
    pub fn apply(&mut self, action: UserAction) {
        match self.state {
            TetrisState::Start => match action {
                UserAction::Start => {
                    self.level = Level::At(1);
                    self.state = TetrisState::Spawn;
                }
                UserAction::Terminate => self.state = TetrisState::Exit,
                _ => {}
            },
            TetrisState::Moving => match action {
                UserAction::Action => self.rotate(),
                UserAction::Down => self.move_down(),
                UserAction::Left => self.move_lateral(-1),
                UserAction::Right => self.move_lateral(1),
                UserAction::Pause => self.state = TetrisState::Paused,
                UserAction::Terminate => self.state = TetrisState::Exit,
                _ => {}
            },
            TetrisState::Paused => {
                if action == UserAction::Pause {
                    self.state = TetrisState::Moving;
                }
            }
            TetrisState::GameOver => match action {
                UserAction::Start => {
                    self.restart();
                }
                UserAction::Terminate => self.state = TetrisState::Exit,
                _ => {}
            },
            // Transient states are resolved below; Exit is terminal.
            TetrisState::Spawn | TetrisState::Attaching | TetrisState::Exit => {}
        }
        self.resolve_transient();
    }

    /// Advance engine time. Issues an auto-descend once the level-dependent
    /// deadline has passed while a piece is falling.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.state != TetrisState::Moving {
            return;
        }
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.auto_delay_ms() {
            self.drop_timer_ms = 0;
            self.apply(UserAction::Down);
        }
    }

    /// Current auto-descend delay: `500 - 35 * level` milliseconds.
    pub fn auto_delay_ms(&self) -> u32 {
        let level = match self.level {
            Level::At(n) => u32::from(n),
            _ => 1,
        };
        BASE_DROP_MS.saturating_sub(DROP_STEP_MS * level)
    }

    /// Snapshot: settled board overlaid with the falling piece, plus the
    /// 4x4 next-piece preview.
    pub fn game_info(&self) -> GameInfo {
        let mut field = *self.board.cells();
        if let Some(piece) = self.current {
            let code = piece.shape.color().code();
            for (row, col) in piece.cells() {
                if row >= 0
                    && (row as usize) < FIELD_HEIGHT
                    && col >= 0
                    && (col as usize) < FIELD_WIDTH
                {
                    field[row as usize][col as usize] = code;
                }
            }
        }

        let mut next = [[0u8; PREVIEW_SIZE]; PREVIEW_SIZE];
        let code = self.next.color().code();
        let mask = &self.next.masks()[0];
        for i in 0..PREVIEW_SIZE {
            for j in 0..PREVIEW_SIZE {
                if mask[i][j] != 0 {
                    next[i][j] = code;
                }
            }
        }

        let speed = match self.level {
            Level::At(n) => u32::from(n),
            _ => 1,
        };
        GameInfo {
            field,
            next: Some(next),
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            speed,
            paused: self.state == TetrisState::Paused,
        }
    }

    /// Drive Spawn/Attaching through to a stable state.
    fn resolve_transient(&mut self) {
        loop {
            match self.state {
                TetrisState::Spawn => self.spawn(),
                TetrisState::Attaching => self.attach(),
                _ => return,
            }
        }
    }

    /// Promote "next" to "current" and draw a fresh "next". A spawn that
    /// immediately collides ends the game.
    fn spawn(&mut self) {
        let piece = Tetromino::spawn(self.next);
        self.next = Shape::random(&mut self.rng);
        if self.board.collides(&piece) {
            self.current = Some(piece);
            self.state = TetrisState::GameOver;
            self.level = Level::Lost;
        } else {
            self.current = Some(piece);
            self.drop_timer_ms = 0;
            self.state = TetrisState::Moving;
        }
    }

    /// Advance the rotation index; revert and start attaching when the
    /// rotated mask overlaps the stack, otherwise nudge back inside the
    /// borders.
    fn rotate(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let mut rotated = piece.rotated();
        if self.board.hits_stack(&rotated) {
            self.state = TetrisState::Attaching;
            return;
        }
        while Board::off_left(&rotated) {
            rotated = rotated.shifted(0, 1);
        }
        while Board::off_right(&rotated) {
            rotated = rotated.shifted(0, -1);
        }
        self.current = Some(rotated);
    }

    /// Descend one row, or start attaching when blocked.
    fn move_down(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let moved = piece.shifted(1, 0);
        if self.board.hits_stack(&moved) {
            self.state = TetrisState::Attaching;
        } else {
            self.current = Some(moved);
        }
    }

    /// Shift one column when border- and stack-legal; else silently reject.
    fn move_lateral(&mut self, d_col: i8) {
        let Some(piece) = self.current else {
            return;
        };
        let moved = piece.shifted(0, d_col);
        if !self.board.collides(&moved) {
            self.current = Some(moved);
        }
    }

    /// Stamp the piece, compact full rows, apply scoring and go back to
    /// Spawn.
    fn attach(&mut self) {
        if let Some(piece) = self.current.take() {
            self.board.attach(&piece);
        }
        let cleared = self.board.clear_full_rows().len();
        self.score += ROW_SCORES[cleared.min(4)];
        if self.score > self.high_score {
            self.high_score = self.score;
            save_best_effort(&self.score_path, self.high_score);
        }
        let level = (self.score / POINTS_PER_LEVEL + 1).min(u32::from(MAX_LEVEL));
        self.level = Level::At(level as u8);
        self.state = TetrisState::Spawn;
    }

    /// GameOver -> Spawn with the board and stats reset. The in-memory
    /// high score survives the restart.
    fn restart(&mut self) {
        self.board.clear();
        self.current = None;
        self.next = Shape::random(&mut self.rng);
        self.score = 0;
        self.drop_timer_ms = 0;
        self.level = Level::At(1);
        self.state = TetrisState::Spawn;
        self.resolve_transient();
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Tetromino) {
        self.current = Some(piece);
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
