//! Snake engine.
//!
//! A polled state machine over `{Start, Running, Paused, GameOver}`. The
//! driver feeds it [`UserAction`]s and elapsed wall-clock time; the engine
//! never blocks and never touches the terminal. The snake body is the
//! authoritative collision structure, the snapshot grid is only a rendering
//! buffer.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tui_brick_score::{load, save_best_effort, SNAKE_SCORE_FILE};
use tui_brick_types::{
    Cell, Color, Direction, GameInfo, Level, SimpleRng, UserAction, FIELD_HEIGHT, FIELD_WIDTH,
    MAX_LEVEL,
};

/// Starting body length.
pub const INITIAL_LENGTH: usize = 4;

/// Body length that wins the game (the whole field).
pub const WIN_LENGTH: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// Minimum interval between processed movement steps.
pub const STEP_COOLDOWN_MS: u32 = 50;

/// Auto-advance delay at level 1 and its per-level reduction.
pub const BASE_DELAY_MS: u32 = 400;
pub const DELAY_STEP_MS: u32 = 25;

/// Points per level step.
const POINTS_PER_LEVEL: u32 = 5;

/// Snake lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    Start,
    Running,
    Paused,
    GameOver,
}

/// Collision classification for a proposed head position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collision {
    None,
    Wall,
    Body,
    Apple,
}

/// The Snake game engine. One per driver; the driver owns it and passes it
/// to whatever needs it.
#[derive(Debug)]
pub struct SnakeGame {
    /// Front is the head, back is the tail.
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Direction,
    apple: Cell,
    score: u32,
    high_score: u32,
    level: Level,
    state: SnakeState,
    rng: SimpleRng,
    score_path: PathBuf,
    /// Time since the last auto-advance movement.
    auto_timer_ms: u32,
    /// Time since the last processed movement step (tick rate limiter).
    cooldown_ms: u32,
}

impl SnakeGame {
    /// Create a fresh game. The high score is read from
    /// `runtime_dir/snake_high_score.txt`; absence means zero.
    ///
    /// The body starts as a vertical column of [`INITIAL_LENGTH`] cells
    /// centered on the field, head on top, facing up.
    pub fn new(runtime_dir: &Path, seed: u32) -> Self {
        let top = (FIELD_HEIGHT - INITIAL_LENGTH) as i8 / 2;
        let col = FIELD_WIDTH as i8 / 2;
        let body: VecDeque<Cell> = (0..INITIAL_LENGTH as i8).map(|i| (top + i, col)).collect();

        let score_path = runtime_dir.join(SNAKE_SCORE_FILE);
        let high_score = load(&score_path);

        let mut game = Self {
            body,
            direction: Direction::Up,
            pending: Direction::Up,
            apple: (0, 0),
            score: 0,
            high_score,
            level: Level::Pending,
            state: SnakeState::Start,
            rng: SimpleRng::new(seed),
            score_path,
            auto_timer_ms: 0,
            // Let the very first Action through.
            cooldown_ms: STEP_COOLDOWN_MS,
        };
        game.generate_apple();
        game
    }

    pub fn state(&self) -> SnakeState {
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

    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn apple(&self) -> Cell {
        self.apple
    }

    /// Apply one user action (or the synthesized tick pseudo-action).
    /// Actions whose preconditions are unmet are silently ignored.
    pub fn apply(&mut self, action: UserAction) {
        match action {
            UserAction::Start => {
                if self.state == SnakeState::Start {
                    self.state = SnakeState::Running;
                    self.level = Level::At(1);
                }
            }
            UserAction::Pause => match self.state {
                SnakeState::Running => self.state = SnakeState::Paused,
                SnakeState::Paused => self.state = SnakeState::Running,
                _ => {}
            },
            UserAction::Terminate => self.state = SnakeState::GameOver,
            UserAction::Left => self.pending = Direction::Left,
            UserAction::Right => self.pending = Direction::Right,
            UserAction::Up => self.pending = Direction::Up,
            UserAction::Down => self.pending = Direction::Down,
            UserAction::Action => {
                if self.state == SnakeState::Running && self.cooldown_ms >= STEP_COOLDOWN_MS {
                    self.cooldown_ms = 0;
                    self.step();
                }
            }
        }
    }

    /// Advance engine time by `elapsed_ms`. Synthesizes one movement step
    /// whenever the level-dependent auto-advance deadline has passed.
    /// Drivers call this once per polling frame; irregular intervals are
    /// fine.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.cooldown_ms = self.cooldown_ms.saturating_add(elapsed_ms);
        if self.state != SnakeState::Running {
            return;
        }
        self.auto_timer_ms = self.auto_timer_ms.saturating_add(elapsed_ms);
        if self.auto_timer_ms > self.auto_delay_ms() {
            self.auto_timer_ms = 0;
            self.apply(UserAction::Action);
        }
    }

    /// Current auto-advance delay: `400 - 25 * level` milliseconds.
    pub fn auto_delay_ms(&self) -> u32 {
        let level = match self.level {
            Level::At(n) => u32::from(n),
            _ => 1,
        };
        BASE_DELAY_MS.saturating_sub(DELAY_STEP_MS * level)
    }

    /// Snapshot for rendering: body in green, apple in red.
    pub fn game_info(&self) -> GameInfo {
        let mut field = [[0u8; FIELD_WIDTH]; FIELD_HEIGHT];
        for &(row, col) in &self.body {
            if let Some(cell) = cell_mut(&mut field, row, col) {
                *cell = Color::Green.code();
            }
        }
        if !self.level.is_terminal() {
            if let Some(cell) = cell_mut(&mut field, self.apple.0, self.apple.1) {
                *cell = Color::Red.code();
            }
        }
        GameInfo {
            field,
            next: None,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            speed: 1,
            paused: self.state == SnakeState::Paused,
        }
    }

    /// One movement step: commit the pending direction, advance the head,
    /// and resolve the collision outcome.
    fn step(&mut self) {
        if self.state != SnakeState::Running {
            return;
        }
        self.commit_direction();

        let Some(&(row, col)) = self.body.front() else {
            return;
        };
        let (dr, dc) = self.direction.offset();
        let next = (row + dr, col + dc);

        match self.classify(next) {
            Collision::Wall | Collision::Body => {
                self.state = SnakeState::GameOver;
                self.level = Level::Lost;
            }
            Collision::Apple => self.eat_apple(),
            Collision::None => {
                self.body.push_front(next);
                self.body.pop_back();
            }
        }
    }

    /// A queued reversal is only honored if it is not the opposite of the
    /// committed direction at the moment it is applied.
    fn commit_direction(&mut self) {
        if self.pending != self.direction.opposite() {
            self.direction = self.pending;
        }
        self.pending = self.direction;
    }

    fn classify(&self, next: Cell) -> Collision {
        let (row, col) = next;
        if row < 0 || row >= FIELD_HEIGHT as i8 || col < 0 || col >= FIELD_WIDTH as i8 {
            return Collision::Wall;
        }
        if self.body.iter().any(|&segment| segment == next) {
            return Collision::Body;
        }
        if next == self.apple {
            return Collision::Apple;
        }
        Collision::None
    }

    /// Grow onto the apple cell, update score/level/high score, then either
    /// win (board full) or place the next apple.
    fn eat_apple(&mut self) {
        self.body.push_front(self.apple);
        self.score += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
            save_best_effort(&self.score_path, self.high_score);
        }
        if self.score % POINTS_PER_LEVEL == 0 {
            if let Level::At(n) = self.level {
                if n < MAX_LEVEL {
                    self.level = Level::At(n + 1);
                }
            }
        }
        if self.body.len() == WIN_LENGTH {
            self.state = SnakeState::GameOver;
            self.level = Level::Won;
        } else {
            self.generate_apple();
        }
    }

    /// Place the apple uniformly at random on an empty cell. No empty cell
    /// left means the board is full: that is the win condition.
    fn generate_apple(&mut self) {
        let mut empty: Vec<Cell> = Vec::with_capacity(WIN_LENGTH);
        for row in 0..FIELD_HEIGHT as i8 {
            for col in 0..FIELD_WIDTH as i8 {
                if !self.body.iter().any(|&segment| segment == (row, col)) {
                    empty.push((row, col));
                }
            }
        }
        if empty.is_empty() {
            self.state = SnakeState::GameOver;
            self.level = Level::Won;
        } else {
            let idx = self.rng.next_range(empty.len() as u32) as usize;
            self.apple = empty[idx];
        }
    }

    #[cfg(test)]
    fn set_body(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.body = cells.into_iter().collect();
    }

    #[cfg(test)]
    fn set_apple(&mut self, cell: Cell) {
        self.apple = cell;
    }
}

fn cell_mut(field: &mut [[u8; FIELD_WIDTH]; FIELD_HEIGHT], row: i8, col: i8) -> Option<&mut u8> {
    if row < 0 || row >= FIELD_HEIGHT as i8 || col < 0 || col >= FIELD_WIDTH as i8 {
        return None;
    }
    Some(&mut field[row as usize][col as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game() -> SnakeGame {
        SnakeGame::new(&std::env::temp_dir().join("tui-brick-snake-tests"), 12345)
    }

    fn started() -> SnakeGame {
        std::fs::create_dir_all(std::env::temp_dir().join("tui-brick-snake-tests")).unwrap();
        let mut game = new_game();
        game.apply(UserAction::Start);
        game
    }

    /// Force the cooldown open so consecutive steps in a test are processed.
    fn step_now(game: &mut SnakeGame) {
        game.cooldown_ms = STEP_COOLDOWN_MS;
        game.apply(UserAction::Action);
    }

    #[test]
    fn test_initial_body_centered_and_facing_up() {
        let game = new_game();
        assert_eq!(game.state(), SnakeState::Start);
        assert_eq!(game.len(), INITIAL_LENGTH);
        let top = (FIELD_HEIGHT - INITIAL_LENGTH) as i8 / 2;
        let col = FIELD_WIDTH as i8 / 2;
        assert_eq!(game.head(), Some((top, col)));
        assert_eq!(game.direction, Direction::Up);
        // Apple never spawns on the body.
        assert!(!game.body.contains(&game.apple()));
    }

    #[test]
    fn test_start_transitions_to_running_level_one() {
        let mut game = new_game();
        assert_eq!(game.level(), Level::Pending);
        game.apply(UserAction::Start);
        assert_eq!(game.state(), SnakeState::Running);
        assert_eq!(game.level(), Level::At(1));
        // Start is only honored from the Start state.
        game.apply(UserAction::Pause);
        game.apply(UserAction::Start);
        assert_eq!(game.state(), SnakeState::Paused);
    }

    #[test]
    fn test_pause_toggles() {
        let mut game = started();
        game.apply(UserAction::Pause);
        assert_eq!(game.state(), SnakeState::Paused);
        game.apply(UserAction::Pause);
        assert_eq!(game.state(), SnakeState::Running);
    }

    #[test]
    fn test_terminate_is_unconditional() {
        let mut game = new_game();
        game.apply(UserAction::Terminate);
        assert_eq!(game.state(), SnakeState::GameOver);
    }

    #[test]
    fn test_start_then_action_moves_head_up_keeps_length() {
        let mut game = started();
        let top = (FIELD_HEIGHT - INITIAL_LENGTH) as i8 / 2;
        let col = FIELD_WIDTH as i8 / 2;
        // Keep the scenario deterministic: apple well away from the path.
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));

        game.apply(UserAction::Action);

        assert_eq!(game.head(), Some((top - 1, col)));
        assert_eq!(game.len(), INITIAL_LENGTH);
        assert_eq!(game.state(), SnakeState::Running);
    }

    #[test]
    fn test_step_cooldown_limits_rate() {
        let mut game = started();
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));
        let before = game.head();
        game.apply(UserAction::Action);
        let after_first = game.head();
        assert_ne!(before, after_first);

        // Immediately after a step the cooldown blocks the next one.
        game.apply(UserAction::Action);
        assert_eq!(game.head(), after_first);

        // Once 50ms of engine time pass, steps flow again.
        game.tick(STEP_COOLDOWN_MS);
        game.apply(UserAction::Action);
        assert_ne!(game.head(), after_first);
    }

    #[test]
    fn test_reversal_is_rejected_within_one_step() {
        let mut game = started();
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));
        // Facing Up; queue the exact opposite.
        game.apply(UserAction::Down);
        let head_before = game.head().unwrap();
        step_now(&mut game);
        // Direction stayed Up.
        assert_eq!(game.direction, Direction::Up);
        assert_eq!(game.head(), Some((head_before.0 - 1, head_before.1)));
    }

    #[test]
    fn test_turn_left_takes_effect_next_step() {
        let mut game = started();
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));
        game.apply(UserAction::Left);
        let head_before = game.head().unwrap();
        step_now(&mut game);
        assert_eq!(game.direction, Direction::Left);
        assert_eq!(game.head(), Some((head_before.0, head_before.1 - 1)));
    }

    #[test]
    fn test_wall_collision_loses() {
        let mut game = started();
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));
        // Head starts 8 rows from the top wall; march straight into it.
        for _ in 0..20 {
            step_now(&mut game);
        }
        assert_eq!(game.state(), SnakeState::GameOver);
        assert_eq!(game.level(), Level::Lost);
        // Length never changed on the way out.
        assert_eq!(game.len(), INITIAL_LENGTH);
    }

    #[test]
    fn test_head_stays_in_bounds_until_game_over() {
        let mut game = started();
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));
        for _ in 0..30 {
            if game.state() != SnakeState::Running {
                break;
            }
            let (row, col) = game.head().unwrap();
            assert!(row >= 0 && row < FIELD_HEIGHT as i8);
            assert!(col >= 0 && col < FIELD_WIDTH as i8);
            step_now(&mut game);
        }
        assert_eq!(game.state(), SnakeState::GameOver);
    }

    #[test]
    fn test_body_collision_loses() {
        let mut game = started();
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));
        // A hook: head at (10,5) pointing up, body curling so that turning
        // left then down runs into itself.
        game.set_body([(10, 5), (11, 5), (11, 4), (10, 4), (9, 4), (9, 5), (9, 6)]);
        game.apply(UserAction::Left);
        step_now(&mut game); // to (10, 4) ... already occupied
        assert_eq!(game.state(), SnakeState::GameOver);
        assert_eq!(game.level(), Level::Lost);
    }

    #[test]
    fn test_eating_apple_grows_and_scores() {
        let mut game = started();
        let (row, col) = game.head().unwrap();
        game.set_apple((row - 1, col));
        let high_before = game.high_score();

        step_now(&mut game);

        assert_eq!(game.score(), 1);
        assert_eq!(game.len(), INITIAL_LENGTH + 1);
        assert_eq!(game.head(), Some((row - 1, col)));
        assert!(game.high_score() >= high_before);
        assert_eq!(game.state(), SnakeState::Running);
        // A fresh apple was placed off the body.
        assert!(!game.body.contains(&game.apple()));
    }

    #[test]
    fn test_level_raises_every_five_points_capped() {
        let mut game = started();
        for score in 1..=60u32 {
            game.score = score - 1;
            // Re-plant the body so there is always room above the head.
            game.set_body([(15, 5), (16, 5), (17, 5), (18, 5)]);
            game.set_apple((14, 5));
            step_now(&mut game);
            if game.state() != SnakeState::Running {
                break;
            }
        }
        match game.level() {
            Level::At(n) => assert!(n <= MAX_LEVEL),
            other => panic!("unexpected level {other:?}"),
        }
    }

    #[test]
    fn test_level_progression_steps() {
        let mut game = started();
        assert_eq!(game.level(), Level::At(1));
        game.score = 4;
        game.set_body([(15, 5), (16, 5), (17, 5), (18, 5)]);
        game.set_apple((14, 5));
        step_now(&mut game);
        assert_eq!(game.score(), 5);
        assert_eq!(game.level(), Level::At(2));
    }

    #[test]
    fn test_win_on_full_board() {
        let mut game = started();
        // 199-cell body covering every cell except (0, 0), laid out as a
        // serpentine so the head at (0, 1) is adjacent to the hole.
        let mut cells: Vec<Cell> = Vec::new();
        for row in 0..FIELD_HEIGHT as i8 {
            let cols: Vec<i8> = if row % 2 == 0 {
                (0..FIELD_WIDTH as i8).collect()
            } else {
                (0..FIELD_WIDTH as i8).rev().collect()
            };
            for col in cols {
                if (row, col) != (0, 0) {
                    cells.push((row, col));
                }
            }
        }
        assert_eq!(cells.len(), WIN_LENGTH - 1);
        game.set_body(cells);
        game.set_apple((0, 0));
        game.score = WIN_LENGTH as u32 - 1 - INITIAL_LENGTH as u32;
        game.apply(UserAction::Left);

        step_now(&mut game);

        assert_eq!(game.len(), WIN_LENGTH);
        assert_eq!(game.state(), SnakeState::GameOver);
        assert_eq!(game.level(), Level::Won);
    }

    #[test]
    fn test_auto_advance_after_delay() {
        let mut game = started();
        game.set_apple((FIELD_HEIGHT as i8 - 1, 0));
        let head_before = game.head();
        // Level 1 delay is 375ms; one big poll gap covers it.
        game.tick(BASE_DELAY_MS);
        assert_ne!(game.head(), head_before);
    }

    #[test]
    fn test_no_auto_advance_while_paused() {
        let mut game = started();
        game.apply(UserAction::Pause);
        let head_before = game.head();
        game.tick(10 * BASE_DELAY_MS);
        assert_eq!(game.head(), head_before);
    }

    #[test]
    fn test_auto_delay_shrinks_with_level() {
        let mut game = started();
        assert_eq!(game.auto_delay_ms(), BASE_DELAY_MS - DELAY_STEP_MS);
        game.level = Level::At(10);
        assert_eq!(game.auto_delay_ms(), BASE_DELAY_MS - 10 * DELAY_STEP_MS);
    }

    #[test]
    fn test_game_info_paints_body_and_apple() {
        let mut game = started();
        game.set_apple((0, 0));
        let info = game.game_info();
        assert_eq!(info.field[0][0], Color::Red.code());
        for &(row, col) in &game.body {
            assert_eq!(info.field[row as usize][col as usize], Color::Green.code());
        }
        assert!(info.next.is_none());
        assert_eq!(info.speed, 1);
        assert!(!info.paused);
    }

    #[test]
    fn test_game_info_reports_pause_flag() {
        let mut game = started();
        game.apply(UserAction::Pause);
        assert!(game.game_info().paused);
    }

    #[test]
    fn test_no_movement_after_game_over() {
        let mut game = started();
        game.apply(UserAction::Terminate);
        let head = game.head();
        step_now(&mut game);
        game.tick(10 * BASE_DELAY_MS);
        assert_eq!(game.head(), head);
    }
}
