//! Shared types for the brick-game engines and front ends.
//!
//! Everything here is pure data with no external dependencies, so both game
//! engines and every renderer can depend on it without dragging in I/O.

pub mod rng;

pub use rng::SimpleRng;

/// Playing field dimensions (columns x rows), shared by both games.
pub const FIELD_WIDTH: usize = 10;
pub const FIELD_HEIGHT: usize = 20;

/// Side length of the "next piece" preview grid.
pub const PREVIEW_SIZE: usize = 4;

/// Highest numeric level either game can reach.
pub const MAX_LEVEL: u8 = 10;

/// A board cell as `(row, col)`. Value-compared, no identity.
pub type Cell = (i8, i8);

/// Color codes written into snapshot grids. `Empty` (0) means unoccupied;
/// everything else tags the cell with an identity for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Empty = 0,
    Green = 1,
    Red = 2,
    Yellow = 3,
    Blue = 4,
    Orange = 5,
    Cyan = 6,
    Magenta = 7,
    White = 8,
}

impl Color {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// The input signal set consumed by both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Pause,
    Terminate,
    Left,
    Right,
    Up,
    Down,
    /// Context-dependent: movement tick for Snake, rotate for Tetris.
    Action,
}

/// Snake movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The geometric 180-degree opposite.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit offset of one step as `(d_row, d_col)`.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Level indicator carried in every snapshot. The numeric range is 1..=10;
/// the Won/Lost variants are the reserved sentinels terminal outcomes are
/// reported through, and Pending covers the pre-Start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Pending,
    At(u8),
    Won,
    Lost,
}

impl Level {
    /// Wire encoding used by renderers and score displays:
    /// 0 = pending, 1..=10 = numeric level, -1 = won, -2 = lost.
    pub fn code(self) -> i32 {
        match self {
            Level::Pending => 0,
            Level::At(n) => i32::from(n),
            Level::Won => -1,
            Level::Lost => -2,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Level::Won | Level::Lost)
    }
}

/// Renderer-facing snapshot, identical in shape for both engines. Snake
/// leaves `next` as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub field: [[u8; FIELD_WIDTH]; FIELD_HEIGHT],
    pub next: Option<[[u8; PREVIEW_SIZE]; PREVIEW_SIZE]>,
    pub score: u32,
    pub high_score: u32,
    pub level: Level,
    pub speed: u32,
    pub paused: bool,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            field: [[0; FIELD_WIDTH]; FIELD_HEIGHT],
            next: None,
            score: 0,
            high_score: 0,
            level: Level::Pending,
            speed: 1,
            paused: false,
        }
    }
}
