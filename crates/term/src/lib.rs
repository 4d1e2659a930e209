//! Terminal front end.
//!
//! A thin presentation shim: a raw-mode session guard plus a pure view that
//! encodes a [`tui_brick_types::GameInfo`] snapshot into crossterm commands.
//! The view writes into any `io::Write`, so it is unit-testable without a
//! terminal.

pub mod session;
pub mod view;

pub use session::TerminalSession;
pub use view::GameView;
