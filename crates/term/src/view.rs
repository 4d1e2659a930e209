//! GameView: encodes a snapshot into crossterm commands.
//!
//! Pure with respect to the terminal: everything is queued into a writer,
//! so tests can render into a byte buffer.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use tui_brick_types::{Color, GameInfo, Level, FIELD_HEIGHT, FIELD_WIDTH, PREVIEW_SIZE};

/// Each board cell is drawn this many terminal columns wide, to compensate
/// for the glyph aspect ratio.
const CELL_W: u16 = 2;

/// Column where the sidebar starts.
const SIDEBAR_X: u16 = FIELD_WIDTH as u16 * CELL_W + 4;

/// Renders a [`GameInfo`] snapshot: bordered field, score sidebar, optional
/// next-piece preview and state banners.
pub struct GameView {
    title: &'static str,
}

impl GameView {
    pub fn new(title: &'static str) -> Self {
        Self { title }
    }

    pub fn draw(&self, out: &mut impl Write, info: &GameInfo) -> Result<()> {
        out.queue(Clear(ClearType::All))?;
        out.queue(ResetColor)?;

        self.draw_frame(out)?;
        self.draw_field(out, info)?;
        self.draw_sidebar(out, info)?;
        self.draw_banner(out, info)?;

        out.queue(MoveTo(0, FIELD_HEIGHT as u16 + 2))?;
        out.flush()?;
        Ok(())
    }

    fn draw_frame(&self, out: &mut impl Write) -> Result<()> {
        let inner = FIELD_WIDTH as u16 * CELL_W;
        out.queue(MoveTo(0, 0))?
            .queue(Print(format!("+{}+", "-".repeat(inner as usize))))?;
        for row in 0..FIELD_HEIGHT as u16 {
            out.queue(MoveTo(0, row + 1))?.queue(Print("|"))?;
            out.queue(MoveTo(inner + 1, row + 1))?.queue(Print("|"))?;
        }
        out.queue(MoveTo(0, FIELD_HEIGHT as u16 + 1))?
            .queue(Print(format!("+{}+", "-".repeat(inner as usize))))?;
        Ok(())
    }

    fn draw_field(&self, out: &mut impl Write, info: &GameInfo) -> Result<()> {
        for (row, cells) in info.field.iter().enumerate() {
            out.queue(MoveTo(1, row as u16 + 1))?;
            for &code in cells {
                if code == 0 {
                    out.queue(ResetColor)?.queue(Print(" ".repeat(CELL_W as usize)))?;
                } else {
                    out.queue(SetBackgroundColor(term_color(code)))?
                        .queue(Print(" ".repeat(CELL_W as usize)))?;
                }
            }
            out.queue(ResetColor)?;
        }
        Ok(())
    }

    fn draw_sidebar(&self, out: &mut impl Write, info: &GameInfo) -> Result<()> {
        out.queue(MoveTo(SIDEBAR_X, 1))?
            .queue(Print(self.title))?
            .queue(MoveTo(SIDEBAR_X, 3))?
            .queue(Print(format!("SCORE  {}", info.score)))?
            .queue(MoveTo(SIDEBAR_X, 4))?
            .queue(Print(format!("HIGH   {}", info.high_score)))?
            .queue(MoveTo(SIDEBAR_X, 5))?
            .queue(Print(format!("LEVEL  {}", level_label(info.level))))?;

        if let Some(preview) = &info.next {
            out.queue(MoveTo(SIDEBAR_X, 7))?.queue(Print("NEXT"))?;
            for (i, row) in preview.iter().enumerate() {
                out.queue(MoveTo(SIDEBAR_X, 8 + i as u16))?;
                for &code in row.iter().take(PREVIEW_SIZE) {
                    if code == 0 {
                        out.queue(ResetColor)?.queue(Print("  "))?;
                    } else {
                        out.queue(SetBackgroundColor(term_color(code)))?.queue(Print("  "))?;
                    }
                }
                out.queue(ResetColor)?;
            }
        }
        Ok(())
    }

    fn draw_banner(&self, out: &mut impl Write, info: &GameInfo) -> Result<()> {
        let banner = if info.paused {
            Some("PAUSED")
        } else {
            match info.level {
                Level::Pending => Some("Press S to start"),
                Level::Won => Some("YOU WIN"),
                Level::Lost => Some("GAME OVER"),
                Level::At(_) => None,
            }
        };
        if let Some(text) = banner {
            let x = (FIELD_WIDTH as u16 * CELL_W + 2).saturating_sub(text.len() as u16) / 2;
            out.queue(MoveTo(x, FIELD_HEIGHT as u16 / 2))?
                .queue(SetForegroundColor(TermColor::Yellow))?
                .queue(Print(text))?
                .queue(ResetColor)?;
        }
        Ok(())
    }
}

fn level_label(level: Level) -> String {
    match level {
        Level::Pending => "-".to_string(),
        Level::At(n) => n.to_string(),
        Level::Won => "WIN".to_string(),
        Level::Lost => "LOSS".to_string(),
    }
}

fn term_color(code: u8) -> TermColor {
    match code {
        c if c == Color::Green.code() => TermColor::Green,
        c if c == Color::Red.code() => TermColor::Red,
        c if c == Color::Yellow.code() => TermColor::Yellow,
        c if c == Color::Blue.code() => TermColor::Blue,
        c if c == Color::Orange.code() => TermColor::DarkYellow,
        c if c == Color::Cyan.code() => TermColor::Cyan,
        c if c == Color::Magenta.code() => TermColor::Magenta,
        c if c == Color::White.code() => TermColor::White,
        _ => TermColor::Reset,
    }
}
