//! TerminalRenderer: draws render snapshots to a real terminal.
//!
//! Each board cell is two characters wide so cells look square. The first
//! frame is a full redraw; after that only runs of changed cells are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::core::RenderSnapshot;
use crate::engine::Frontend;
use crate::types::{Cell, BOARD_COLS, BOARD_HEIGHT, BOARD_ROWS};

pub const FILLED_GLYPH: &str = "██";
pub const EMPTY_GLYPH: &str = "░░";

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 2;

pub const HELP_LINE: &str = "A/D move  S drop  W rotate  Enter quit";
pub const GAME_OVER_NOTICE: &str = "Game Over. Press R to restart or Enter to exit.";

pub fn glyph(cell: Cell) -> &'static str {
    match cell {
        Cell::Filled => FILLED_GLYPH,
        Cell::Empty => EMPTY_GLYPH,
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<RenderSnapshot>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a snapshot, diffing against the previous one.
    pub fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) => encode_diff_into(prev, snapshot, &mut self.buf)?,
            None => encode_full_into(snapshot, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(*snapshot);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for TerminalRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        self.draw(snapshot)
    }

    fn game_over(&mut self) -> Result<()> {
        self.buf.clear();
        encode_notice_into(GAME_OVER_NOTICE, &mut self.buf)?;
        self.flush_buf()?;
        // Next frame repaints the help line over the notice.
        self.invalidate();
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(snapshot: &RenderSnapshot, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for (y, row) in snapshot.board.iter().enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for &cell in row {
            out.queue(Print(glyph(cell)))?;
        }
    }
    out.queue(cursor::MoveTo(0, BOARD_HEIGHT as u16 + 1))?;
    out.queue(Print(HELP_LINE))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
pub fn encode_diff_into(
    prev: &RenderSnapshot,
    next: &RenderSnapshot,
    out: &mut Vec<u8>,
) -> Result<()> {
    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x as u16 * CELL_WIDTH, y as u16))?;
        for cell in &next.board[y][x..x + len] {
            out.queue(Print(glyph(*cell)))?;
        }
        Ok(())
    })
}

/// Encode the game-over notice beneath the board.
pub fn encode_notice_into(notice: &str, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, BOARD_HEIGHT as u16 + 1))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(Print(notice))?;
    Ok(())
}

fn for_each_changed_run(
    prev: &RenderSnapshot,
    next: &RenderSnapshot,
    mut f: impl FnMut(usize, usize, usize) -> Result<()>,
) -> Result<()> {
    for y in 0..BOARD_ROWS {
        let mut x = 0;
        while x < BOARD_COLS {
            if prev.board[y][x] == next.board[y][x] {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < BOARD_COLS && prev.board[y][x] != next.board[y][x] {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
