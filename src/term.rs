use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event as TermEvent, KeyEvent};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, Result};

use crate::config::Config;
use crate::engine::{CellKind, Engine};

const SNAKE_CHAR: char = '█';
const FOOD_CHAR: char = 'O';

/// Terminal columns and rows needed to show the bordered grid plus the
/// score line.
pub fn required_size(config: &Config) -> (u16, u16) {
    (config.width as u16 + 2, config.height as u16 + 3)
}

pub fn terminal_size() -> Result<(u16, u16)> {
    terminal::size()
}

/// The render sink: draws read-only engine snapshots onto the terminal and
/// drains raw key events. Never touches game state.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, terminal::Clear(ClearType::All))
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, cursor::Show)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    /// Drain all pending key events without blocking.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let TermEvent::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Redraw everything: score line, border, and every grid cell. The grid
    /// is small, so a full redraw per state change beats diffing — and it
    /// makes resets erase stale cells for free.
    pub fn draw(&mut self, engine: &Engine) -> Result<()> {
        let config = engine.config();
        let w = config.width as u16;
        let h = config.height as u16;

        self.put_str(0, 0, &format!("Score: {:<6}", engine.score()))?;
        self.draw_border(w, h)?;

        for y in 0..config.height {
            for x in 0..config.width {
                let ch = match engine.cell_kind((x, y)) {
                    CellKind::Snake => SNAKE_CHAR,
                    CellKind::Food => FOOD_CHAR,
                    CellKind::Empty => ' ',
                };
                self.put_char(x as u16 + 1, y as u16 + 2, ch)?;
            }
        }

        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    // The box sits one row below the score line; cells start at (1, 2).
    fn draw_border(&mut self, w: u16, h: u16) -> Result<()> {
        let top = 1;
        let bottom = h + 2;

        for x in 0..w + 2 {
            let ch = if x == 0 || x == w + 1 { '+' } else { '-' };
            self.put_char(x, top, ch)?;
            self.put_char(x, bottom, ch)?;
        }

        for y in top + 1..bottom {
            self.put_char(0, y, '|')?;
            self.put_char(w + 1, y, '|')?;
        }

        Ok(())
    }

    fn put_char(&mut self, x: u16, y: u16, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(ch))
    }

    fn put_str(&mut self, x: u16, y: u16, s: &str) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(s))
    }
}
