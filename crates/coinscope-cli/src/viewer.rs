//! Interactive report viewer.
//!
//! ```text
//! Showing ──> AwaitInput ──q──> Quit
//!                 │  ^
//!                 o  └── any other key
//!                 v
//!               Opened ──> AwaitInput
//! ```

use std::io;

use coinscope::Report;

use crate::browser::Browser;
use crate::terminal::{Key, Terminal};

/// Shown below the report.
pub const PROMPT: &str = "Quit or Open CoinMarketCap.com? (q,o)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Showing,
    AwaitInput,
    Opened,
    Quit,
}

impl ViewerState {
    /// State after `key` is pressed while awaiting input.
    pub fn on_key(key: Key) -> Self {
        match key {
            Key::Char('q') | Key::Interrupt => ViewerState::Quit,
            Key::Char('o') => ViewerState::Opened,
            _ => ViewerState::AwaitInput,
        }
    }
}

/// Render `report` and handle keys until the user quits.
pub fn run(report: &Report, terminal: &mut dyn Terminal, browser: &dyn Browser) -> io::Result<()> {
    let mut state = ViewerState::Showing;
    loop {
        state = match state {
            ViewerState::Showing => {
                terminal.clear()?;
                for line in &report.lines {
                    terminal.write_line(&line.text)?;
                }
                terminal.write(PROMPT)?;
                ViewerState::AwaitInput
            }
            ViewerState::AwaitInput => ViewerState::on_key(terminal.read_key()?),
            ViewerState::Opened => {
                browser.open(&report.primary_url);
                ViewerState::AwaitInput
            }
            ViewerState::Quit => return Ok(()),
        };
    }
}
