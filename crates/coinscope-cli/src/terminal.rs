//! Full-screen terminal capability used by the viewer.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

/// A key press, reduced to what the viewer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C.
    Interrupt,
    Other,
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

/// Screen output and blocking single-key input.
pub trait Terminal {
    fn clear(&mut self) -> io::Result<()>;
    /// Append text at the cursor without a line break.
    fn write(&mut self, text: &str) -> io::Result<()>;
    fn write_line(&mut self, text: &str) -> io::Result<()>;
    /// Block until a key is pressed. No timeout.
    fn read_key(&mut self) -> io::Result<Key>;
}

/// crossterm-backed terminal in raw mode on the alternate screen.
///
/// The previous screen and cooked mode are restored on drop.
pub struct CrosstermTerminal {
    out: Stdout,
}

impl CrosstermTerminal {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.out, LeaveAlternateScreen);
    }
}

impl Terminal for CrosstermTerminal {
    fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))?;
        self.out.flush()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        // Raw mode: a bare \n does not return the carriage.
        queue!(self.out, Print(text), Print("\r\n"))?;
        self.out.flush()
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                // Windows reports both press and release.
                if key.kind == KeyEventKind::Press {
                    return Ok(Key::from(key));
                }
            }
        }
    }
}

/// Restore the terminal if the process panics while the viewer is up.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
