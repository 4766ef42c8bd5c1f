//! coinscope command-line front-end: argument handling, progress spinner,
//! and the interactive report viewer.

pub mod browser;
pub mod cli;
pub mod config;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod viewer;

pub use browser::{Browser, SystemBrowser};
pub use cli::{Cli, UsageError};
pub use config::{OutputMode, RunConfig};
pub use spinner::Spinner;
pub use terminal::{CrosstermTerminal, Key, Terminal};
