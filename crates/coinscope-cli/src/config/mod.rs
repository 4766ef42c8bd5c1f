//! Runtime options resolved from the command line.

use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, UsageError};

/// How the finished report is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Full-screen viewer with the quit/open prompt.
    Interactive,
    /// Report printed once as JSON on stdout.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub query: String,
    pub log_level: String,
    pub show_spinner: bool,
    pub mode: OutputMode,
}

impl TryFrom<&Cli> for RunConfig {
    type Error = UsageError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            query: cli.query()?.to_string(),
            log_level: cli.log_level.clone(),
            show_spinner: !cli.quiet,
            mode: if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Interactive
            },
        })
    }
}

/// Log filter: `RUST_LOG` when set and valid, otherwise `fallback`.
pub fn resolve_log_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}
