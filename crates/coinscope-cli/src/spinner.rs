//! Terminal spinner shown while the sources are being fetched.

use coinscope::Progress;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner frames, followed by the blank frame shown once finished.
const FRAMES: &str = "-\\|/ ";

/// An indicatif spinner on stderr, advanced by the orchestrator's ticks.
///
/// Hidden automatically when stderr is not a terminal.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new() -> Self {
        let style = ProgressStyle::with_template("{spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(FRAMES);
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        Self { bar }
    }

    #[cfg(test)]
    fn hidden() -> Self {
        let spinner = Self::new();
        spinner
            .bar
            .set_draw_target(indicatif::ProgressDrawTarget::hidden());
        spinner
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for Spinner {
    fn tick(&self) {
        self.bar.tick();
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_ticks_and_finishes() {
        let spinner = Spinner::hidden();
        for _ in 0..10 {
            spinner.tick();
        }
        spinner.finish();
        assert!(spinner.bar.is_finished());
    }
}
