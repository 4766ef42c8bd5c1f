//! Open a URL in the user's browser.

use std::process::{Command, Stdio};

/// Fire-and-forget URL opener.
pub trait Browser {
    fn open(&self, url: &str);
}

/// Hands the URL to the platform's default opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) {
        // Output would land in the middle of the raw-mode screen.
        let spawned = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => tracing::debug!(url, "browser opened"),
            Err(e) => tracing::warn!(url, "could not open browser: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_passes_url() {
        let cmd = SystemBrowser::command("https://coinmarketcap.com/currencies/bitcoin");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args.last().map(String::as_str),
            Some("https://coinmarketcap.com/currencies/bitcoin")
        );
    }
}
