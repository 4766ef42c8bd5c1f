//! Command-line surface: exactly one search term plus a few global flags.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "coinscope",
    about = "Look up a coin's market stats and mining difficulty",
    version,
    after_help = "Example: coinscope bitcoin\nPress 'o' in the report to open the market page, 'q' to quit."
)]
pub struct Cli {
    /// Coin to look up, as it appears in the market page URL (e.g. "bitcoin").
    #[arg(value_name = "COIN")]
    pub terms: Vec<String>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Do not show the progress spinner.
    #[arg(long, short)]
    pub quiet: bool,

    /// Print the report as JSON instead of opening the interactive view.
    #[arg(long)]
    pub json: bool,
}

/// The positional arguments were not exactly one search term.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    #[error("Error: Not enough arguments provided. Please provide a search term.")]
    MissingTerm,

    #[error("Error: Too many arguments provided.")]
    TooManyTerms,
}

impl Cli {
    /// The single search term.
    pub fn query(&self) -> Result<&str, UsageError> {
        match self.terms.as_slice() {
            [] => Err(UsageError::MissingTerm),
            [term] => Ok(term.as_str()),
            _ => Err(UsageError::TooManyTerms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("coinscope").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_term() {
        let cli = parse(&["bitcoin"]);
        assert_eq!(cli.query(), Ok("bitcoin"));
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.json);
    }

    #[test]
    fn test_no_term() {
        assert_eq!(parse(&[]).query(), Err(UsageError::MissingTerm));
        assert_eq!(
            UsageError::MissingTerm.to_string(),
            "Error: Not enough arguments provided. Please provide a search term."
        );
    }

    #[test]
    fn test_too_many_terms() {
        assert_eq!(
            parse(&["bitcoin", "cash"]).query(),
            Err(UsageError::TooManyTerms)
        );
        assert_eq!(
            UsageError::TooManyTerms.to_string(),
            "Error: Too many arguments provided."
        );
    }

    #[test]
    fn test_flags_do_not_count_as_terms() {
        let cli = parse(&["--json", "-q", "--log-level", "debug", "ethereum"]);
        assert_eq!(cli.query(), Ok("ethereum"));
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.log_level, "debug");
    }
}
