//! Error types for fetching, extraction, and partial failure.

use crate::types::{FieldKey, SourceId};

/// The transport could not deliver a usable page.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },
}

/// A page did not have the shape the extractor expects.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("{field}: query '{query}' matched nothing")]
    Missing { field: FieldKey, query: String },

    #[error("{field}: query '{query}' returned {found} values, expected at least {expected}")]
    TooFew {
        field: FieldKey,
        query: String,
        expected: usize,
        found: usize,
    },

    #[error("{field}: '{value}' is not a number")]
    Malformed { field: FieldKey, value: String },
}

/// Why a source contributed nothing to the report.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Fetch task failed: {0}")]
    Task(String),
}

/// A source that failed during a search.
#[derive(Debug)]
pub struct FailedSource {
    pub id: SourceId,
    pub url: String,
    pub error: SourceError,
}

/// One or more sources failed, so no report is produced.
#[derive(thiserror::Error, Debug)]
#[error("{}", self.messages().join("\n"))]
pub struct PartialFailure {
    pub failed: Vec<FailedSource>,
}

impl PartialFailure {
    /// One user-facing line per failed source URL.
    pub fn messages(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("There was an issue scraping {}", f.url))
            .collect()
    }

    pub fn failed_urls(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.url.as_str()).collect()
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_failure_one_line_per_url() {
        let failure = PartialFailure {
            failed: vec![
                FailedSource {
                    id: SourceId::Primary,
                    url: "https://a.example/bitcoin".into(),
                    error: SourceError::Task("panicked".into()),
                },
                FailedSource {
                    id: SourceId::Secondary,
                    url: "https://b.example/bitcoin".into(),
                    error: FetchError::Status {
                        url: "https://b.example/bitcoin".into(),
                        status: 404,
                    }
                    .into(),
                },
            ],
        };

        assert_eq!(
            failure.to_string(),
            "There was an issue scraping https://a.example/bitcoin\n\
             There was an issue scraping https://b.example/bitcoin"
        );
        assert_eq!(failure.failed_urls().len(), 2);
    }

    #[test]
    fn test_extraction_error_names_field() {
        let err = ExtractionError::TooFew {
            field: FieldKey::Difficulties,
            query: "div > span".into(),
            expected: 4,
            found: 2,
        };
        assert!(err.to_string().starts_with("difficulties:"));
    }
}
