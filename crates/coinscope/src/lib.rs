//! coinscope: concurrent acquisition of coin market and mining-difficulty
//! pages, positional field extraction, and derived-metric reports.

pub mod document;
pub mod error;
pub mod format;
pub mod http_client;
pub mod orchestrator;
pub mod progress;
pub mod schema;
pub mod sources;
pub mod types;

pub use error::{ExtractionError, FetchError, PartialFailure, SourceError};
pub use format::format;
pub use http_client::{Fetcher, HttpClient, HttpResponse};
pub use orchestrator::{merge, Orchestrator, OrchestratorConfig};
pub use progress::{NoProgress, Progress, TickCounter};
pub use types::*;
