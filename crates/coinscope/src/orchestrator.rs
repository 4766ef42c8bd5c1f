//! Fetch orchestrator: concurrent source fetches, progress, merge, format.
//!
//! Every source runs as its own tokio task. The caller's task waits on the
//! join of all of them while ticking the progress indicator; the join branch
//! is polled first, so a tick can never hold back completion. There is no
//! early exit: a failed source does not cancel the others.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{FailedSource, FetchError, PartialFailure, SourceError};
use crate::format::format;
use crate::http_client::{Fetcher, HttpClient, DEFAULT_USER_AGENT};
use crate::progress::Progress;
use crate::sources::{extract_page, COINMARKETCAP_URL, COINWARZ_URL};
use crate::types::{MergedFields, Report, SourceId, SourceRequest, SourceResult};

/// Default interval between progress ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Runtime options of a search.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Market page URL template, `{query}` is replaced by the search term.
    pub primary_url: String,
    /// Difficulty page URL template.
    pub secondary_url: String,
    pub tick_interval: Duration,
    pub user_agent: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            primary_url: COINMARKETCAP_URL.to_string(),
            secondary_url: COINWARZ_URL.to_string(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Runs one search end to end, up to (not including) presentation.
pub struct Orchestrator {
    config: OrchestratorConfig,
    fetcher: Arc<dyn Fetcher>,
}

impl Orchestrator {
    /// Create an orchestrator backed by a reqwest client.
    pub fn new(config: OrchestratorConfig) -> Result<Self, FetchError> {
        let client = HttpClient::new(&config.user_agent)?;
        Ok(Self::with_fetcher(config, Arc::new(client)))
    }

    pub fn with_fetcher(config: OrchestratorConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// One request per source, primary first.
    pub fn requests(&self, query: &str) -> Vec<SourceRequest> {
        vec![
            SourceRequest::from_template(SourceId::Primary, &self.config.primary_url, query),
            SourceRequest::from_template(SourceId::Secondary, &self.config.secondary_url, query),
        ]
    }

    /// Fetch and extract every source concurrently, ticking `progress`
    /// until all of them have finished.
    pub async fn fetch_all(&self, query: &str, progress: &dyn Progress) -> Vec<SourceResult> {
        let requests = self.requests(query);
        let handles: Vec<_> = requests
            .iter()
            .cloned()
            .map(|request| tokio::spawn(fetch_source(Arc::clone(&self.fetcher), request)))
            .collect();

        let mut joined = std::pin::pin!(join_all(handles));
        let mut ticker = tokio::time::interval(self.config.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let outcomes = loop {
            tokio::select! {
                biased;
                outcomes = &mut joined => break outcomes,
                _ = ticker.tick() => progress.tick(),
            }
        };
        progress.finish();

        requests
            .into_iter()
            .zip(outcomes)
            .map(|(request, outcome)| match outcome {
                Ok(result) => result,
                Err(join_err) => {
                    warn!(url = %request.url, "fetch task failed: {join_err}");
                    SourceResult {
                        id: request.id,
                        url: request.url,
                        outcome: Err(SourceError::Task(join_err.to_string())),
                    }
                }
            })
            .collect()
    }

    /// Run a full search: fetch, merge, and format.
    ///
    /// Any failed source fails the whole search; the successful sources'
    /// fields are discarded rather than shown as a partial report.
    pub async fn run(
        &self,
        query: &str,
        progress: &dyn Progress,
    ) -> Result<Report, PartialFailure> {
        let primary_url = self.requests(query)[0].url.clone();
        let results = self.fetch_all(query, progress).await;
        let fields = merge(results)?;
        let lines = format(&fields);

        info!(query, fields = fields.len(), lines = lines.len(), "report ready");

        Ok(Report {
            query: query.to_string(),
            primary_url,
            lines,
        })
    }
}

async fn fetch_source(fetcher: Arc<dyn Fetcher>, request: SourceRequest) -> SourceResult {
    debug!(source = request.id.name(), url = %request.url, "fetch started");

    let outcome = match fetcher.fetch(&request.url).await {
        Ok(resp) if resp.is_success() => {
            extract_page(request.id, &resp.body).map_err(SourceError::from)
        }
        Ok(resp) => Err(SourceError::from(FetchError::Status {
            url: resp.url,
            status: resp.status,
        })),
        Err(e) => Err(SourceError::from(e)),
    };

    match &outcome {
        Ok(fields) => debug!(source = request.id.name(), fields = fields.len(), "fetch finished"),
        // Reported to the user through PartialFailure; only traced here.
        Err(e) => debug!(source = request.id.name(), url = %request.url, "source failed: {e}"),
    }

    SourceResult {
        id: request.id,
        url: request.url,
        outcome,
    }
}

/// Merge source results.
///
/// Fields of successful sources are combined regardless of arrival order.
/// If any source failed, the failures are returned instead, ordered by
/// source (primary first).
pub fn merge(results: Vec<SourceResult>) -> Result<MergedFields, PartialFailure> {
    let mut merged = MergedFields::new();
    let mut failed = Vec::new();

    for result in results {
        match result.outcome {
            Ok(fields) => {
                for field in fields {
                    merged.insert(field);
                }
            }
            Err(error) => failed.push(FailedSource {
                id: result.id,
                url: result.url,
                error,
            }),
        }
    }

    if failed.is_empty() {
        Ok(merged)
    } else {
        failed.sort_by_key(|f| f.id);
        Err(PartialFailure { failed })
    }
}
