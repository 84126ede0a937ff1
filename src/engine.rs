// src/engine.rs
use crate::pacing::Pacer;
use crate::query::build_query;
use crate::search::SearchClient;
use crate::searcher::DomainSearcher;
use crate::types::{AggregatedResults, Config, DorkerError, SearchOutcome};
use futures::future::join_all;
use futures::FutureExt;
use indicatif::ProgressBar;
use log::{error, info};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::Instant;

/// Fans the per-domain searches out under one deadline and a concurrency cap.
pub struct DorkEngine {
    searcher: DomainSearcher,
    query: String,
    concurrency: usize,
    timeout: Duration,
    progress: Option<ProgressBar>,
}

impl DorkEngine {
    pub fn new(config: &Config, client: Arc<dyn SearchClient>) -> Self {
        let searcher = DomainSearcher::new(client)
            .with_pacer(Pacer::fixed(config.page_delay))
            .with_subdomain_extraction(config.extract_subdomains);

        Self {
            searcher,
            query: config.query.clone(),
            concurrency: config.concurrency.max(1),
            timeout: config.timeout,
            progress: None,
        }
    }

    /// Ticks `bar` once per finished domain.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Search every entry of `domains` and collect the subdomains found.
    ///
    /// Repeated domains are searched once per occurrence. Domains whose
    /// search failed or timed out are logged and left out of the result, so
    /// callers must not expect one entry per requested domain.
    pub async fn run(&self, domains: &[String]) -> AggregatedResults {
        let deadline = deadline_after(self.timeout);
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let (tx, mut rx) = mpsc::channel::<SearchOutcome>(domains.len().max(1));

        let mut handles = Vec::with_capacity(domains.len());
        for domain in domains {
            info!("Starting search for domain: {}", domain);

            let searcher = self.searcher.clone();
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let progress = self.progress.clone();
            let query = build_query(domain, &self.query);
            let domain = domain.clone();

            handles.push(tokio::spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => search_guarded(&searcher, deadline, &domain, &query).await,
                    Err(e) => SearchOutcome::Failed {
                        domain: domain.clone(),
                        error: e.to_string(),
                    },
                };

                if let Some(bar) = &progress {
                    bar.inc(1);
                }
                // capacity covers every task, so this never waits
                let _ = tx.send(outcome).await;
            }));
        }
        drop(tx);

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                error!("Search task aborted: {}", e);
            }
        }

        let mut results = AggregatedResults::new();
        while let Some(outcome) = rx.recv().await {
            if let SearchOutcome::Failed { error, .. } = &outcome {
                error!("Error for domain {}: {}", outcome.domain(), error);
                continue;
            }
            if let SearchOutcome::Found { domain, subdomains } = outcome {
                results.insert(domain, subdomains);
            }
        }

        if let Some(bar) = &self.progress {
            bar.finish_and_clear();
        }

        results
    }
}

/// Deadline `timeout` from now, clamped to a far-future instant when the
/// addition would overflow.
fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(FAR_FUTURE_SECS))
}

// Roughly 30 years.
const FAR_FUTURE_SECS: u64 = 86_400 * 365 * 30;

/// Runs one search, turning a panic inside it into a failed outcome.
async fn search_guarded(
    searcher: &DomainSearcher,
    deadline: Instant,
    domain: &str,
    query: &str,
) -> SearchOutcome {
    match AssertUnwindSafe(searcher.search(deadline, domain, query))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(payload) => {
            let err = DorkerError::TaskPanic(panic_message(payload.as_ref()));
            error!("Recovered from panic in search routine: {}", err);
            SearchOutcome::Failed {
                domain: domain.to_string(),
                error: err.to_string(),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
