// src/search/stubs.rs
// Scripted search clients used by the searcher and engine tests.

use crate::error::Result;
use crate::search::SearchClient;
use crate::types::{SearchItem, SearchPage};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&str, u32) -> Result<SearchPage> + Send + Sync>;

pub struct StubClient {
    respond: Responder,
    latency: Duration,
    requests: Mutex<Vec<(String, u32)>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl StubClient {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, u32) -> Result<SearchPage> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            latency: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Every call sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().unwrap().clone()
    }

    /// Highest number of calls observed in flight at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for StubClient {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &str, start: u32, _num: u32) -> Result<SearchPage> {
        self.requests.lock().unwrap().push((query.to_string(), start));

        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now_active, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        (self.respond)(query, start)
    }
}

pub fn page(urls: &[&str]) -> SearchPage {
    SearchPage {
        items: urls
            .iter()
            .map(|url| SearchItem {
                title: String::new(),
                url: url.to_string(),
                snippet: String::new(),
            })
            .collect(),
        has_more: false,
    }
}

/// Ten distinct hosts under `domain`, numbered from `start`.
pub fn full_page(domain: &str, start: u32) -> SearchPage {
    let urls: Vec<String> = (start..start + 10)
        .map(|i| format!("https://h{:03}.{}/", i, domain))
        .collect();
    let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    let mut result = page(&refs);
    result.has_more = true;
    result
}

/// Domain a `site:` query is scoped to.
pub fn scoped_domain(query: &str) -> &str {
    query
        .strip_prefix("site:")
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("")
}
