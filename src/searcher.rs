// src/searcher.rs
use crate::error::Result;
use crate::pacing::Pacer;
use crate::registry::SubdomainRegistry;
use crate::search::SearchClient;
use crate::types::{DorkerError, SearchOutcome};
use crate::utils::extract_hostname;
use log::{debug, error, info, trace};
use std::sync::Arc;
use tokio::time::Instant;

pub const PAGE_SIZE: u32 = 10;
/// Hard cap on results fetched per domain, whatever the engine claims to have.
pub const RESULT_CEILING: u32 = 100;

/// Returns true when `host` should be recorded as a subdomain of `domain`.
///
/// Plain suffix match: `notexample.com` is accepted for `example.com`.
/// TODO: require a `.` boundary before the domain once output consumers
/// stop relying on the loose match.
pub fn is_subdomain_of(host: &str, domain: &str) -> bool {
    host.ends_with(domain) && host != domain
}

/// Runs the paginated search of a single domain.
#[derive(Clone)]
pub struct DomainSearcher {
    client: Arc<dyn SearchClient>,
    pacer: Pacer,
    extract_subdomains: bool,
}

impl DomainSearcher {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            pacer: Pacer::default(),
            extract_subdomains: true,
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_subdomain_extraction(mut self, enabled: bool) -> Self {
        self.extract_subdomains = enabled;
        self
    }

    /// Search `domain` with `query` until the results run out, the ceiling is
    /// reached, the client fails or `deadline` passes.
    ///
    /// A timeout discards anything found on earlier pages.
    pub async fn search(&self, deadline: Instant, domain: &str, query: &str) -> SearchOutcome {
        match self.paginate(deadline, domain, query).await {
            Ok(subdomains) => SearchOutcome::Found {
                domain: domain.to_string(),
                subdomains,
            },
            Err(DorkerError::Timeout) => SearchOutcome::Failed {
                domain: domain.to_string(),
                error: DorkerError::Timeout.to_string(),
            },
            Err(e) => {
                error!("Search failed for domain {}: {}", domain, e);
                SearchOutcome::Failed {
                    domain: domain.to_string(),
                    error: format!("Search failed: {}", e),
                }
            }
        }
    }

    async fn paginate(&self, deadline: Instant, domain: &str, query: &str) -> Result<Vec<String>> {
        let registry = SubdomainRegistry::new();
        let mut start_index = 1;

        while start_index < RESULT_CEILING {
            if Instant::now() >= deadline {
                return Err(DorkerError::Timeout);
            }

            trace!(
                "Searching page starting at index: {} for domain: {} via {}",
                start_index,
                domain,
                self.client.name()
            );
            let page = self.client.search(query, start_index, PAGE_SIZE).await?;

            if page.items.is_empty() {
                break;
            }

            for item in &page.items {
                if self.extract_subdomains {
                    self.record_subdomain(&registry, domain, &item.url);
                }
                info!("Found: {}", item.url);
            }

            start_index += PAGE_SIZE;
            if page.items.len() < PAGE_SIZE as usize || start_index >= RESULT_CEILING {
                break;
            }

            self.pacer.pause().await;
        }

        debug!("{} subdomains recorded for {}", registry.len(), domain);
        Ok(registry.snapshot())
    }

    fn record_subdomain(&self, registry: &SubdomainRegistry, domain: &str, url: &str) {
        match extract_hostname(url) {
            Some(host) if is_subdomain_of(&host, domain) => {
                if registry.add(host.clone()) {
                    debug!("Found subdomain: {}", host);
                }
            }
            Some(_) => {}
            None => debug!("Failed to parse URL {}", url),
        }
    }
}
