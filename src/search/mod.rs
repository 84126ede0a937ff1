// src/search/mod.rs
use crate::error::Result;
use crate::types::SearchPage;
use async_trait::async_trait;

mod google;
#[cfg(test)]
pub(crate) mod stubs;

pub use google::{GoogleSearchClient, DEFAULT_BASE_URL};

/// Anything that can return one page of search results.
///
/// `start` is 1-based, `num` is the page size requested.
#[async_trait]
pub trait SearchClient: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, query: &str, start: u32, num: u32) -> Result<SearchPage>;
}
