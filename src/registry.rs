// src/registry.rs
use std::collections::BTreeSet;
use std::sync::RwLock;

/// Deduplicating, sorted set of discovered hostnames.
///
/// Each domain search owns one, but every method takes `&self` so an instance
/// can be shared behind an `Arc` as well.
#[derive(Debug, Default)]
pub struct SubdomainRegistry {
    items: RwLock<BTreeSet<String>>,
}

impl SubdomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the hostname was not seen before.
    pub fn add(&self, hostname: impl Into<String>) -> bool {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.insert(hostname.into())
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Ascending, duplicate-free copy of everything added so far.
    pub fn snapshot(&self) -> Vec<String> {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        items.iter().cloned().collect()
    }
}
