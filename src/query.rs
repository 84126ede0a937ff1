// src/query.rs

/// Compose the dork sent to the search engine for `domain`.
///
/// A non-empty free-text query without a domain is passed through unscoped.
pub fn build_query(domain: &str, free_text: &str) -> String {
    match (domain.is_empty(), free_text.is_empty()) {
        (false, false) => format!("site:{} {}", domain, free_text),
        (true, false) => free_text.to_string(),
        _ => format!("site:{}", domain),
    }
}
