// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Runtime settings for one run, built once at startup and handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Free-text part of the dork, appended after the `site:` scope.
    pub query: String,
    pub extract_subdomains: bool,
    pub concurrency: usize,
    /// Wall-clock budget shared by every domain search of the run.
    pub timeout: Duration,
    pub page_delay: Duration,
    pub http_timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: String::new(),
            extract_subdomains: false,
            concurrency: 10,
            timeout: Duration::from_secs(5 * 60),
            page_delay: Duration::from_secs(1),
            http_timeout: Duration::from_secs(30),
            user_agent: format!("RustDorker/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
    Csv,
}

/// Credential pools read from the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "Google-API", default)]
    pub google_api: Vec<String>,
    #[serde(rename = "Google-CSE-ID", default)]
    pub google_cse_id: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub engine_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// One page of results for a (query, start index) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,
    pub has_more: bool,
}

/// Terminal result of one domain's search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { domain: String, subdomains: Vec<String> },
    Failed { domain: String, error: String },
}

impl SearchOutcome {
    pub fn domain(&self) -> &str {
        match self {
            SearchOutcome::Found { domain, .. } | SearchOutcome::Failed { domain, .. } => domain,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchOutcome::Failed { .. })
    }
}

/// Domain to sorted subdomains. Domains whose search failed are absent.
pub type AggregatedResults = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum DorkerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Search timeout")]
    Timeout,

    #[error("Search routine panic: {0}")]
    TaskPanic(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}
