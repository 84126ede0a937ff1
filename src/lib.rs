// src/lib.rs
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod pacing;
pub mod query;
pub mod registry;
pub mod search;
pub mod searcher;
pub mod session;
pub mod types;
pub mod utils;

pub use cli::Args;
pub use engine::DorkEngine;
pub use query::build_query;
pub use registry::SubdomainRegistry;
pub use search::{GoogleSearchClient, SearchClient};
pub use searcher::DomainSearcher;
pub use types::{AggregatedResults, Config, DorkerError, SearchOutcome};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
