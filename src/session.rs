// src/session.rs
use crate::types::{Config, DorkerError};
use reqwest::Client;
use std::time::Duration;

/// Shared HTTP plumbing for search clients.
#[derive(Clone)]
pub struct Session {
    pub client: Client,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, DorkerError> {
        let mut client_builder = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.concurrency.max(1));

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| DorkerError::ConfigError(format!("Invalid proxy URL: {}", e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder
            .build()
            .map_err(|e| DorkerError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Session { client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = Config {
            proxy: Some("not a proxy url".to_string()),
            ..Config::default()
        };
        assert!(matches!(Session::new(&config), Err(DorkerError::ConfigError(_))));
    }

    #[test]
    fn test_socks_proxy_accepted() {
        let config = Config {
            proxy: Some("socks5://127.0.0.1:9050".to_string()),
            ..Config::default()
        };
        assert!(Session::new(&config).is_ok());
    }
}
