//! Endpoints, timeouts and cache lifetimes for the remote sources.

use crate::error::Result;
use std::time::Duration;

/// Where a client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Talk to the provider's own API, passing the key through untouched
    Direct {
        base_url: String,
        api_key: Option<String>,
    },
    /// Talk to a proxy that holds the key and forwards requests
    Proxy { base_url: String },
}

impl Endpoint {
    pub fn base_url(&self) -> &str {
        let url = match self {
            Endpoint::Direct { base_url, .. } => base_url,
            Endpoint::Proxy { base_url } => base_url,
        };
        url.trim_end_matches('/')
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, Endpoint::Proxy { .. })
    }
}

/// Settings shared by the remote clients
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// TMDB API root
    pub tmdb_url: String,
    /// Google Books API root
    pub google_books_url: String,
    /// Per-request timeout; a timeout counts as a remote failure
    pub timeout: Duration,
    /// How long a successful query result is reused
    pub result_ttl: Duration,
    /// How long the TMDB genre list is reused
    pub genre_ttl: Duration,
    /// Books kept per Google Books response
    pub books_max_results: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            tmdb_url: "https://api.themoviedb.org".to_string(),
            google_books_url: "https://www.googleapis.com".to_string(),
            timeout: Duration::from_secs(15),
            result_ttl: Duration::from_secs(10 * 60),
            genre_ttl: Duration::from_secs(60 * 60),
            books_max_results: 20,
        }
    }
}

impl RemoteConfig {
    /// HTTP client with this config's timeout
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let proxy = Endpoint::Proxy {
            base_url: "https://proxy.example/".to_string(),
        };
        assert_eq!(proxy.base_url(), "https://proxy.example");
        assert!(proxy.is_proxy());
    }

    #[test]
    fn test_defaults() {
        let config = RemoteConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.result_ttl, Duration::from_secs(600));
        assert!(config.http_client().is_ok());
    }
}
