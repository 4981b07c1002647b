//! HTTP client abstraction for testability

use std::collections::hash_map::DefaultHasher;
use std::future::Future;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{CatmaidError, Result};

/// Trait for async HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    ///
    /// Any failure, including a non-success status, is reported as
    /// [`CatmaidError::Transport`].
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a new ReqwestClient using the timeout and user agent from `config`.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                CatmaidError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = %url, "HTTP GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatmaidError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatmaidError::Transport(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| CatmaidError::Transport(format!("Failed to read response: {}", e)))
    }
}

/// Builds a request URL against one of several equivalent servers.
///
/// The server is chosen from a hash of `path`, so repeated requests for the
/// same resource always go to the same server while distinct resources are
/// spread across all of them.
pub fn sharded_url(hostnames: &[String], path: &str) -> Result<String> {
    if hostnames.is_empty() {
        return Err(CatmaidError::Address("no server hostname given".to_string()));
    }

    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    let index = (hasher.finish() % hostnames.len() as u64) as usize;

    Ok(format!("{}{}", hostnames[index].trim_end_matches('/'), path))
}
