//! Memoizing fetcher for project lists and stack info.
//!
//! Responses are memoized in `moka::future::Cache` tables keyed by the shape
//! of the request. `try_get_with` gives the two properties the resolver
//! relies on:
//!
//! - Concurrent calls with the same key share a single in-flight request,
//!   and every waiter observes the same result or failure.
//! - A failed request is never inserted, so the next identical call fetches
//!   again from scratch.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use serde_json::Value;
use tracing::debug;

use super::parse::{parse_projects_list, parse_stack_info};
use super::types::{ProjectsList, StackInfo};
use crate::config::ClientConfig;
use crate::error::{CatmaidError, Result};
use crate::transport::{sharded_url, AsyncHttpClient};

/// Memo key for a stack info request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StackInfoKey {
    hostname: String,
    project_id: String,
    stack_id: String,
}

/// Fetches and memoizes CATMAID metadata.
pub struct MetadataFetcher<C: AsyncHttpClient> {
    http_client: C,
    projects: MokaCache<Vec<String>, Arc<ProjectsList>>,
    stack_info: MokaCache<StackInfoKey, Arc<StackInfo>>,
}

impl<C: AsyncHttpClient> MetadataFetcher<C> {
    /// Creates a fetcher with default memo capacity.
    pub fn new(http_client: C) -> Self {
        Self::with_config(http_client, &ClientConfig::default())
    }

    /// Creates a fetcher whose memo tables hold up to
    /// `config.metadata_entries` responses each.
    pub fn with_config(http_client: C, config: &ClientConfig) -> Self {
        Self {
            http_client,
            projects: MokaCache::new(config.metadata_entries),
            stack_info: MokaCache::new(config.metadata_entries),
        }
    }

    /// The underlying HTTP client.
    pub fn http_client(&self) -> &C {
        &self.http_client
    }

    /// Lists the projects served by `hostnames`.
    ///
    /// `hostnames` are equivalent servers; the request goes to one of them.
    pub async fn get_projects_list(&self, hostnames: &[String]) -> Result<Arc<ProjectsList>> {
        self.projects
            .try_get_with(hostnames.to_vec(), async {
                let url = sharded_url(hostnames, "/projects/")?;
                let raw = self.fetch_json(&url).await?;
                parse_projects_list(&raw).map(Arc::new)
            })
            .await
            .map_err(|e| {
                debug!(hostnames = ?hostnames, error = %e, "Project list request failed");
                CatmaidError::clone(&e)
            })
    }

    /// Fetches the full description of one stack.
    pub async fn get_stack_info(
        &self,
        hostname: &str,
        project_id: &str,
        stack_id: &str,
    ) -> Result<Arc<StackInfo>> {
        let key = StackInfoKey {
            hostname: hostname.to_string(),
            project_id: project_id.to_string(),
            stack_id: stack_id.to_string(),
        };

        self.stack_info
            .try_get_with(key, async {
                let path = format!("/{}/stack/{}/info", project_id, stack_id);
                let url = sharded_url(&[hostname.to_string()], &path)?;
                let raw = self.fetch_json(&url).await?;
                parse_stack_info(&raw).map(Arc::new)
            })
            .await
            .map_err(|e| {
                debug!(
                    hostname = %hostname,
                    project_id = %project_id,
                    stack_id = %stack_id,
                    error = %e,
                    "Stack info request failed"
                );
                CatmaidError::clone(&e)
            })
    }

    async fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!(url = %url, "Fetching CATMAID metadata");
        let body = self.http_client.get(url).await?;
        serde_json::from_slice(&body)
            .map_err(|e| CatmaidError::Transport(format!("invalid JSON from {}: {}", url, e)))
    }
}
