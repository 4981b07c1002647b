//! The CATMAID data source: the entry point used by the rest of the viewer.
//!
//! # Example
//!
//! ```ignore
//! use catmaid_source::{CatmaidDataSource, ClientConfig};
//!
//! let source = CatmaidDataSource::from_config(&ClientConfig::default())?;
//!
//! // Address bar completion
//! let completions = source.volume_completer("https://catmaid.example.org/1/").await?;
//!
//! // Open a stack through its mirror
//! let volume = source.get_volume("https://catmaid.example.org/1/3/7").await?;
//! let levels = volume.get_sources(source.chunk_manager())?;
//! ```

use std::sync::Arc;

use tracing::info;

use crate::completion::{apply_completion_offset, CompletionResult};
use crate::config::ClientConfig;
use crate::error::{CatmaidError, EntityKind, Result};
use crate::metadata::{MetadataFetcher, ProjectsList};
use crate::pyramid::{ChunkManager, ChunkSource, ChunkSourceParameters, MultiscaleVolume};
use crate::resolver::{complete_path, hostnames_with_prefix, split_address, split_trailing};
use crate::transport::{AsyncHttpClient, ReqwestClient};

/// Parameters of a skeleton source for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonSourceParameters {
    /// Server the project lives on, including any path prefix.
    pub catmaid_server_url: String,
    pub project_id: i64,
}

impl ChunkSourceParameters for SkeletonSourceParameters {
    const RPC_ID: &'static str = "catmaid/SkeletonSource";
    type Spec = ();
}

/// Resolves CATMAID addresses into volumes, skeleton sources and completions.
pub struct CatmaidDataSource<C: AsyncHttpClient> {
    fetcher: MetadataFetcher<C>,
    chunk_manager: ChunkManager,
}

impl CatmaidDataSource<ReqwestClient> {
    /// Creates a data source talking to real servers over HTTP.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_config(ReqwestClient::with_config(config)?, config))
    }
}

impl<C: AsyncHttpClient> CatmaidDataSource<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_config(http_client, &ClientConfig::default())
    }

    pub fn with_config(http_client: C, config: &ClientConfig) -> Self {
        Self {
            fetcher: MetadataFetcher::with_config(http_client, config),
            chunk_manager: ChunkManager::new(),
        }
    }

    pub fn description(&self) -> &'static str {
        "CATMAID"
    }

    pub fn fetcher(&self) -> &MetadataFetcher<C> {
        &self.fetcher
    }

    pub fn chunk_manager(&self) -> &ChunkManager {
        &self.chunk_manager
    }

    /// Opens the stack addressed by `url`, which must end in
    /// `<project>/<stack>/<mirror>`.
    ///
    /// The mirror id is only checked when sources are requested from the
    /// returned volume.
    pub async fn get_volume(&self, url: &str) -> Result<MultiscaleVolume> {
        let split = split_address(url)?;
        let (hostnames, ids) = split_trailing(&split.servers, split.require_path()?, 3)?;
        let (project_id, stack_id, mirror_id) = (ids[0], ids[1], ids[2]);

        let hostname = first_hostname(&hostnames)?;
        let stack_info = self
            .fetcher
            .get_stack_info(hostname, project_id, stack_id)
            .await?;

        info!(
            hostname = %hostname,
            project_id = %project_id,
            stack_id = %stack_id,
            mirror_id = %mirror_id,
            "Resolved CATMAID volume"
        );
        Ok(MultiscaleVolume::new(
            hostname.to_string(),
            stack_info,
            mirror_id.to_string(),
        ))
    }

    /// Completions for the last path segment of `url`.
    ///
    /// Offsets are relative to the start of `url`.
    pub async fn volume_completer(&self, url: &str) -> Result<CompletionResult> {
        let split = split_address(url)?;
        let path = split.require_path()?;
        let completion = complete_path(&self.fetcher, &split.servers, path).await?;
        Ok(apply_completion_offset(
            split.prefix_len + 1,
            completion.result,
        ))
    }

    /// Skeleton source for the project addressed by `url`, which must end
    /// in `<project>`.
    pub async fn get_skeleton_source(
        &self,
        url: &str,
    ) -> Result<Arc<ChunkSource<SkeletonSourceParameters>>> {
        let split = split_address(url)?;
        let (hostnames, ids) = split_trailing(&split.servers, split.require_path()?, 1)?;
        let project_id = ids[0];

        let projects = self.fetcher.get_projects_list(&hostnames).await?;
        let project = projects
            .get(project_id)
            .ok_or_else(|| CatmaidError::not_found(EntityKind::Project, project_id))?;

        let parameters = SkeletonSourceParameters {
            catmaid_server_url: first_hostname(&hostnames)?.to_string(),
            project_id: project.id,
        };
        Ok(self.chunk_manager.get_chunk_source((), parameters))
    }

    /// Projects served at `url`, which names the server(s) and an optional
    /// path prefix.
    pub async fn get_projects_list(&self, url: &str) -> Result<Arc<ProjectsList>> {
        let split = split_address(url)?;
        let segments: Vec<&str> = split
            .path
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let hostnames = hostnames_with_prefix(&split.servers, &segments);
        self.fetcher.get_projects_list(&hostnames).await
    }
}

fn first_hostname(hostnames: &[String]) -> Result<&str> {
    hostnames
        .first()
        .map(String::as_str)
        .ok_or_else(|| CatmaidError::Address("no server hostname given".to_string()))
}
