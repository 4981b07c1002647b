//! Shared setup for commands that talk to a CATMAID server.

use std::future::Future;

use catmaid_source::transport::ReqwestClient;
use catmaid_source::{CatmaidDataSource, ConfigFile};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::error::CliError;

/// Loaded configuration, an async runtime and a data source built from both.
pub struct CliRunner {
    config: ConfigFile,
    runtime: Runtime,
    source: CatmaidDataSource<ReqwestClient>,
}

impl CliRunner {
    /// Load the configuration and build the HTTP data source.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let source = CatmaidDataSource::from_config(&config.client_config())?;
        let runtime = Runtime::new().map_err(CliError::Runtime)?;

        debug!(
            timeout_secs = config.timeout_secs,
            user_agent = %config.user_agent,
            "CLI runner initialized"
        );
        Ok(Self {
            config,
            runtime,
            source,
        })
    }

    pub fn source(&self) -> &CatmaidDataSource<ReqwestClient> {
        &self.source
    }

    /// Drive `future` to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Full address for `input`, using `server` or the configured server
    /// when `input` has no scheme.
    pub fn resolve_address(&self, server: Option<&str>, input: &str) -> Result<String, CliError> {
        crate::commands::common::resolve_address(
            input,
            server.or(self.config.server_url.as_deref()),
        )
    }
}
