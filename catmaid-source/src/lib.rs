//! catmaid-source - CATMAID tile stacks as multiscale volumes
//!
//! This library connects a volumetric-data viewer to a CATMAID server. It
//! resolves addresses of the form
//! `https://server[/prefix]/<project>/<stack>/<mirror>`, fetches and parses
//! project and stack metadata, and describes each stack mirror as a tiled
//! image pyramid. It also completes partially typed addresses, working out
//! by probing the server which path level is being typed.
//!
//! # Modules
//!
//! - [`datasource`]: public entry point ([`CatmaidDataSource`])
//! - [`resolver`]: address splitting and the completion cascade
//! - [`metadata`]: records, parsers and the memoizing fetcher
//! - [`pyramid`]: chunk-source descriptors per zoom level
//! - [`completion`]: prefix matching and completion results
//! - [`transport`]: HTTP client abstraction
//! - [`config`]: configuration file

pub mod completion;
pub mod config;
pub mod datasource;
pub mod error;
pub mod metadata;
pub mod pyramid;
pub mod resolver;
pub mod transport;

pub use config::{ClientConfig, ConfigFile};
pub use datasource::{CatmaidDataSource, SkeletonSourceParameters};
pub use error::{CatmaidError, EntityKind, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
