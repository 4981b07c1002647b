//! CATMAID project and stack metadata.
//!
//! - typed records ([`ProjectInfo`], [`StackInfo`], ...)
//! - [`verify`]: JSON shape verification helpers
//! - [`parse`]: conversion of raw responses into records
//! - [`MetadataFetcher`]: memoized requests against a server

mod fetcher;
pub mod parse;
mod types;
pub mod verify;

pub use fetcher::MetadataFetcher;
pub use parse::{parse_projects_list, parse_stack_info, parse_stack_mirror};
pub use types::{ProjectInfo, ProjectsList, StackIdentifier, StackInfo, StackMirror};
