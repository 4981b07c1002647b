//! Incremental completion of CATMAID paths by speculative probing.
//!
//! A partially typed path does not say how deep it is: in
//! `http://host/a/b` the segment `b` might be a project id being typed
//! (with `a` a server path prefix), a stack id under project `a`, or the
//! start of a longer path. The cascade tries the shallowest reading first
//! and moves one level deeper each time the server rejects a reading:
//!
//! ```text
//! Project  hostnames = servers + segments[..n-1]    GET /projects/
//!    │ failure
//!    ▼
//! Stack    hostnames = servers + segments[..n-2]    GET /projects/, look up segments[n-2]
//!    │ failure
//!    ▼
//! Mirror   hostname  = server  + segments[..n-3]    GET /{n-3}/stack/{n-2}/info
//!    │ failure
//!    ▼
//! error of the deepest attempt
//! ```
//!
//! Every failure is treated alike, whether transport, validation or a
//! missing id. A reading is only tried when the path has enough segments
//! for it.

use tracing::debug;

use super::address::hostnames_with_prefix;
use crate::completion::{
    apply_completion_offset, complete_mirror, complete_project, complete_stack,
    CompletionResult,
};
use crate::error::{CatmaidError, EntityKind, Result};
use crate::metadata::MetadataFetcher;
use crate::transport::AsyncHttpClient;

/// Which path level the last segment is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Project,
    Stack,
    Mirror,
}

impl Interpretation {
    /// Readings in the order they are tried.
    pub const CASCADE: [Interpretation; 3] = [
        Interpretation::Project,
        Interpretation::Stack,
        Interpretation::Mirror,
    ];

    /// Number of trailing path segments this reading consumes.
    pub fn segment_count(self) -> usize {
        match self {
            Interpretation::Project => 1,
            Interpretation::Stack => 2,
            Interpretation::Mirror => 3,
        }
    }
}

/// Completions for a path, tagged with the reading that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCompletion {
    pub interpretation: Interpretation,
    /// Completions with offsets relative to the start of the path.
    pub result: CompletionResult,
}

/// Completes the last segment of `path` against the servers `servers`.
///
/// `path` is everything after the server list and its separating slash.
pub async fn complete_path<C: AsyncHttpClient>(
    fetcher: &MetadataFetcher<C>,
    servers: &[String],
    path: &str,
) -> Result<PathCompletion> {
    let segments: Vec<&str> = path.split('/').collect();
    let partial = segments.last().copied().unwrap_or_default();
    let offset = path.len() - partial.len();

    let mut last_error = None;
    for interpretation in Interpretation::CASCADE {
        if segments.len() < interpretation.segment_count() {
            break;
        }

        match try_interpretation(fetcher, servers, &segments, interpretation).await {
            Ok(result) => {
                debug!(?interpretation, path = %path, "Path completion resolved");
                return Ok(PathCompletion {
                    interpretation,
                    result: apply_completion_offset(offset, result),
                });
            }
            Err(e) => {
                debug!(?interpretation, path = %path, error = %e, "Path reading rejected");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        CatmaidError::Address(format!("no path segments to complete in {:?}", path))
    }))
}

async fn try_interpretation<C: AsyncHttpClient>(
    fetcher: &MetadataFetcher<C>,
    servers: &[String],
    segments: &[&str],
    interpretation: Interpretation,
) -> Result<CompletionResult> {
    let (prefix, trailing) = segments.split_at(segments.len() - interpretation.segment_count());
    let hostnames = hostnames_with_prefix(servers, prefix);

    match *trailing {
        [partial] => {
            let projects = fetcher.get_projects_list(&hostnames).await?;
            Ok(complete_project(partial, &projects))
        }
        [project_id, partial] => {
            let projects = fetcher.get_projects_list(&hostnames).await?;
            let project = projects
                .get(project_id)
                .ok_or_else(|| CatmaidError::not_found(EntityKind::Project, project_id))?;
            Ok(complete_stack(partial, project))
        }
        [project_id, stack_id, partial] => {
            let hostname = hostnames.first().ok_or_else(|| {
                CatmaidError::Address("no server hostname given".to_string())
            })?;
            let stack_info = fetcher.get_stack_info(hostname, project_id, stack_id).await?;
            Ok(complete_mirror(partial, &stack_info))
        }
        _ => unreachable!("interpretations consume one to three segments"),
    }
}
