//! Completion of project, stack and mirror ids.
//!
//! Project and stack values end in `/` so that accepting a completion moves
//! the cursor straight on to the next path level. Mirrors are the last level
//! and complete bare.

use super::prefix::{get_prefix_matches_with_descriptions, CompletionResult};
use crate::metadata::{ProjectInfo, ProjectsList, StackInfo};

/// Completes a partial project id against the server's projects.
pub fn complete_project(partial: &str, projects: &ProjectsList) -> CompletionResult {
    CompletionResult {
        offset: 0,
        completions: get_prefix_matches_with_descriptions(
            partial,
            projects.values(),
            |project| format!("{}/", project.id),
            |project| project.title.clone(),
        ),
    }
}

/// Completes a partial stack id against the stacks of `project`.
pub fn complete_stack(partial: &str, project: &ProjectInfo) -> CompletionResult {
    CompletionResult {
        offset: 0,
        completions: get_prefix_matches_with_descriptions(
            partial,
            project.stacks.values(),
            |stack| format!("{}/", stack.id),
            |stack| format!("{}: {}", stack.title, stack.comment),
        ),
    }
}

/// Completes a partial mirror id, offering mirrors in `position` order.
pub fn complete_mirror(partial: &str, stack_info: &StackInfo) -> CompletionResult {
    CompletionResult {
        offset: 0,
        completions: get_prefix_matches_with_descriptions(
            partial,
            stack_info.mirrors_by_position(),
            |mirror| mirror.id.to_string(),
            |mirror| mirror.title.clone(),
        ),
    }
}
