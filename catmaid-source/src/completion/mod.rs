//! Address-bar completion for CATMAID paths.

mod formatters;
mod prefix;

pub use formatters::{complete_mirror, complete_project, complete_stack};
pub use prefix::{
    apply_completion_offset, get_prefix_matches_with_descriptions, Completion, CompletionResult,
};
