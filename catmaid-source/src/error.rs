//! Error types shared by every stage of the data source.

use std::fmt;

use thiserror::Error;

/// Result type for data source operations.
pub type Result<T> = std::result::Result<T, CatmaidError>;

/// Kind of identifier that failed a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Stack,
    Mirror,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Project => write!(f, "project"),
            EntityKind::Stack => write!(f, "stack"),
            EntityKind::Mirror => write!(f, "mirror"),
        }
    }
}

/// Errors produced while resolving, fetching or parsing CATMAID metadata.
///
/// The type is `Clone` because a failed metadata request is handed to every
/// caller that was waiting on the same in-flight fetch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatmaidError {
    /// Server response did not have the expected shape.
    #[error("{0}")]
    Validation(String),

    /// Server returned an empty project list.
    #[error("no projects found on CATMAID server")]
    NoProjects,

    /// A project, stack or mirror id is absent from an otherwise valid collection.
    #[error("{kind} {id:?} not found")]
    NotFound { kind: EntityKind, id: String },

    /// The input address cannot be split into the expected parts.
    #[error("invalid CATMAID address: {0}")]
    Address(String),

    /// Network failure, HTTP error status or undecodable body.
    #[error("transport error: {0}")]
    Transport(String),
}

impl CatmaidError {
    /// Convenience constructor for lookup failures.
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        CatmaidError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CatmaidError::not_found(EntityKind::Mirror, "7");
        assert_eq!(err.to_string(), "mirror \"7\" not found");
    }

    #[test]
    fn test_no_projects_display() {
        assert!(CatmaidError::NoProjects.to_string().contains("no projects"));
    }

    #[test]
    fn test_transport_display() {
        let err = CatmaidError::Transport("HTTP 503".to_string());
        assert_eq!(err.to_string(), "transport error: HTTP 503");
    }
}
