//! Typed records for CATMAID project and stack metadata.

use std::collections::BTreeMap;

/// Projects on a server, keyed by stringified project id.
pub type ProjectsList = BTreeMap<String, ProjectInfo>;

/// Lightweight stack descriptor as listed under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackIdentifier {
    pub id: i64,
    pub title: String,
    pub comment: String,
}

/// A project and the stacks it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub id: i64,
    pub title: String,
    /// Stacks keyed by stringified stack id.
    pub stacks: BTreeMap<String, StackIdentifier>,
}

/// One network location serving tiles for a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackMirror {
    pub id: i64,
    pub title: String,
    pub file_extension: String,
    pub tile_height: u32,
    pub tile_width: u32,
    /// CATMAID tile source type code (URL layout of the tiles).
    pub tile_source_type: i64,
    /// Base URL for tile fetches.
    pub url: String,
    /// Display order among the stack's mirrors.
    pub position: i64,
}

/// Full description of a stack.
///
/// All vectors are ordered `(x, y, z)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackInfo {
    /// Extent in voxels.
    pub dimension: [i64; 3],
    pub translation: [i64; 3],
    /// Voxel size in nanometers.
    pub resolution: [f64; 3],
    /// Highest zoom level, or a negative value when it must be derived from
    /// the stack dimensions.
    pub zoom_levels: i64,
    pub id: i64,
    /// Mirrors keyed by stringified mirror id.
    pub mirrors: BTreeMap<String, StackMirror>,
}

impl StackInfo {
    /// Mirrors ordered by ascending `position`.
    pub fn mirrors_by_position(&self) -> Vec<&StackMirror> {
        let mut mirrors: Vec<&StackMirror> = self.mirrors.values().collect();
        mirrors.sort_by_key(|mirror| mirror.position);
        mirrors
    }
}
