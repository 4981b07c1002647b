//! Chunk-source descriptors for CATMAID tile pyramids.
//!
//! # Example
//!
//! ```ignore
//! use catmaid_source::pyramid::{ChunkManager, MultiscaleVolume};
//!
//! let manager = ChunkManager::new();
//! let volume = MultiscaleVolume::new(hostname, stack_info, "1".to_string());
//! for (level, group) in volume.get_sources(&manager)?.iter().enumerate() {
//!     println!("level {}: voxel size {:?}", level, group[0].spec.voxel_size);
//! }
//! ```

mod chunk_source;
mod volume;

pub use chunk_source::{ChunkManager, ChunkSource, ChunkSourceParameters};
pub use volume::{
    level_specification, top_zoom_level, DataType, MeshSource, MultiscaleVolume,
    TileChunkSourceParameters, TileEncoding, VolumeChunkSpecification, VolumeType,
    AUTO_ZOOM_REFERENCE_SIZE,
};
