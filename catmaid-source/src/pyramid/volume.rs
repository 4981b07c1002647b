//! Tile pyramid geometry for a resolved stack mirror.
//!
//! CATMAID serves each z-section as a 2D tile pyramid. Level `L` covers the
//! same area as level 0 with `2^L` coarser sampling in x and y; z is never
//! downsampled.

use std::sync::Arc;

use serde::Serialize;

use super::chunk_source::{ChunkManager, ChunkSource, ChunkSourceParameters};
use crate::error::{CatmaidError, EntityKind, Result};
use crate::metadata::{StackInfo, StackMirror};

/// Reference tile extent used to derive the zoom level count when the
/// server does not report one.
pub const AUTO_ZOOM_REFERENCE_SIZE: f64 = 1024.0;

/// Image encoding of the served tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileEncoding {
    Jpeg,
}

/// Voxel data type of the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Uint8,
}

/// Kind of data the volume holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeType {
    Image,
}

/// Geometry of one pyramid level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeChunkSpecification {
    /// Voxel size at this level, `(x, y, z)`.
    pub voxel_size: [f64; 3],
    /// Chunk extent in voxels: one tile in x/y, one section in z.
    pub chunk_data_size: [u32; 3],
    pub lower_voxel_bound: [i64; 3],
    pub upper_voxel_bound: [i64; 3],
    pub data_type: DataType,
    pub num_channels: u32,
}

/// Parameters for fetching the tiles of one pyramid level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileChunkSourceParameters {
    /// Mirror base URL.
    pub url: String,
    pub encoding: TileEncoding,
    pub zoom_level: u32,
    pub tile_height: u32,
    pub tile_width: u32,
    pub tile_source_type: i64,
}

impl ChunkSourceParameters for TileChunkSourceParameters {
    const RPC_ID: &'static str = "catmaid/TileChunkSource";
    type Spec = VolumeChunkSpecification;
}

/// Mesh data is never served by CATMAID tile stacks, so no value of this
/// type exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSource {}

/// Highest zoom level of the pyramid for `info`.
///
/// A negative stored level count means "derive from the dimensions": the
/// number of halvings needed to bring the larger of x and y down to
/// [`AUTO_ZOOM_REFERENCE_SIZE`]. Stacks already smaller than that get a
/// single level.
pub fn top_zoom_level(info: &StackInfo) -> u32 {
    if info.zoom_levels >= 0 {
        return u32::try_from(info.zoom_levels).unwrap_or(u32::MAX);
    }

    let [x, y, _] = info.dimension;
    let levels = f64::max(
        (x as f64 / AUTO_ZOOM_REFERENCE_SIZE).log2(),
        (y as f64 / AUTO_ZOOM_REFERENCE_SIZE).log2(),
    )
    .ceil();

    if levels > 0.0 {
        levels as u32
    } else {
        0
    }
}

/// Geometry of `level` for tiles served by `mirror`.
///
/// The stack translation is not applied: bounds always start
/// at the origin.
pub fn level_specification(
    info: &StackInfo,
    mirror: &StackMirror,
    level: u32,
) -> VolumeChunkSpecification {
    let scale = 2f64.powi(level as i32);
    let [rx, ry, rz] = info.resolution;

    VolumeChunkSpecification {
        voxel_size: [rx * scale, ry * scale, rz],
        chunk_data_size: [mirror.tile_width, mirror.tile_height, 1],
        lower_voxel_bound: [0, 0, 0],
        upper_voxel_bound: info.dimension,
        data_type: DataType::Uint8,
        num_channels: 1,
    }
}

/// A stack viewed through one of its mirrors, as a multiscale volume.
#[derive(Debug, Clone)]
pub struct MultiscaleVolume {
    hostname: String,
    stack_info: Arc<StackInfo>,
    mirror_id: String,
}

impl MultiscaleVolume {
    pub fn new(hostname: String, stack_info: Arc<StackInfo>, mirror_id: String) -> Self {
        Self {
            hostname,
            stack_info,
            mirror_id,
        }
    }

    /// Server the stack metadata was read from.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn stack_info(&self) -> &StackInfo {
        &self.stack_info
    }

    pub fn mirror_id(&self) -> &str {
        &self.mirror_id
    }

    pub fn data_type(&self) -> DataType {
        DataType::Uint8
    }

    pub fn num_channels(&self) -> u32 {
        1
    }

    pub fn volume_type(&self) -> VolumeType {
        VolumeType::Image
    }

    /// The selected mirror.
    pub fn mirror(&self) -> Result<&StackMirror> {
        self.stack_info
            .mirrors
            .get(&self.mirror_id)
            .ok_or_else(|| CatmaidError::not_found(EntityKind::Mirror, self.mirror_id.as_str()))
    }

    /// One single-source group per zoom level, finest first.
    pub fn get_sources(
        &self,
        chunk_manager: &ChunkManager,
    ) -> Result<Vec<Vec<Arc<ChunkSource<TileChunkSourceParameters>>>>> {
        let mirror = self.mirror()?;
        let info = self.stack_info.as_ref();

        let sources = (0..=top_zoom_level(info))
            .map(|level| {
                let spec = level_specification(info, mirror, level);
                let parameters = TileChunkSourceParameters {
                    url: mirror.url.clone(),
                    encoding: TileEncoding::Jpeg,
                    zoom_level: level,
                    tile_height: mirror.tile_height,
                    tile_width: mirror.tile_width,
                    tile_source_type: mirror.tile_source_type,
                };
                vec![chunk_manager.get_chunk_source(spec, parameters)]
            })
            .collect();

        Ok(sources)
    }

    /// Always `None`: meshes are unsupported, which is not an error.
    pub fn get_mesh_source(&self) -> Option<MeshSource> {
        None
    }
}
