//! Core world data types and fundamental structures
//!
//! Block ids and voxels, coordinate mapping, rays and the block registry.

mod block;
pub mod position;
mod ray;
mod registry;

pub use block::{BlockId, Voxel};
pub use position::{
    floor_div, map_column, map_voxel, voxel_index, ColumnPos, VoxelPos, VoxelSlot, WindowBounds,
};
pub use ray::{BlockFace, Ray, RaycastHit, RaycastOutcome};
pub use registry::BlockRegistry;
