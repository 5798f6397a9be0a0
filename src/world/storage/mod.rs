//! Column storage - voxels, lightmaps and per-column bookkeeping

mod lightmap;
mod voxel_column;

pub use lightmap::{LightChannel, Lightmap};
pub use voxel_column::{ColumnFlags, InventoryId, SharedColumn, VoxelColumn};
