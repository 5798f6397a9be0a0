//! World Module
//!
//! # Architecture Overview
//!
//! - **Core**: Fundamental data types (BlockId, Voxel, positions, Ray) and the block registry
//! - **Blocks**: Block definitions and their hitbox shapes
//! - **Storage**: Voxel columns and their lightmaps
//! - **Management**: The streaming window of loaded columns
//! - **Raycast**: Selection and obstacle casts through the window
//! - **Lighting**: Light lookups in world coordinates

pub mod blocks;
pub mod core;
pub mod error;
pub mod lighting;
pub mod management;
pub mod raycast;
pub mod storage;

// Re-export core types for convenience
pub use self::core::{
    floor_div, BlockFace, BlockId, BlockRegistry, ColumnPos, Ray, RaycastHit, RaycastOutcome,
    Voxel, VoxelPos,
};

pub use blocks::{register_basic_blocks, BlockDef, BlockShape};
pub use error::{WorldError, WorldResult};
pub use management::ChunkGrid;
pub use storage::{LightChannel, Lightmap, SharedColumn, VoxelColumn};
