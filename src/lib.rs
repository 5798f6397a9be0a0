// Hearth Voxel Grid
//
// The streaming window of voxel columns that sits under the player: block
// lookups and edits in world coordinates, collision probes, light queries,
// ray casts, and the translate/resize/teardown cycle that keeps the window
// centred while columns stream in and out.
//
// - world::management::ChunkGrid owns the window
// - world::raycast adds selection and obstacle casts to it
// - persistence::ColumnStore receives columns that leave it

// Constants module
pub mod constants;

// Core modules
pub mod error;
pub mod event_system;
pub mod persistence;
pub mod physics;
pub mod world;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{EngineError, EngineResult, ErrorContext, OptionExt};
pub use event_system::{ColumnEvent, LevelEvents};
pub use persistence::{ColumnStore, RegionQueue};
pub use physics::AABB;
pub use world::{
    BlockDef, BlockFace, BlockId, BlockRegistry, ChunkGrid, ColumnPos, LightChannel, Ray,
    RaycastHit, RaycastOutcome, SharedColumn, Voxel, VoxelColumn, VoxelPos,
};

use constants::window::{DEFAULT_LOAD_DISTANCE, DEFAULT_PADDING, MAX_DIMENSION};

/// Window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Slots along x
    pub width: u32,
    /// Slots along z
    pub depth: u32,
    /// World column coordinate of slot (0, 0)
    pub origin_x: i32,
    pub origin_z: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::from_load_distance(DEFAULT_LOAD_DISTANCE, DEFAULT_PADDING)
    }
}

impl GridConfig {
    /// Square window covering `load_distance` columns plus `padding` on each
    /// side of the centre, centred on column (0, 0)
    pub fn from_load_distance(load_distance: u32, padding: u32) -> Self {
        let size = (load_distance + padding) * 2;
        let half = (size / 2) as i32;
        Self {
            width: size,
            depth: size,
            origin_x: -half,
            origin_z: -half,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(anyhow::anyhow!(
                "GridConfig: window dimensions cannot be 0 (got {}x{})",
                self.width,
                self.depth
            ));
        }

        if self.width > MAX_DIMENSION || self.depth > MAX_DIMENSION {
            return Err(anyhow::anyhow!(
                "GridConfig: window {}x{} exceeds maximum of {}x{}",
                self.width,
                self.depth,
                MAX_DIMENSION,
                MAX_DIMENSION
            ));
        }

        log::info!(
            "[GridConfig] Configuration validated: {}x{} columns at ({}, {})",
            self.width,
            self.depth,
            self.origin_x,
            self.origin_z
        );
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> EngineResult<Self> {
        let config: GridConfig = toml::from_str(source).map_err(|e| {
            EngineError::DeserializationError {
                context: "grid config".to_string(),
                error: e.to_string(),
            }
        })?;
        config.validate().map_err(|e| EngineError::InvalidConfig {
            field: "width/depth".to_string(),
            value: format!("{}x{}", config.width, config.depth),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EngineError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&source).with_context(|| format!("loading {}", path.display()))
    }
}
