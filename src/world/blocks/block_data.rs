//! Block Data
//!
//! Block definitions as read by the grid and the ray caster. Geometry is a
//! closed set of shapes, so it is a tagged enum matched at the use site.

use serde::{Deserialize, Serialize};

use crate::physics::{AABB, UNIT_AABB};

static UNIT_BOXES: [AABB; 1] = [UNIT_AABB];

/// Hitbox geometry of a block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "boxes", rename_all = "snake_case")]
pub enum BlockShape {
    /// Full solid cube; rays stop on the cell boundary
    #[default]
    Cube,
    /// Custom boxes, same for every rotation
    Boxes(Vec<AABB>),
    /// Custom boxes per rotation index
    Rotated(Vec<Vec<AABB>>),
}

fn default_true() -> bool {
    true
}

/// Block definition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDef {
    pub name: String,
    /// Stops movement
    #[serde(default = "default_true")]
    pub obstacle: bool,
    /// Can be picked by the selection ray
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Placing another block here overwrites it
    #[serde(default)]
    pub replaceable: bool,
    /// Slots of the per-position inventory, 0 for none
    #[serde(default)]
    pub inventory_size: u16,
    #[serde(default)]
    pub shape: BlockShape,
}

impl BlockDef {
    /// Solid cube that blocks movement and can be selected
    pub fn cube(name: &str) -> Self {
        Self {
            name: name.to_string(),
            obstacle: true,
            selectable: true,
            replaceable: false,
            inventory_size: 0,
            shape: BlockShape::Cube,
        }
    }

    /// Non-solid block with a fixed hitbox list
    pub fn custom(name: &str, boxes: Vec<AABB>) -> Self {
        Self {
            shape: BlockShape::Boxes(boxes),
            ..Self::cube(name)
        }
    }

    /// Non-solid block with one hitbox list per rotation index
    pub fn rotated(name: &str, rotations: Vec<Vec<AABB>>) -> Self {
        Self {
            shape: BlockShape::Rotated(rotations),
            ..Self::cube(name)
        }
    }

    /// Empty space: no geometry, never selected, always replaceable
    pub fn air() -> Self {
        Self {
            name: "air".to_string(),
            obstacle: false,
            selectable: false,
            replaceable: true,
            inventory_size: 0,
            shape: BlockShape::Boxes(Vec::new()),
        }
    }

    pub fn with_obstacle(mut self, obstacle: bool) -> Self {
        self.obstacle = obstacle;
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_replaceable(mut self, replaceable: bool) -> Self {
        self.replaceable = replaceable;
        self
    }

    pub fn with_inventory(mut self, size: u16) -> Self {
        self.inventory_size = size;
        self
    }

    pub fn solid(&self) -> bool {
        matches!(self.shape, BlockShape::Cube)
    }

    pub fn rotatable(&self) -> bool {
        matches!(self.shape, BlockShape::Rotated(_))
    }

    /// Hitboxes for a voxel in the given rotation, in cell-local units
    ///
    /// Out-of-range rotation indices fall back to rotation 0.
    pub fn hitboxes(&self, rotation: u8) -> &[AABB] {
        match &self.shape {
            BlockShape::Cube => &UNIT_BOXES[..],
            BlockShape::Boxes(boxes) => boxes.as_slice(),
            BlockShape::Rotated(rotations) => rotations
                .get(rotation as usize)
                .or_else(|| rotations.first())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Number of rotation-specific hitbox lists
    pub fn rotation_count(&self) -> usize {
        match &self.shape {
            BlockShape::Rotated(rotations) => rotations.len(),
            _ => 1,
        }
    }
}
