//! Voxel Column - the unit of loading and eviction
//!
//! A column spans the full world height. Besides voxels it owns its lightmap,
//! the sparse block-inventory table and the bookkeeping the window and the
//! mesher rely on: the occupied height range and the dirty flags.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::lightmap::Lightmap;
use crate::constants::column::{HEIGHT, LAYER, VOLUME};
use crate::world::core::{voxel_index, ColumnPos, Voxel};
use crate::world::error::WorldError;

/// Column shared between the window and its readers (mesher, light solver)
pub type SharedColumn = Arc<RwLock<VoxelColumn>>;

/// Handle of an inventory owned by the external inventory system
pub type InventoryId = u64;

/// Column dirty/lifecycle flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    /// Content changed since the last save
    pub unsaved: bool,
    /// Content changed since the last mesh build
    pub modified: bool,
    /// Lighting has been computed at least once
    pub lighted: bool,
    /// Lightmap came from storage instead of being computed
    pub loaded_lights: bool,
}

pub struct VoxelColumn {
    pos: ColumnPos,
    voxels: Box<[Voxel]>,
    lightmap: Lightmap,
    inventories: FxHashMap<u32, InventoryId>,
    /// Occupied layers are `[bottom, top)`; `bottom >= top` means no blocks
    bottom: i32,
    top: i32,
    pub flags: ColumnFlags,
}

impl std::fmt::Debug for VoxelColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelColumn")
            .field("pos", &self.pos)
            .field("bottom", &self.bottom)
            .field("top", &self.top)
            .field("inventories", &self.inventories.len())
            .field("flags", &self.flags)
            .finish()
    }
}

impl VoxelColumn {
    /// Column full of air
    pub fn new(pos: ColumnPos) -> Self {
        Self {
            pos,
            voxels: vec![Voxel::AIR; VOLUME].into_boxed_slice(),
            lightmap: Lightmap::new(),
            inventories: FxHashMap::default(),
            bottom: HEIGHT,
            top: 0,
            flags: ColumnFlags::default(),
        }
    }

    /// Column from generated or loaded voxel data, y-major
    pub fn from_voxels(pos: ColumnPos, voxels: Vec<Voxel>) -> Result<Self, WorldError> {
        if voxels.len() != VOLUME {
            return Err(WorldError::VolumeMismatch {
                expected: VOLUME,
                found: voxels.len(),
            });
        }
        let mut column = Self {
            voxels: voxels.into_boxed_slice(),
            ..Self::new(pos)
        };
        column.update_heights();
        Ok(column)
    }

    /// Wrap for sharing with the window
    pub fn into_shared(self) -> SharedColumn {
        Arc::new(RwLock::new(self))
    }

    pub fn pos(&self) -> ColumnPos {
        self.pos
    }

    pub fn voxel(&self, lx: i32, ly: i32, lz: i32) -> Voxel {
        self.voxels[voxel_index(lx, ly, lz)]
    }

    pub fn voxel_mut(&mut self, lx: i32, ly: i32, lz: i32) -> &mut Voxel {
        &mut self.voxels[voxel_index(lx, ly, lz)]
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Bulk access for generators; call `update_heights` afterwards
    pub fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    /// Write a voxel, keep the height range current and mark the column dirty
    ///
    /// Placing a block widens the range in O(1). Clearing a block rescans the
    /// column only when the cleared layer sits on the current bound.
    pub fn replace(&mut self, lx: i32, ly: i32, lz: i32, voxel: Voxel) -> Voxel {
        let cell = &mut self.voxels[voxel_index(lx, ly, lz)];
        let previous = *cell;
        *cell = voxel;

        if !voxel.id.is_air() {
            self.bottom = self.bottom.min(ly);
            self.top = self.top.max(ly + 1);
        } else if ly == self.bottom || ly + 1 == self.top {
            self.update_heights();
        }

        self.flags.unsaved = true;
        self.flags.modified = true;
        previous
    }

    /// Recompute `[bottom, top)` from scratch
    pub fn update_heights(&mut self) {
        let first = self.voxels.iter().position(|v| !v.id.is_air());
        let last = self.voxels.iter().rposition(|v| !v.id.is_air());
        match (first, last) {
            (Some(first), Some(last)) => {
                self.bottom = (first / LAYER) as i32;
                self.top = (last / LAYER) as i32 + 1;
            }
            _ => {
                self.bottom = HEIGHT;
                self.top = 0;
            }
        }
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    /// True when the column holds no blocks
    pub fn is_empty(&self) -> bool {
        self.bottom >= self.top
    }

    pub fn lightmap(&self) -> &Lightmap {
        &self.lightmap
    }

    pub fn lightmap_mut(&mut self) -> &mut Lightmap {
        &mut self.lightmap
    }

    pub fn is_unsaved(&self) -> bool {
        self.flags.unsaved
    }

    pub fn set_unsaved(&mut self, unsaved: bool) {
        self.flags.unsaved = unsaved;
    }

    pub fn is_modified(&self) -> bool {
        self.flags.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.flags.modified = modified;
    }

    pub fn is_lighted(&self) -> bool {
        self.flags.lighted
    }

    pub fn set_lighted(&mut self, lighted: bool) {
        self.flags.lighted = lighted;
    }

    pub fn is_loaded_lights(&self) -> bool {
        self.flags.loaded_lights
    }

    pub fn set_loaded_lights(&mut self, loaded: bool) {
        self.flags.loaded_lights = loaded;
    }

    /// Attach an inventory to a block position, returning any it replaced
    pub fn add_block_inventory(
        &mut self,
        lx: i32,
        ly: i32,
        lz: i32,
        inventory: InventoryId,
    ) -> Option<InventoryId> {
        self.flags.unsaved = true;
        self.inventories
            .insert(voxel_index(lx, ly, lz) as u32, inventory)
    }

    pub fn block_inventory(&self, lx: i32, ly: i32, lz: i32) -> Option<InventoryId> {
        self.inventories.get(&(voxel_index(lx, ly, lz) as u32)).copied()
    }

    /// Detach the inventory at a block position
    pub fn remove_block_inventory(&mut self, lx: i32, ly: i32, lz: i32) -> Option<InventoryId> {
        let removed = self.inventories.remove(&(voxel_index(lx, ly, lz) as u32));
        if removed.is_some() {
            self.flags.unsaved = true;
        }
        removed
    }

    pub fn inventory_count(&self) -> usize {
        self.inventories.len()
    }
}
