//! Chunk Grid - the sliding window of loaded columns
//!
//! A `width x depth` array of column slots placed over the infinite world at
//! `(origin_x, origin_z)` column units. Slot `(x, z)` holds the column whose
//! world coordinate is `(x + origin_x, z + origin_z)`, or nothing.
//!
//! Reads and writes outside the window or on empty slots are silent no-ops:
//! while the player moves, unloaded data is the normal state of the edges.

use cgmath::Point3;
use parking_lot::{MappedRwLockWriteGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::constants::column::{DEPTH, HEIGHT, WIDTH};
use crate::event_system::{ColumnEvent, LevelEvents};
use crate::persistence::ColumnStore;
use crate::physics::{aabb_contains_point, AABB, EMPTY_AABB};
use crate::world::core::position::slot_in_bounds;
use crate::world::core::{
    floor_div, map_column, map_voxel, BlockId, BlockRegistry, ColumnPos, Voxel, VoxelSlot,
    WindowBounds,
};
use crate::world::storage::SharedColumn;
use crate::GridConfig;

pub struct ChunkGrid {
    columns: Vec<Option<SharedColumn>>,
    /// Reused by `translate` so moving the window never allocates
    scratch: Vec<Option<SharedColumn>>,
    width: u32,
    depth: u32,
    origin_x: i32,
    origin_z: i32,
    loaded: usize,
    registry: Arc<BlockRegistry>,
    store: Option<Box<dyn ColumnStore>>,
    events: LevelEvents,
}

impl ChunkGrid {
    pub fn new(
        width: u32,
        depth: u32,
        origin_x: i32,
        origin_z: i32,
        registry: Arc<BlockRegistry>,
    ) -> Self {
        let volume = width as usize * depth as usize;
        log::debug!(
            "[ChunkGrid::new] {}x{} window at origin ({}, {})",
            width,
            depth,
            origin_x,
            origin_z
        );
        Self {
            columns: vec![None; volume],
            scratch: vec![None; volume],
            width,
            depth,
            origin_x,
            origin_z,
            loaded: 0,
            registry,
            store: None,
            events: LevelEvents::new(),
        }
    }

    pub fn from_config(config: &GridConfig, registry: Arc<BlockRegistry>) -> Self {
        Self::new(
            config.width,
            config.depth,
            config.origin_x,
            config.origin_z,
            registry,
        )
    }

    /// Route evicted and torn-down columns to `store`
    pub fn attach_store(&mut self, store: Box<dyn ColumnStore>) {
        self.store = Some(store);
    }

    pub fn detach_store(&mut self) -> Option<Box<dyn ColumnStore>> {
        self.store.take()
    }

    pub fn events_mut(&mut self) -> &mut LevelEvents {
        &mut self.events
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// World column coordinate of slot `(0, 0)`
    pub fn origin(&self) -> ColumnPos {
        ColumnPos::new(self.origin_x, self.origin_z)
    }

    /// Number of slots
    pub fn volume(&self) -> usize {
        self.columns.len()
    }

    /// Number of occupied slots
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    pub fn bounds(&self) -> WindowBounds {
        WindowBounds {
            width: self.width,
            depth: self.depth,
            origin_x: self.origin_x,
            origin_z: self.origin_z,
        }
    }

    /// Overwrite the origin without moving any column
    ///
    /// Only meaningful on an empty window, e.g. right after `save_and_clear`
    /// when a level is re-entered at a stored position.
    pub fn set_offset(&mut self, origin_x: i32, origin_z: i32) {
        if self.loaded > 0 {
            log::warn!(
                "[ChunkGrid::set_offset] Re-origining a window holding {} columns",
                self.loaded
            );
        }
        self.origin_x = origin_x;
        self.origin_z = origin_z;
    }

    /// Live columns in slot order
    pub fn columns(&self) -> impl Iterator<Item = &SharedColumn> + '_ {
        self.columns.iter().flatten()
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Resolve a world voxel to its slot and loaded column
    pub(crate) fn resolve(&self, x: i32, y: i32, z: i32) -> Option<(VoxelSlot, &SharedColumn)> {
        let slot = map_voxel(x, y, z, &self.bounds())?;
        let column = self.columns[slot.index].as_ref()?;
        Some((slot, column))
    }

    /// Voxel at a world position, `None` when unloaded or outside the window
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        let (slot, column) = self.resolve(x, y, z)?;
        let voxel = column.read().voxels()[slot.voxel_index()];
        Some(voxel)
    }

    /// Write access to a voxel in place
    ///
    /// Unlike `set`, this bypasses height, inventory and dirty-flag upkeep;
    /// the caller owns that bookkeeping.
    pub fn voxel_mut(&mut self, x: i32, y: i32, z: i32) -> Option<MappedRwLockWriteGuard<'_, Voxel>> {
        let (slot, column) = self.resolve(x, y, z)?;
        Some(RwLockWriteGuard::map(column.write(), move |c| {
            c.voxel_mut(slot.lx, slot.ly, slot.lz)
        }))
    }

    /// Column at a world column coordinate
    pub fn column(&self, cx: i32, cz: i32) -> Option<&SharedColumn> {
        let index = map_column(cx, cz, &self.bounds())?;
        self.columns[index].as_ref()
    }

    /// Column containing a world voxel
    pub fn column_by_voxel(&self, x: i32, y: i32, z: i32) -> Option<&SharedColumn> {
        if !(0..HEIGHT).contains(&y) {
            return None;
        }
        self.column(floor_div(x, WIDTH), floor_div(z, DEPTH))
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place a block; ignored outside the window or on an unloaded column
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: BlockId, states: u8) {
        if !(0..HEIGHT).contains(&y) {
            return;
        }
        let Some((slot, column)) = self.resolve(x, y, z) else {
            return;
        };

        {
            let mut column = column.write();
            let previous = column.voxel(slot.lx, slot.ly, slot.lz);
            if self.registry.get(previous.id).inventory_size > 0 {
                column.remove_block_inventory(slot.lx, slot.ly, slot.lz);
            }
            column.replace(slot.lx, slot.ly, slot.lz, Voxel::new(id, states));
        }

        self.mark_edge_neighbours(&slot);
    }

    /// Neighbour meshes sample across the shared face, so edge writes dirty them too
    fn mark_edge_neighbours(&self, slot: &VoxelSlot) {
        if slot.lx == 0 {
            self.mark_modified(slot.cx - 1, slot.cz);
        }
        if slot.lz == 0 {
            self.mark_modified(slot.cx, slot.cz - 1);
        }
        if slot.lx == WIDTH - 1 {
            self.mark_modified(slot.cx + 1, slot.cz);
        }
        if slot.lz == DEPTH - 1 {
            self.mark_modified(slot.cx, slot.cz + 1);
        }
    }

    /// Flag the column in window slot `(x, z)`, if any
    fn mark_modified(&self, x: i32, z: i32) {
        if !slot_in_bounds(x, z, self.width, self.depth) {
            return;
        }
        if let Some(column) = &self.columns[(z * self.width as i32 + x) as usize] {
            column.write().set_modified(true);
        }
    }

    // ========================================================================
    // BLOCK PREDICATES
    // ========================================================================

    /// Hitbox blocking a point, for movement collision
    ///
    /// - `Some(EMPTY_AABB)`: no data loaded here yet (below the ceiling), treat as blocked
    /// - `Some(box)`: the obstacle hitbox containing the point
    /// - `None`: free space, or above the world ceiling
    pub fn is_obstacle_at(&self, x: f32, y: f32, z: f32) -> Option<AABB> {
        let ix = x.floor() as i32;
        let iy = y.floor() as i32;
        let iz = z.floor() as i32;

        let Some(voxel) = self.get(ix, iy, iz) else {
            return if iy >= HEIGHT { None } else { Some(EMPTY_AABB) };
        };

        let def = self.registry.get(voxel.id);
        if !def.obstacle {
            return None;
        }
        let local = Point3::new(x - ix as f32, y - iy as f32, z - iz as f32);
        def.hitboxes(voxel.rotation())
            .iter()
            .find(|hitbox| aabb_contains_point(hitbox, local))
            .copied()
    }

    pub fn is_solid_block(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z)
            .is_some_and(|v| self.registry.get(v.id).solid())
    }

    pub fn is_replaceable_block(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z)
            .is_some_and(|v| self.registry.get(v.id).replaceable)
    }

    pub fn is_obstacle_block(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z)
            .is_some_and(|v| self.registry.get(v.id).obstacle)
    }

    // ========================================================================
    // STREAMING
    // ========================================================================

    /// Keep the window centred on a world voxel position
    pub fn set_center(&mut self, x: i32, z: i32) {
        let dx = floor_div(x, WIDTH) - (self.origin_x + self.width as i32 / 2);
        let dz = floor_div(z, DEPTH) - (self.origin_z + self.depth as i32 / 2);
        if dx != 0 || dz != 0 {
            self.translate(dx, dz);
        }
    }

    /// Move the window by `(dx, dz)` columns
    ///
    /// Columns that stay inside keep their world coordinate; each column that
    /// falls out fires `ColumnEvent::Hidden` once and goes to the store.
    pub fn translate(&mut self, dx: i32, dz: i32) {
        self.scratch.fill(None);

        let w = self.width as i32;
        let d = self.depth as i32;
        let mut evicted = 0usize;

        for z in 0..d {
            for x in 0..w {
                let Some(column) = self.columns[(z * w + x) as usize].take() else {
                    continue;
                };
                let nx = x - dx;
                let nz = z - dz;
                if !slot_in_bounds(nx, nz, self.width, self.depth) {
                    evict_column(&mut self.events, self.store.as_deref_mut(), &column);
                    self.loaded -= 1;
                    evicted += 1;
                    continue;
                }
                self.scratch[(nz * w + nx) as usize] = Some(column);
            }
        }
        std::mem::swap(&mut self.columns, &mut self.scratch);

        self.origin_x += dx;
        self.origin_z += dz;

        log::debug!(
            "[ChunkGrid::translate] Moved by ({}, {}) to origin ({}, {}): {} evicted, {} loaded",
            dx,
            dz,
            self.origin_x,
            self.origin_z,
            evicted,
            self.loaded
        );
    }

    /// Change the window dimensions
    ///
    /// A shrinking axis is re-centred first: the window keeps the middle
    /// `new` slots of that axis and evicts the rest. A growing axis keeps the
    /// origin and adds empty slots on the positive side.
    pub fn resize(&mut self, new_width: u32, new_depth: u32) {
        let shift_x = self.width.saturating_sub(new_width) as i32 / 2;
        let shift_z = self.depth.saturating_sub(new_depth) as i32 / 2;
        let new_volume = new_width as usize * new_depth as usize;

        let mut resized: Vec<Option<SharedColumn>> = vec![None; new_volume];
        let w = self.width as i32;
        let mut evicted = 0usize;

        for z in 0..self.depth as i32 {
            for x in 0..w {
                let Some(column) = self.columns[(z * w + x) as usize].take() else {
                    continue;
                };
                let nx = x - shift_x;
                let nz = z - shift_z;
                if !slot_in_bounds(nx, nz, new_width, new_depth) {
                    evict_column(&mut self.events, self.store.as_deref_mut(), &column);
                    self.loaded -= 1;
                    evicted += 1;
                    continue;
                }
                resized[(nz * new_width as i32 + nx) as usize] = Some(column);
            }
        }

        log::debug!(
            "[ChunkGrid::resize] {}x{} -> {}x{}, origin shifted by ({}, {}), {} evicted",
            self.width,
            self.depth,
            new_width,
            new_depth,
            shift_x,
            shift_z,
            evicted
        );

        self.columns = resized;
        self.scratch = vec![None; new_volume];
        self.width = new_width;
        self.depth = new_depth;
        self.origin_x += shift_x;
        self.origin_z += shift_z;
    }

    /// Insert a loaded or generated column at its own world coordinate
    ///
    /// Returns `false` when that coordinate is outside the window. A column
    /// already in the slot is replaced.
    pub fn put_chunk(&mut self, column: SharedColumn) -> bool {
        let pos = column.read().pos();
        let Some(index) = map_column(pos.x, pos.z, &self.bounds()) else {
            log::warn!(
                "[ChunkGrid::put_chunk] Column {:?} is outside window at ({}, {})",
                pos,
                self.origin_x,
                self.origin_z
            );
            return false;
        };

        let slot = &mut self.columns[index];
        if slot.is_none() {
            self.loaded += 1;
        }
        *slot = Some(column);
        true
    }

    /// Empty every slot, handing columns that need a write to the store
    ///
    /// Only columns that were lit are written, and of those only the dirty
    /// ones or, when the store persists light, those whose lights were never
    /// loaded from it.
    pub fn save_and_clear(&mut self) {
        let writes_lights = self.store.as_ref().is_some_and(|s| s.writes_lights());
        let mut saved = 0usize;
        let mut dropped = 0usize;

        for slot in self.columns.iter_mut() {
            let Some(column) = slot.take() else {
                continue;
            };
            let needs_write = {
                let c = column.read();
                c.is_lighted() && (c.is_unsaved() || (writes_lights && !c.is_loaded_lights()))
            };
            match self.store.as_deref_mut() {
                Some(store) if needs_write => {
                    store.enqueue(column);
                    saved += 1;
                }
                _ => dropped += 1,
            }
        }
        self.loaded = 0;

        log::info!(
            "[ChunkGrid::save_and_clear] {} columns queued for saving, {} released",
            saved,
            dropped
        );
    }
}

/// Notify listeners and persist a column leaving the window
fn evict_column(
    events: &mut LevelEvents,
    store: Option<&mut (dyn ColumnStore + 'static)>,
    column: &SharedColumn,
) {
    log::trace!("[ChunkGrid] Evicting column {:?}", column.read().pos());
    events.trigger(ColumnEvent::Hidden, column);
    if let Some(store) = store {
        store.enqueue(Arc::clone(column));
    }
}

impl std::fmt::Debug for ChunkGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkGrid")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("origin", &(self.origin_x, self.origin_z))
            .field("loaded", &self.loaded)
            .field("has_store", &self.store.is_some())
            .field("events", &self.events)
            .finish()
    }
}
