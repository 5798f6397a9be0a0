//! Coordinate mapping between world space and the column window
//!
//! Pure stateless transforms. All divisions round toward negative infinity so
//! that `x = -1` lands in column `-1` at local offset `WIDTH - 1`, never in
//! column `0`.

use serde::{Deserialize, Serialize};

use crate::constants::column::{DEPTH, HEIGHT, WIDTH};

/// Integer voxel position in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Column containing this voxel
    pub fn to_column_pos(self) -> ColumnPos {
        ColumnPos {
            x: floor_div(self.x, WIDTH),
            z: floor_div(self.z, DEPTH),
        }
    }
}

/// Column position in column units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World voxel coordinate of the column's minimum corner (y = 0)
    pub fn min_voxel(self) -> VoxelPos {
        VoxelPos::new(self.x * WIDTH, 0, self.z * DEPTH)
    }
}

/// Placement of the window over the world, in column units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub width: u32,
    pub depth: u32,
    pub origin_x: i32,
    pub origin_z: i32,
}

/// A world voxel resolved to a window slot and in-column offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelSlot {
    /// Row-major slot index `cz * width + cx`
    pub index: usize,
    /// Slot coordinates relative to the window origin
    pub cx: i32,
    pub cz: i32,
    /// Offsets inside the column
    pub lx: i32,
    pub ly: i32,
    pub lz: i32,
}

impl VoxelSlot {
    /// Index into the column's voxel (and light) arrays
    pub fn voxel_index(&self) -> usize {
        voxel_index(self.lx, self.ly, self.lz)
    }
}

/// Integer division rounding toward negative infinity
///
/// `b` must be positive; every column dimension is.
pub fn floor_div(a: i32, b: i32) -> i32 {
    debug_assert!(b > 0, "floor_div divisor must be positive");
    a.div_euclid(b)
}

/// Flat index of a local voxel coordinate, y-major
pub fn voxel_index(lx: i32, ly: i32, lz: i32) -> usize {
    ((ly * DEPTH + lz) * WIDTH + lx) as usize
}

/// Resolve a world voxel coordinate against the window
///
/// Returns `None` when the voxel is outside the window horizontally or
/// outside `[0, HEIGHT)` vertically. Offsets are taken in `i64`, so any
/// `i32` coordinate against any origin resolves without overflow.
pub fn map_voxel(x: i32, y: i32, z: i32, window: &WindowBounds) -> Option<VoxelSlot> {
    if floor_div(y, HEIGHT) != 0 {
        return None;
    }

    let x = i64::from(x) - i64::from(window.origin_x) * i64::from(WIDTH);
    let z = i64::from(z) - i64::from(window.origin_z) * i64::from(DEPTH);
    let cx = x.div_euclid(i64::from(WIDTH));
    let cz = z.div_euclid(i64::from(DEPTH));
    let index = slot_index(cx, cz, window)?;

    Some(VoxelSlot {
        index,
        cx: cx as i32,
        cz: cz as i32,
        lx: x.rem_euclid(i64::from(WIDTH)) as i32,
        ly: y,
        lz: z.rem_euclid(i64::from(DEPTH)) as i32,
    })
}

/// Slot index of a world column coordinate, if it lies in the window
pub fn map_column(cx: i32, cz: i32, window: &WindowBounds) -> Option<usize> {
    let x = i64::from(cx) - i64::from(window.origin_x);
    let z = i64::from(cz) - i64::from(window.origin_z);
    slot_index(x, z, window)
}

/// Row-major index of window-relative slot coordinates
fn slot_index(x: i64, z: i64, window: &WindowBounds) -> Option<usize> {
    let inside =
        (0..i64::from(window.width)).contains(&x) && (0..i64::from(window.depth)).contains(&z);
    inside.then(|| z as usize * window.width as usize + x as usize)
}

/// True when slot coordinates lie in `[0, width) x [0, depth)`
pub fn slot_in_bounds(x: i32, z: i32, width: u32, depth: u32) -> bool {
    x >= 0 && z >= 0 && x < width as i32 && z < depth as i32
}
