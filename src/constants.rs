//! Engine-wide constants for the column window
//!
//! Every module reads dimensions from here so a column layout change is a
//! one-line edit.

/// Column dimensions in voxels
pub mod column {
    /// Voxels along X
    pub const WIDTH: i32 = 16;
    /// Voxels along Y (the whole world is one column tall)
    pub const HEIGHT: i32 = 256;
    /// Voxels along Z
    pub const DEPTH: i32 = 16;
    /// Voxels per column
    pub const VOLUME: usize = (WIDTH * HEIGHT * DEPTH) as usize;
    /// Voxels per horizontal layer
    pub const LAYER: usize = (WIDTH * DEPTH) as usize;
}

/// Packed block state layout
pub mod states {
    /// Low bits of the state byte hold the rotation index
    pub const ROTATION_MASK: u8 = 0b0000_0111;
    /// Number of distinct rotation indices
    pub const MAX_ROTATIONS: usize = (ROTATION_MASK as usize) + 1;
    /// Extra state lives above the rotation bits
    pub const EXTRA_SHIFT: u8 = 3;
}

/// Lightmap layout
pub mod light {
    /// Bits per channel inside a packed light value
    pub const CHANNEL_BITS: u16 = 4;
    pub const CHANNEL_MASK: u16 = 0xF;
    pub const CHANNEL_COUNT: usize = 4;
    pub const MAX_LEVEL: u8 = 15;
}

/// Window defaults used by `GridConfig::default`
pub mod window {
    pub const DEFAULT_LOAD_DISTANCE: u32 = 8;
    pub const DEFAULT_PADDING: u32 = 2;
    /// Upper bound on either window dimension, in columns
    pub const MAX_DIMENSION: u32 = 1024;
}
