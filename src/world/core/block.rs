use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;
use std::fmt;

use crate::constants::states::{EXTRA_SHIFT, ROTATION_MASK};

/// Unique identifier for a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BlockId::AIR => write!(f, "Air"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    /// Id 0 is always air; the registry reserves it
    pub const AIR: BlockId = BlockId(0);

    /// Create a new BlockId from a raw u16 value
    pub const fn new(id: u16) -> Self {
        BlockId(id)
    }

    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

/// A single cell of a column: block id plus packed state byte
///
/// The low three bits of `states` hold the rotation index, the rest is
/// free-form extra state owned by the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Voxel {
    pub id: BlockId,
    pub states: u8,
}

assert_eq_size!(Voxel, [u8; 4]);

impl Voxel {
    pub const AIR: Voxel = Voxel {
        id: BlockId::AIR,
        states: 0,
    };

    pub const fn new(id: BlockId, states: u8) -> Self {
        Self { id, states }
    }

    /// Rotation index used to pick a hitbox list
    pub const fn rotation(&self) -> u8 {
        self.states & ROTATION_MASK
    }

    pub const fn extra(&self) -> u8 {
        self.states >> EXTRA_SHIFT
    }

    /// Pack a rotation and extra state into a state byte
    pub const fn pack_states(rotation: u8, extra: u8) -> u8 {
        (rotation & ROTATION_MASK) | (extra << EXTRA_SHIFT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_packing() {
        let states = Voxel::pack_states(5, 3);
        let voxel = Voxel::new(BlockId(7), states);
        assert_eq!(voxel.rotation(), 5);
        assert_eq!(voxel.extra(), 3);
    }

    #[test]
    fn test_rotation_is_masked() {
        let voxel = Voxel::new(BlockId(1), 0b1111_1110);
        assert_eq!(voxel.rotation(), 0b110);
    }

    #[test]
    fn test_air_default() {
        assert_eq!(Voxel::default(), Voxel::AIR);
        assert!(BlockId::default().is_air());
        assert_eq!(BlockId::AIR.to_string(), "Air");
        assert_eq!(BlockId(12).to_string(), "Block(12)");
    }
}
