//! Per-column light storage
//!
//! One `u16` per voxel holding four 4-bit channels: red, green, blue and sky,
//! lowest nibble first. Light is computed elsewhere; this is storage only.

use crate::constants::column::VOLUME;
use crate::constants::light::{CHANNEL_BITS, CHANNEL_MASK, MAX_LEVEL};
use crate::world::core::voxel_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LightChannel {
    Red = 0,
    Green = 1,
    Blue = 2,
    Sky = 3,
}

impl LightChannel {
    pub const ALL: [LightChannel; 4] = [
        LightChannel::Red,
        LightChannel::Green,
        LightChannel::Blue,
        LightChannel::Sky,
    ];

    fn shift(self) -> u16 {
        (self as u16) * CHANNEL_BITS
    }
}

#[derive(Clone)]
pub struct Lightmap {
    map: Box<[u16]>,
}

impl std::fmt::Debug for Lightmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightmap")
            .field("len", &self.map.len())
            .finish()
    }
}

impl Lightmap {
    /// All channels dark
    pub fn new() -> Self {
        Self {
            map: vec![0u16; VOLUME].into_boxed_slice(),
        }
    }

    /// Pack four channel levels into one light value
    pub fn pack(r: u8, g: u8, b: u8, s: u8) -> u16 {
        let clamp = |v: u8| (v.min(MAX_LEVEL) as u16) & CHANNEL_MASK;
        clamp(r)
            | (clamp(g) << CHANNEL_BITS)
            | (clamp(b) << (CHANNEL_BITS * 2))
            | (clamp(s) << (CHANNEL_BITS * 3))
    }

    /// Extract one channel from a packed light value
    pub fn extract(packed: u16, channel: LightChannel) -> u8 {
        ((packed >> channel.shift()) & CHANNEL_MASK) as u8
    }

    /// Packed light at a voxel index
    pub fn get_index(&self, index: usize) -> u16 {
        self.map[index]
    }

    /// Packed light at local coordinates
    pub fn get(&self, lx: i32, ly: i32, lz: i32) -> u16 {
        self.map[voxel_index(lx, ly, lz)]
    }

    pub fn get_channel(&self, lx: i32, ly: i32, lz: i32, channel: LightChannel) -> u8 {
        Self::extract(self.get(lx, ly, lz), channel)
    }

    pub fn set(&mut self, lx: i32, ly: i32, lz: i32, packed: u16) {
        self.map[voxel_index(lx, ly, lz)] = packed;
    }

    /// Overwrite one channel, leaving the others alone
    pub fn set_channel(&mut self, lx: i32, ly: i32, lz: i32, channel: LightChannel, level: u8) {
        let cell = &mut self.map[voxel_index(lx, ly, lz)];
        let shift = channel.shift();
        let level = (level.min(MAX_LEVEL) as u16) & CHANNEL_MASK;
        *cell = (*cell & !(CHANNEL_MASK << shift)) | (level << shift);
    }

    /// Zero every channel
    pub fn clear(&mut self) {
        self.map.fill(0);
    }

    /// Raw packed values, voxel order
    pub fn as_slice(&self) -> &[u16] {
        &self.map
    }

    /// Raw bytes for the persistence layer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.map)
    }
}

impl Default for Lightmap {
    fn default() -> Self {
        Self::new()
    }
}
