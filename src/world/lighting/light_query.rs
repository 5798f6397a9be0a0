//! Light lookups by world position over the loaded columns

use crate::world::management::ChunkGrid;
use crate::world::storage::{LightChannel, Lightmap};

impl ChunkGrid {
    /// Packed light at a world voxel, zero where nothing is loaded
    pub fn get_light(&self, x: i32, y: i32, z: i32) -> u16 {
        self.resolve(x, y, z)
            .map_or(0, |(slot, column)| {
                column.read().lightmap().get_index(slot.voxel_index())
            })
    }

    /// One channel of the light at a world voxel
    pub fn get_light_channel(&self, x: i32, y: i32, z: i32, channel: LightChannel) -> u8 {
        Lightmap::extract(self.get_light(x, y, z), channel)
    }
}
