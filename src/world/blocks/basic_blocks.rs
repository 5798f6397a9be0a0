//! Basic engine blocks
//!
//! The fundamental blocks that come with the engine, one per geometry kind.
//! Games can register additional blocks on top of these.

use cgmath::Point3;

use crate::physics::{create_aabb, AABB};
use crate::world::blocks::block_data::BlockDef;
use crate::world::core::BlockRegistry;
use crate::world::error::WorldError;

/// Create stone block definition
pub fn create_stone_def() -> BlockDef {
    BlockDef::cube("engine:stone")
}

/// Create dirt block definition
pub fn create_dirt_def() -> BlockDef {
    BlockDef::cube("engine:dirt")
}

/// Create water block definition: no collision, rays pass through
pub fn create_water_def() -> BlockDef {
    BlockDef::custom("engine:water", Vec::new())
        .with_obstacle(false)
        .with_selectable(false)
        .with_replaceable(true)
}

/// Create tall grass definition: selectable, walk-through, replaceable
pub fn create_tall_grass_def() -> BlockDef {
    BlockDef::custom(
        "engine:tall_grass",
        vec![create_aabb(
            Point3::new(0.15, 0.0, 0.15),
            Point3::new(0.85, 0.8, 0.85),
        )],
    )
    .with_obstacle(false)
    .with_replaceable(true)
}

/// Create slab definition: bottom half in rotation 0, top half in rotation 1
pub fn create_slab_def() -> BlockDef {
    BlockDef::rotated(
        "engine:slab",
        vec![
            vec![create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.5, 1.0))],
            vec![create_aabb(Point3::new(0.0, 0.5, 0.0), Point3::new(1.0, 1.0, 1.0))],
        ],
    )
}

/// Create torch definition: one thin box per attachment face
pub fn create_torch_def() -> BlockDef {
    let stick = |min: [f32; 3], max: [f32; 3]| -> AABB {
        create_aabb(Point3::new(min[0], min[1], min[2]), Point3::new(max[0], max[1], max[2]))
    };
    BlockDef::rotated(
        "engine:torch",
        vec![
            vec![stick([0.4375, 0.0, 0.4375], [0.5625, 0.625, 0.5625])],
            vec![stick([0.0, 0.2, 0.4375], [0.125, 0.825, 0.5625])],
            vec![stick([0.875, 0.2, 0.4375], [1.0, 0.825, 0.5625])],
            vec![stick([0.4375, 0.2, 0.0], [0.5625, 0.825, 0.125])],
            vec![stick([0.4375, 0.2, 0.875], [0.5625, 0.825, 1.0])],
        ],
    )
    .with_obstacle(false)
}

/// Create chest definition: solid cube carrying a block inventory
pub fn create_chest_def() -> BlockDef {
    BlockDef::cube("engine:chest").with_inventory(27)
}

/// Register all basic engine blocks
///
/// Games should call this before registering their own blocks. Air (id 0) is
/// registered by `BlockRegistry::new`.
pub fn register_basic_blocks(registry: &mut BlockRegistry) -> Result<(), WorldError> {
    registry.register(create_stone_def())?;
    registry.register(create_dirt_def())?;
    registry.register(create_water_def())?;
    registry.register(create_tall_grass_def())?;
    registry.register(create_slab_def())?;
    registry.register(create_torch_def())?;
    registry.register(create_chest_def())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_basic_blocks() {
        let mut registry = BlockRegistry::new();
        register_basic_blocks(&mut registry).expect("basic blocks register cleanly");

        let stone = registry.get_id("engine:stone").expect("stone is registered");
        assert!(registry.get(stone).solid());

        let torch = registry.get_id("engine:torch").expect("torch is registered");
        assert_eq!(registry.get(torch).rotation_count(), 5);

        // Registering twice collides on names
        assert!(register_basic_blocks(&mut registry).is_err());
    }
}
