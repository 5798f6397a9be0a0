//! Physics Module - hitbox math shared by the grid and the ray caster

pub mod aabb;

// Simple re-exports
pub use aabb::{
    aabb_contains_point, aabb_is_empty, aabb_ray_intersection, aabb_translated, create_aabb,
    BoxIntersection, AABB, EMPTY_AABB, UNIT_AABB,
};
