//! Voxel ray traversal over the window
//!
//! Both casts walk the grid cell by cell (Amanatides & Woo), visiting every
//! cell the ray passes through in order of entry distance. Cube blocks stop
//! the ray at the cell boundary; other shapes are tested against their
//! hitboxes.

use cgmath::{Point3, Vector3};

use super::core::{Ray, RaycastHit, RaycastOutcome, VoxelPos};
use super::management::ChunkGrid;
use crate::physics::{aabb_ray_intersection, aabb_translated, BoxIntersection, AABB};

/// Incremental grid walk state
struct Traversal {
    cell: [i32; 3],
    step: [i32; 3],
    t_delta: [f32; 3],
    t_max: [f32; 3],
    /// Distance at which `cell` was entered
    t: f32,
    /// Axis crossed to enter `cell`, `None` for the starting cell
    stepped: Option<usize>,
}

impl Traversal {
    fn new(ray: &Ray) -> Self {
        let origin = [ray.origin.x, ray.origin.y, ray.origin.z];
        let dir = [ray.direction.x, ray.direction.y, ray.direction.z];

        let mut cell = [0; 3];
        let mut step = [0; 3];
        let mut t_delta = [f32::INFINITY; 3];
        let mut t_max = [f32::INFINITY; 3];

        for axis in 0..3 {
            let p = origin[axis];
            let d = dir[axis];
            let i = p.floor();
            cell[axis] = i as i32;
            step[axis] = if d > 0.0 { 1 } else { -1 };
            if d != 0.0 {
                t_delta[axis] = (1.0 / d).abs();
                let boundary = if d > 0.0 { i + 1.0 - p } else { p - i };
                t_max[axis] = t_delta[axis] * boundary;
            }
        }

        Self {
            cell,
            step,
            t_delta,
            t_max,
            t: 0.0,
            stepped: None,
        }
    }

    fn position(&self) -> VoxelPos {
        VoxelPos::new(self.cell[0], self.cell[1], self.cell[2])
    }

    /// Outward normal of the face the current cell was entered through
    fn entry_normal(&self) -> Vector3<i32> {
        let mut normal = [0; 3];
        if let Some(axis) = self.stepped {
            normal[axis] = -self.step[axis];
        }
        Vector3::new(normal[0], normal[1], normal[2])
    }

    /// Step into the next cell along the ray; ties go to z, then y
    fn advance(&mut self) {
        let axis = if self.t_max[0] < self.t_max[1] {
            if self.t_max[0] < self.t_max[2] {
                0
            } else {
                2
            }
        } else if self.t_max[1] < self.t_max[2] {
            1
        } else {
            2
        };

        self.cell[axis] = self.cell[axis].saturating_add(self.step[axis]);
        self.t = self.t_max[axis];
        self.t_max[axis] += self.t_delta[axis];
        self.stepped = Some(axis);
    }
}

/// Closest hitbox of a cell that the ray enters before `max_distance`
fn nearest_hitbox(
    boxes: &[AABB],
    cell: VoxelPos,
    ray: &Ray,
    max_distance: f32,
) -> Option<BoxIntersection> {
    let offset = Vector3::new(cell.x as f32, cell.y as f32, cell.z as f32);
    let mut nearest: Option<BoxIntersection> = None;
    let mut nearest_distance = max_distance;

    for hitbox in boxes {
        let placed = aabb_translated(hitbox, offset);
        if let Some(hit) = aabb_ray_intersection(&placed, ray.origin, ray.direction, max_distance) {
            if hit.distance < nearest_distance {
                nearest_distance = hit.distance;
                nearest = Some(hit);
            }
        }
    }
    nearest
}

impl ChunkGrid {
    /// Cast a selection ray
    ///
    /// Only selectable blocks stop the ray. An unloaded cell ends the cast
    /// as a miss.
    pub fn ray_cast(&self, ray: &Ray, max_distance: f32) -> RaycastOutcome {
        let mut walk = Traversal::new(ray);

        while walk.t <= max_distance {
            let position = walk.position();
            let Some(voxel) = self.get(position.x, position.y, position.z) else {
                return miss(ray, position, max_distance);
            };

            let def = self.registry().get(voxel.id);
            if def.selectable {
                if def.solid() {
                    return RaycastOutcome::Hit(RaycastHit {
                        voxel,
                        position,
                        end: ray.at(walk.t),
                        normal: walk.entry_normal(),
                        distance: walk.t,
                    });
                }

                let boxes = def.hitboxes(voxel.rotation());
                if let Some(hit) = nearest_hitbox(boxes, position, ray, max_distance) {
                    return RaycastOutcome::Hit(RaycastHit {
                        voxel,
                        position,
                        end: ray.at(hit.distance),
                        normal: hit.normal,
                        distance: hit.distance,
                    });
                }
            }

            walk.advance();
        }

        miss(ray, walk.position(), max_distance)
    }

    /// Sweep a ray for movement and return where it is first blocked
    ///
    /// Obstacles stop it; unloaded cells stop it where they are entered.
    /// Returns the ray point at `max_distance` when nothing is in the way.
    pub fn ray_cast_to_obstacle(&self, ray: &Ray, max_distance: f32) -> Point3<f32> {
        let mut walk = Traversal::new(ray);

        while walk.t <= max_distance {
            let position = walk.position();
            let Some(voxel) = self.get(position.x, position.y, position.z) else {
                return ray.at(walk.t);
            };

            let def = self.registry().get(voxel.id);
            if def.obstacle {
                if def.solid() {
                    return ray.at(walk.t);
                }
                let boxes = def.hitboxes(voxel.rotation());
                if let Some(hit) = nearest_hitbox(boxes, position, ray, max_distance) {
                    return ray.at(hit.distance);
                }
            }

            walk.advance();
        }

        ray.at(max_distance)
    }
}

fn miss(ray: &Ray, position: VoxelPos, max_distance: f32) -> RaycastOutcome {
    RaycastOutcome::Miss {
        position,
        end: ray.at(max_distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::blocks::{register_basic_blocks, BlockDef};
    use crate::world::core::{BlockFace, BlockId, BlockRegistry, ColumnPos, Voxel};
    use crate::world::storage::VoxelColumn;
    use std::sync::Arc;

    fn approx(a: Point3<f32>, b: Point3<f32>) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4 && (a.z - b.z).abs() < 1e-4
    }

    /// 3x3 window around the origin with only column (0, 0) loaded
    fn grid_with(registry: BlockRegistry) -> ChunkGrid {
        let mut grid = ChunkGrid::new(3, 3, -1, -1, Arc::new(registry));
        assert!(grid.put_chunk(VoxelColumn::new(ColumnPos::new(0, 0)).into_shared()));
        grid
    }

    fn basic_grid() -> ChunkGrid {
        let mut registry = BlockRegistry::new();
        register_basic_blocks(&mut registry).expect("basic blocks");
        grid_with(registry)
    }

    fn id(grid: &ChunkGrid, name: &str) -> BlockId {
        grid.registry().get_id(name).expect("block is registered")
    }

    #[test]
    fn test_empty_window_misses_at_max_distance() {
        let mut registry = BlockRegistry::new();
        register_basic_blocks(&mut registry).expect("basic blocks");
        let grid = ChunkGrid::new(4, 4, -2, -2, Arc::new(registry));

        let ray = Ray::new(Point3::new(0.5, 64.5, 0.5), Vector3::new(1.0, 0.2, -0.3));
        let outcome = grid.ray_cast(&ray, 10.0);

        assert!(!outcome.is_hit());
        assert_eq!(outcome.end(), ray.at(10.0));
        assert_eq!(outcome.normal(), Vector3::new(0, 0, 0));
    }

    #[test]
    fn test_hit_solid_block_along_x() {
        let mut grid = basic_grid();
        let stone = id(&grid, "engine:stone");
        grid.set(5, 10, 0, stone, 0);

        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = *grid.ray_cast(&ray, 20.0).hit().expect("stone is in the way");

        assert_eq!(hit.voxel, Voxel::new(stone, 0));
        assert_eq!(hit.position, VoxelPos::new(5, 10, 0));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
        assert_eq!(hit.face(), Some(BlockFace::Left));
        assert_eq!(hit.adjacent(), VoxelPos::new(4, 10, 0));
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert!(approx(hit.end, Point3::new(5.0, 10.5, 0.5)));
    }

    #[test]
    fn test_hit_solid_block_from_above() {
        let mut grid = basic_grid();
        let stone = id(&grid, "engine:stone");
        grid.set(3, 12, 3, stone, 0);

        let ray = Ray::new(Point3::new(3.5, 20.5, 3.5), Vector3::new(0.0, -1.0, 0.0));
        let hit = *grid.ray_cast(&ray, 20.0).hit().expect("stone below");

        assert_eq!(hit.position, VoxelPos::new(3, 12, 3));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert!(approx(hit.end, Point3::new(3.5, 13.0, 3.5)));
    }

    #[test]
    fn test_block_beyond_max_distance_is_missed() {
        let mut grid = basic_grid();
        let stone = id(&grid, "engine:stone");
        grid.set(9, 10, 0, stone, 0);

        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let outcome = grid.ray_cast(&ray, 5.0);

        assert!(!outcome.is_hit());
        assert!(approx(outcome.end(), Point3::new(5.5, 10.5, 0.5)));
    }

    #[test]
    fn test_start_inside_block_has_zero_normal() {
        let mut grid = basic_grid();
        let stone = id(&grid, "engine:stone");
        grid.set(2, 2, 2, stone, 0);

        let ray = Ray::new(Point3::new(2.5, 2.5, 2.5), Vector3::new(0.0, 1.0, 0.0));
        let hit = *grid.ray_cast(&ray, 5.0).hit().expect("started inside stone");

        assert_eq!(hit.position, VoxelPos::new(2, 2, 2));
        assert_eq!(hit.normal, Vector3::new(0, 0, 0));
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.face(), None);
    }

    #[test]
    fn test_empty_hitbox_block_never_hits() {
        let mut registry = BlockRegistry::new();
        let ghost = registry
            .register(BlockDef::custom("test:ghost", Vec::new()))
            .expect("register ghost");
        let stone = registry
            .register(BlockDef::cube("test:stone"))
            .expect("register stone");
        let mut grid = grid_with(registry);
        grid.set(5, 10, 0, ghost, 0);

        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(!grid.ray_cast(&ray, 8.0).is_hit());

        // The ray keeps walking past the ghost
        grid.set(7, 10, 0, stone, 0);
        let hit = *grid.ray_cast(&ray, 8.0).hit().expect("stone behind ghost");
        assert_eq!(hit.position, VoxelPos::new(7, 10, 0));
    }

    #[test]
    fn test_unselectable_blocks_are_transparent() {
        let mut grid = basic_grid();
        let water = id(&grid, "engine:water");
        let stone = id(&grid, "engine:stone");
        for x in 1..6 {
            grid.set(x, 10, 0, water, 0);
        }
        grid.set(6, 10, 0, stone, 0);

        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = *grid.ray_cast(&ray, 10.0).hit().expect("stone behind water");
        assert_eq!(hit.position, VoxelPos::new(6, 10, 0));
    }

    #[test]
    fn test_slab_hitbox() {
        let mut grid = basic_grid();
        let slab = id(&grid, "engine:slab");
        grid.set(5, 10, 0, slab, 0);

        // Over the bottom half slab
        let high = Ray::new(Point3::new(0.5, 10.75, 0.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(!grid.ray_cast(&high, 8.0).is_hit());

        let low = Ray::new(Point3::new(0.5, 10.25, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = *grid.ray_cast(&low, 8.0).hit().expect("slab side");
        assert_eq!(hit.position, VoxelPos::new(5, 10, 0));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
        assert!(approx(hit.end, Point3::new(5.0, 10.25, 0.5)));

        let down = Ray::new(Point3::new(5.5, 15.5, 0.5), Vector3::new(0.0, -1.0, 0.0));
        let hit = *grid.ray_cast(&down, 8.0).hit().expect("slab top");
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!(approx(hit.end, Point3::new(5.5, 10.5, 0.5)));
    }

    #[test]
    fn test_slab_upper_half_hitbox() {
        let mut grid = basic_grid();
        let slab = id(&grid, "engine:slab");
        grid.set(5, 10, 0, slab, 1);

        // Under the upper half slab
        let low = Ray::new(Point3::new(0.5, 10.25, 0.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(!grid.ray_cast(&low, 8.0).is_hit());
        assert!(approx(grid.ray_cast_to_obstacle(&low, 8.0), Point3::new(8.5, 10.25, 0.5)));

        let high = Ray::new(Point3::new(0.5, 10.75, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = *grid.ray_cast(&high, 8.0).hit().expect("slab side");
        assert_eq!(hit.voxel, Voxel::new(slab, 1));
        assert_eq!(hit.normal, Vector3::new(-1, 0, 0));
        assert!(approx(hit.end, Point3::new(5.0, 10.75, 0.5)));
        assert!(approx(grid.ray_cast_to_obstacle(&high, 8.0), Point3::new(5.0, 10.75, 0.5)));

        let down = Ray::new(Point3::new(5.5, 15.5, 0.5), Vector3::new(0.0, -1.0, 0.0));
        let hit = *grid.ray_cast(&down, 8.0).hit().expect("slab top");
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert!(approx(hit.end, Point3::new(5.5, 11.0, 0.5)));
    }

    #[test]
    fn test_far_ray_misses_without_overflow() {
        let grid = basic_grid();
        let ray = Ray::new(Point3::new(3.0e9, 10.5, -3.0e9), Vector3::new(1.0, 0.0, -1.0));
        let outcome = grid.ray_cast(&ray, 10.0);
        assert!(!outcome.is_hit());
        assert_eq!(outcome.position(), VoxelPos::new(i32::MAX, 10, i32::MIN));

        let stop = grid.ray_cast_to_obstacle(&ray, 10.0);
        assert_eq!(stop, ray.origin);
    }

    #[test]
    fn test_unloaded_cell_stops_selection() {
        let grid = basic_grid();
        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(-1.0, 0.0, 0.0));
        let outcome = grid.ray_cast(&ray, 10.0);

        assert!(!outcome.is_hit());
        assert_eq!(outcome.position(), VoxelPos::new(-1, 10, 0));
        assert!(approx(outcome.end(), Point3::new(-9.5, 10.5, 0.5)));
    }

    #[test]
    fn test_zero_direction_terminates() {
        let grid = basic_grid();
        let ray = Ray::new(Point3::new(4.5, 4.5, 4.5), Vector3::new(0.0, 0.0, 0.0));
        let outcome = grid.ray_cast(&ray, 100.0);
        assert!(!outcome.is_hit());
        assert_eq!(outcome.end(), Point3::new(4.5, 4.5, 4.5));
    }

    #[test]
    fn test_obstacle_sweep_stops_at_solid() {
        let mut grid = basic_grid();
        let stone = id(&grid, "engine:stone");
        let grass = id(&grid, "engine:tall_grass");
        grid.set(3, 10, 0, grass, 0);
        grid.set(5, 10, 0, stone, 0);

        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let stop = grid.ray_cast_to_obstacle(&ray, 20.0);
        assert!(approx(stop, Point3::new(5.0, 10.5, 0.5)));
    }

    #[test]
    fn test_obstacle_sweep_custom_shape() {
        let mut grid = basic_grid();
        let slab = id(&grid, "engine:slab");
        grid.set(5, 10, 0, slab, 0);

        let low = Ray::new(Point3::new(0.5, 10.25, 0.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(approx(grid.ray_cast_to_obstacle(&low, 20.0), Point3::new(5.0, 10.25, 0.5)));

        let high = Ray::new(Point3::new(0.5, 10.75, 0.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(approx(grid.ray_cast_to_obstacle(&high, 8.0), Point3::new(8.5, 10.75, 0.5)));
    }

    #[test]
    fn test_obstacle_sweep_stops_at_unloaded() {
        let grid = basic_grid();
        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(-1.0, 0.0, 0.0));
        assert!(approx(grid.ray_cast_to_obstacle(&ray, 10.0), Point3::new(0.0, 10.5, 0.5)));
    }

    #[test]
    fn test_obstacle_sweep_free_path() {
        let grid = basic_grid();
        let ray = Ray::new(Point3::new(0.5, 10.5, 0.5), Vector3::new(0.0, 0.0, 1.0));
        assert!(approx(grid.ray_cast_to_obstacle(&ray, 5.0), Point3::new(0.5, 10.5, 5.5)));
    }
}
