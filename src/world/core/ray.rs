use super::{Voxel, VoxelPos};
use cgmath::{InnerSpace, Point3, Vector3, Zero};

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Build a ray with a unit direction. A zero direction stays zero and
    /// traverses nothing past the origin cell.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        let direction = if direction.magnitude2() > 0.0 {
            direction.normalize()
        } else {
            Vector3::zero()
        };
        Self { origin, direction }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFace {
    Right,  // +X
    Left,   // -X
    Top,    // +Y
    Bottom, // -Y
    Front,  // +Z
    Back,   // -Z
}

impl BlockFace {
    pub fn normal(&self) -> Vector3<f32> {
        let offset = self.offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }

    pub fn offset(&self) -> Vector3<i32> {
        match self {
            BlockFace::Right => Vector3::new(1, 0, 0),
            BlockFace::Left => Vector3::new(-1, 0, 0),
            BlockFace::Top => Vector3::new(0, 1, 0),
            BlockFace::Bottom => Vector3::new(0, -1, 0),
            BlockFace::Front => Vector3::new(0, 0, 1),
            BlockFace::Back => Vector3::new(0, 0, -1),
        }
    }

    /// Face whose outward normal is the given axis-aligned unit vector
    pub fn from_normal(normal: Vector3<i32>) -> Option<BlockFace> {
        match (normal.x, normal.y, normal.z) {
            (1, 0, 0) => Some(BlockFace::Right),
            (-1, 0, 0) => Some(BlockFace::Left),
            (0, 1, 0) => Some(BlockFace::Top),
            (0, -1, 0) => Some(BlockFace::Bottom),
            (0, 0, 1) => Some(BlockFace::Front),
            (0, 0, -1) => Some(BlockFace::Back),
            _ => None,
        }
    }
}

/// A selection ray that stopped on a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Voxel that was hit
    pub voxel: Voxel,
    /// Cell containing the hit
    pub position: VoxelPos,
    /// Point where the ray met the block surface
    pub end: Point3<f32>,
    /// Outward normal of the face that was hit; zero when the ray started inside
    pub normal: Vector3<i32>,
    /// Distance from the ray origin to `end`
    pub distance: f32,
}

impl RaycastHit {
    pub fn face(&self) -> Option<BlockFace> {
        BlockFace::from_normal(self.normal)
    }

    /// Cell in front of the hit face, where a placed block would go
    pub fn adjacent(&self) -> VoxelPos {
        VoxelPos::new(
            self.position.x + self.normal.x,
            self.position.y + self.normal.y,
            self.position.z + self.normal.z,
        )
    }
}

/// Result of a selection ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RaycastOutcome {
    Hit(RaycastHit),
    /// Nothing selectable before `max_distance` or unloaded data on the way.
    /// `end` is the ray point at `max_distance`, `position` the last cell visited.
    Miss {
        position: VoxelPos,
        end: Point3<f32>,
    },
}

impl RaycastOutcome {
    pub fn hit(&self) -> Option<&RaycastHit> {
        match self {
            RaycastOutcome::Hit(hit) => Some(hit),
            RaycastOutcome::Miss { .. } => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, RaycastOutcome::Hit(_))
    }

    pub fn end(&self) -> Point3<f32> {
        match self {
            RaycastOutcome::Hit(hit) => hit.end,
            RaycastOutcome::Miss { end, .. } => *end,
        }
    }

    pub fn position(&self) -> VoxelPos {
        match self {
            RaycastOutcome::Hit(hit) => hit.position,
            RaycastOutcome::Miss { position, .. } => *position,
        }
    }

    /// Face normal of a hit, zero for a miss
    pub fn normal(&self) -> Vector3<i32> {
        match self {
            RaycastOutcome::Hit(hit) => hit.normal,
            RaycastOutcome::Miss { .. } => Vector3::new(0, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 4.0));
        assert!((ray.direction.magnitude() - 1.0).abs() < 1e-6);
        let p = ray.at(5.0);
        assert!((p.y - 3.0).abs() < 1e-5 && (p.z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_direction_stays_zero() {
        let ray = Ray::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(ray.direction, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_face_round_trip_through_normal() {
        for face in [
            BlockFace::Right,
            BlockFace::Left,
            BlockFace::Top,
            BlockFace::Bottom,
            BlockFace::Front,
            BlockFace::Back,
        ] {
            assert_eq!(BlockFace::from_normal(face.offset()), Some(face));
        }
        assert_eq!(BlockFace::from_normal(Vector3::new(0, 0, 0)), None);
    }

    #[test]
    fn test_adjacent_cell() {
        let hit = RaycastHit {
            voxel: Voxel::AIR,
            position: VoxelPos::new(4, 10, -3),
            end: Point3::new(4.0, 10.5, -2.5),
            normal: Vector3::new(-1, 0, 0),
            distance: 2.0,
        };
        assert_eq!(hit.adjacent(), VoxelPos::new(3, 10, -3));
        assert_eq!(hit.face(), Some(BlockFace::Left));
    }
}
