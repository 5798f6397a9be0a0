/// Data-Oriented Axis-Aligned Bounding Box System
///
/// Pure functions for hitbox queries - no methods, just data transformations.
use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box - pure data structure
///
/// Block hitboxes are expressed in cell-local units, so a full cube spans
/// `(0,0,0)..(1,1,1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 6]", into = "[f32; 6]")]
pub struct AABB {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Canonical zero-extent box, handed out for "no data yet" obstacle queries
pub const EMPTY_AABB: AABB = AABB {
    min: Point3 { x: 0.0, y: 0.0, z: 0.0 },
    max: Point3 { x: 0.0, y: 0.0, z: 0.0 },
};

/// Full cell box used by solid cubes
pub const UNIT_AABB: AABB = AABB {
    min: Point3 { x: 0.0, y: 0.0, z: 0.0 },
    max: Point3 { x: 1.0, y: 1.0, z: 1.0 },
};

impl From<[f32; 6]> for AABB {
    fn from(v: [f32; 6]) -> Self {
        create_aabb(Point3::new(v[0], v[1], v[2]), Point3::new(v[3], v[4], v[5]))
    }
}

impl From<AABB> for [f32; 6] {
    fn from(aabb: AABB) -> Self {
        [
            aabb.min.x, aabb.min.y, aabb.min.z, aabb.max.x, aabb.max.y, aabb.max.z,
        ]
    }
}

/// Result of a ray/box slab test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxIntersection {
    /// Distance along the ray to the entry point (0 when the origin is inside)
    pub distance: f32,
    /// Outward normal of the entered face, zero when the origin is inside
    pub normal: Vector3<i32>,
}

/// Create new AABB from min/max points
/// Pure function - constructs AABB data structure
pub fn create_aabb(min: Point3<f32>, max: Point3<f32>) -> AABB {
    AABB { min, max }
}

/// Test if AABB contains a point
/// Pure function - half-open on every axis so adjacent boxes never both claim a point
pub fn aabb_contains_point(aabb: &AABB, point: Point3<f32>) -> bool {
    point.x >= aabb.min.x && point.x < aabb.max.x &&
    point.y >= aabb.min.y && point.y < aabb.max.y &&
    point.z >= aabb.min.z && point.z < aabb.max.z
}

/// True when the box has no volume
pub fn aabb_is_empty(aabb: &AABB) -> bool {
    aabb.max.x <= aabb.min.x || aabb.max.y <= aabb.min.y || aabb.max.z <= aabb.min.z
}

/// Create translated copy of AABB
/// Pure function - creates new AABB translated by offset
pub fn aabb_translated(aabb: &AABB, offset: Vector3<f32>) -> AABB {
    AABB {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// Ray/AABB slab intersection
///
/// `direction` does not need to be normalized; distances are in units of its
/// length. Returns `None` when the box is behind the ray, missed entirely, or
/// entered beyond `max_distance`.
pub fn aabb_ray_intersection(
    aabb: &AABB,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<BoxIntersection> {
    let origin = [origin.x, origin.y, origin.z];
    let dir = [direction.x, direction.y, direction.z];
    let box_min = [aabb.min.x, aabb.min.y, aabb.min.z];
    let box_max = [aabb.max.x, aabb.max.y, aabb.max.z];

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    let mut entry_axis: Option<usize> = None;

    for i in 0..3 {
        if dir[i] == 0.0 {
            // Ray is parallel to this slab
            if origin[i] < box_min[i] || origin[i] > box_max[i] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir[i];
        let t1 = (box_min[i] - origin[i]) * inv;
        let t2 = (box_max[i] - origin[i]) * inv;
        let t_near = t1.min(t2);
        let t_far = t1.max(t2);

        if t_near > t_min {
            t_min = t_near;
            entry_axis = Some(i);
        }
        t_max = t_max.min(t_far);

        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }

    if t_min < 0.0 {
        // Origin is embedded in the box
        return Some(BoxIntersection {
            distance: 0.0,
            normal: Vector3::new(0, 0, 0),
        });
    }

    if t_min > max_distance {
        return None;
    }

    let mut normal = [0i32; 3];
    if let Some(axis) = entry_axis {
        normal[axis] = if dir[axis] > 0.0 { -1 } else { 1 };
    }

    Some(BoxIntersection {
        distance: t_min,
        normal: Vector3::new(normal[0], normal[1], normal[2]),
    })
}
