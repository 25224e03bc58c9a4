//! Collision detection and response for the circular arena
//!
//! Balls live inside a circle. Detecting when one pokes through the wall,
//! pushing it back, and reflecting its velocity is all done here, along with
//! the box test used against the orbiting target.

use glam::Vec2;

use crate::polar_to_cartesian;

/// Below this distance from the arena center the wall normal is undefined.
pub const MIN_NORMAL_DISTANCE: f32 = 1e-4;

/// The circular wall that contains the balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub center: Vec2,
    pub radius: f32,
}

impl Boundary {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether a circle fits inside the wall, give or take `tolerance`
    pub fn contains(&self, pos: Vec2, radius: f32, tolerance: f32) -> bool {
        pos.distance(self.center) + radius <= self.radius + tolerance
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the wall (if hit)
    pub point: Vec2,
    /// Wall normal at the contact, pointing back toward the arena center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Point at `angle` radians on the circle of `radius` around `center`
#[inline]
pub fn position_on_circle(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + polar_to_cartesian(radius, angle)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n. Speed is unchanged.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a ball against the inside of the arena wall
///
/// Hits when `distance + ball_radius > boundary.radius`. A ball sitting on
/// the center has no usable normal and is reported as a miss.
pub fn boundary_collision(ball_pos: Vec2, ball_radius: f32, boundary: &Boundary) -> CollisionResult {
    let offset = ball_pos - boundary.center;
    let dist = offset.length();

    if dist + ball_radius <= boundary.radius || dist < MIN_NORMAL_DISTANCE {
        return CollisionResult::miss();
    }

    let outward = offset / dist;
    CollisionResult {
        hit: true,
        point: boundary.center + outward * boundary.radius,
        normal: -outward,
        penetration: dist + ball_radius - boundary.radius,
    }
}

/// Square-root-free wall test: `d² > (R - r)²`
#[inline]
pub fn boundary_overlap_sq(ball_pos: Vec2, ball_radius: f32, boundary: &Boundary) -> bool {
    let reach = boundary.radius - ball_radius;
    ball_pos.distance_squared(boundary.center) > reach * reach
}

/// Inward wall normal for a point inside the arena, if one exists
pub fn inward_normal(pos: Vec2, boundary: &Boundary) -> Option<Vec2> {
    let offset = pos - boundary.center;
    let dist = offset.length();
    (dist >= MIN_NORMAL_DISTANCE).then(|| -offset / dist)
}

/// Axis-aligned box used for ball/target overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, Vec2::splat(radius * 2.0))
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
