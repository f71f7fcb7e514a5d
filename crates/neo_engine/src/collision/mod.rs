//! Ray casting primitives
//!
//! Rays and bounding spheres used to pick scene objects. The hit-test volumes
//! of the scene are spheres, so a ray/sphere test is the only narrow phase.

use crate::foundation::math::Vec3;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray from `origin` through `target`
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray intersection test against a keyed volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<K> {
    /// Key of the volume that was hit
    pub key: K,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
}

/// A bounding sphere for hit testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Test ray intersection with this sphere
    ///
    /// Returns the distance along the ray to the front surface. Spheres that
    /// contain the ray origin are not hit, so a camera inside a volume can
    /// still pick what lies beyond it.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        // Solve |origin + t*direction - center|^2 = radius^2 with |direction| = 1
        let oc = ray.origin - self.center;
        let half_b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        // Behind the origin, or the origin is inside
        let near = -half_b - discriminant.sqrt();
        (near >= 0.0).then_some(near)
    }
}

/// Nearest hit among keyed spheres
///
/// Ties keep the first volume in iteration order.
pub fn nearest_hit<K, I>(ray: &Ray, volumes: I) -> Option<RayHit<K>>
where
    I: IntoIterator<Item = (K, BoundingSphere)>,
{
    let mut nearest: Option<RayHit<K>> = None;
    for (key, sphere) in volumes {
        let Some(distance) = sphere.intersect_ray(ray) else {
            continue;
        };
        if nearest.as_ref().map_or(true, |hit| distance < hit.distance) {
            nearest = Some(RayHit {
                key,
                distance,
                point: ray.point_at(distance),
            });
        }
    }
    nearest
}
