//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use lumen_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Every successful hit test builds a fresh record; nothing is cached on the
/// primitive between calls.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the primitive that was hit
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting the normal against the incoming ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let (front_face, normal) = face_normal(ray, outward_normal);
        Self {
            point: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Decide which side of the surface the ray hit.
///
/// If the ray and the outward normal point the same way the ray is inside,
/// so the stored normal is flipped to point against it.
fn face_normal(ray: &Ray, outward_normal: Vec3) -> (bool, Vec3) {
    if ray.direction.dot(outward_normal) > 0.0 {
        (false, -outward_normal)
    } else {
        (true, outward_normal)
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` inside `ray_t` (inclusive).
    ///
    /// Returns the closest such hit, or `None`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}
