//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, RenderError, RenderResult,
};
use lumen_core::check_sphere_geometry;
use lumen_math::{Interval, Ray, Vec3};

/// A sphere primitive.
///
/// A negative radius keeps the same surface but flips the outward normal,
/// which models the inner wall of a hollow shell.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere, failing on non-finite values or a zero radius.
    pub fn new(center: Vec3, radius: f32, material: Material) -> RenderResult<Self> {
        check_sphere_geometry(center, radius).map_err(RenderError::InvalidGeometry)?;

        Ok(Self {
            center,
            radius,
            material,
        })
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let co = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = co.dot(ray.direction);
        let c = co.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}
