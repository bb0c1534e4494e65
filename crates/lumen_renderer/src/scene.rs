//! Scene: an ordered list of spheres with closest-hit intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, RenderResult, Sphere,
};
use lumen_core::SceneDescription;
use lumen_math::{Interval, Ray};

/// The primitives of a render. Owns its spheres exclusively.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Build a scene from a description, failing on the first invalid sphere.
    pub fn from_description(desc: &SceneDescription) -> RenderResult<Self> {
        let mut scene = Self::new();
        for sphere in &desc.spheres {
            scene.add(Sphere::new(
                sphere.center,
                sphere.radius,
                Material::from(&sphere.material),
            )?);
        }
        log::debug!("Built scene with {} spheres", scene.len());
        Ok(scene)
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Sphere) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
