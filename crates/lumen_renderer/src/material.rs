//! Surface materials and scattering.

use crate::hittable::HitRecord;
use lumen_core::MaterialDesc;
use lumen_math::{
    gen_f32, near_zero, random_in_unit_sphere, random_unit_vector, reflect, refract, unit_vector,
    Color, Ray,
};
use rand::RngCore;

/// Outcome of a successful scatter: the bounced ray and its color filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How light interacts with a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Diffuse surface
    Lambertian { albedo: Color },
    /// Specular surface; `fuzz` in [0, 1] blurs the reflection
    Metal { albedo: Color, fuzz: f32 },
    /// Glass-like surface with the given index of refraction
    Dielectric { refractive_index: f32 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with roughness clamped to [0, 1]. 0 is a perfect mirror.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Dielectric with index of refraction `refractive_index`
    /// (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn dielectric(refractive_index: f32) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if near_zero(scatter_direction) {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.point, scatter_direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(unit_vector(ray_in.direction), rec.normal);
                let scattered_dir = reflected + fuzz * random_in_unit_sphere(rng);

                // Reflections below the surface are absorbed
                if scattered_dir.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.point, scattered_dir),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { refractive_index } => {
                let refraction_ratio = if rec.front_face {
                    1.0 / refractive_index
                } else {
                    refractive_index
                };

                let unit_direction = unit_vector(ray_in.direction);
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Check for total internal reflection
                let cannot_refract = refraction_ratio * sin_theta > 1.0;

                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.point, direction),
                })
            }
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match *desc {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDesc::Dielectric { refractive_index } => Material::dielectric(refractive_index),
        }
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
