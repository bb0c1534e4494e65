//! Scene description types.
//!
//! A `SceneDescription` is plain data: spheres, their materials, the camera
//! and the render settings. The renderer validates it and builds its own
//! intersection structures from it.

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{CameraConfig, RenderConfig};

/// Surface material of a sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse surface
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` is clamped to [0, 1] by the renderer
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    /// Transparent refractive surface
    Dielectric { refractive_index: f32 },
}

/// A sphere primitive. A negative radius models a hollow shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialDesc,
}

impl SphereDesc {
    pub fn new(center: Vec3, radius: f32, material: MaterialDesc) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Check that a sphere can be intersected: finite centre and radius, radius not zero.
///
/// Negative radii are accepted.
pub fn check_sphere_geometry(center: Vec3, radius: f32) -> Result<(), String> {
    if !center.is_finite() || !radius.is_finite() {
        return Err(format!(
            "sphere at {:?} with radius {} is not finite",
            center, radius
        ));
    }
    if radius == 0.0 {
        return Err(format!("sphere at {:?} has zero radius", center));
    }
    Ok(())
}

/// Everything needed to start a render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene with default camera and render settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere.
    pub fn add(&mut self, sphere: SphereDesc) {
        self.spheres.push(sphere);
    }

    /// The reference scene: a ground plane sphere, a diffuse sphere, a hollow
    /// glass sphere and a mirror sphere, seen from above and to the left.
    pub fn reference() -> Self {
        let ground = MaterialDesc::Lambertian {
            albedo: Color::new(0.8, 0.8, 0.0),
        };
        let center = MaterialDesc::Lambertian {
            albedo: Color::new(0.1, 0.2, 0.5),
        };
        let glass = MaterialDesc::Dielectric {
            refractive_index: 1.5,
        };
        let metal = MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 0.0,
        };

        let mut scene = Self::new();
        scene.add(SphereDesc::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
        scene.add(SphereDesc::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center));
        scene.add(SphereDesc::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
        scene.add(SphereDesc::new(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass));
        scene.add(SphereDesc::new(Vec3::new(1.0, 0.0, -1.0), 0.5, metal));
        scene
    }
}
