//! Render and camera configuration.
//!
//! Both structs are produced by an outer collaborator (the CLI, a scene file)
//! and consumed once per render. Out-of-range render settings are clamped,
//! never rejected.

use std::fmt::Display;
use std::num::NonZeroUsize;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// Largest accepted image width or height.
pub const MAX_IMAGE_DIMENSION: u32 = 4096;

/// Largest accepted samples-per-pixel count.
pub const MAX_SAMPLES_PER_PIXEL: u32 = 4096;

/// Largest accepted recursion depth for the shader.
pub const MAX_DEPTH: u32 = 64;

/// Settings consumed by the render scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Jittered samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Number of worker threads
    pub worker_count: usize,
    /// Base seed mixed into every per-pixel random source
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from_aspect_ratio(400, 16.0 / 9.0)
    }
}

impl RenderConfig {
    /// Create a configuration with explicit image dimensions and default quality.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            samples_per_pixel: 5,
            max_depth: 20,
            worker_count: host_parallelism(),
            seed: 0,
        }
    }

    /// Derive the image height from a width and an aspect ratio (width / height).
    pub fn from_aspect_ratio(image_width: u32, aspect_ratio: f32) -> Self {
        let image_height = ((image_width as f32 / aspect_ratio) as u32).max(1);
        Self::new(image_width, image_height)
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Image aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height.max(1) as f32
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// Return a copy with every field clamped into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            image_width: clamp_logged("image_width", self.image_width, 1, MAX_IMAGE_DIMENSION),
            image_height: clamp_logged("image_height", self.image_height, 1, MAX_IMAGE_DIMENSION),
            samples_per_pixel: clamp_logged(
                "samples_per_pixel",
                self.samples_per_pixel,
                1,
                MAX_SAMPLES_PER_PIXEL,
            ),
            max_depth: clamp_logged("max_depth", self.max_depth, 1, MAX_DEPTH),
            worker_count: clamp_logged("worker_count", self.worker_count, 1, host_parallelism()),
            seed: self.seed,
        }
    }
}

/// Number of threads the host can run in parallel (at least 1).
pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn clamp_logged<T: Ord + Copy + Display>(name: &str, value: T, min: T, max: T) -> T {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{} = {} out of range [{}, {}], using {}", name, value, min, max, clamped);
    }
    clamped
}

/// Camera placement and lens settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position
    pub lookfrom: Vec3,
    /// Point the camera looks at
    pub lookat: Vec3,
    /// World "up" used to orient the camera
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter, 0 for a pinhole camera
    pub aperture: f32,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lookfrom: Vec3::new(-2.0, 2.0, 1.0),
            lookat: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 20.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraConfig {
    /// Set camera position.
    pub fn with_position(mut self, lookfrom: Vec3, lookat: Vec3, vup: Vec3) -> Self {
        self.lookfrom = lookfrom;
        self.lookat = lookat;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }
}
