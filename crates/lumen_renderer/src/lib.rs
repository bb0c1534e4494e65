//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over sphere scenes:
//! - Closest-hit intersection against a linear list of spheres
//! - Lambertian, metal and dielectric scattering
//! - Recursive radiance estimation with a sky-gradient background
//! - A worker pool that renders every pixel as an independent task

mod camera;
mod error;
mod hittable;
mod material;
mod ppm;
mod progress;
mod scene;
mod scheduler;
mod shader;
mod sphere;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable};
pub use material::{Material, ScatterResult};
pub use ppm::{color_to_rgb8, encode_ppm, ppm_header, write_ppm};
pub use progress::{LineProgress, NoProgress, PixelEvent, ProgressSink};
pub use scene::Scene;
pub use scheduler::{
    pixel_seed, CancelHandle, PixelBuffer, RenderPhase, RenderStats, Renderer,
};
pub use shader::{linear_to_gamma, ray_color, render_pixel, sky_gradient, T_MIN};
pub use sphere::Sphere;

/// Re-export math and configuration types used in the public API
pub use lumen_core::{CameraConfig, RenderConfig, SceneDescription};
pub use lumen_math::{Color, Interval, Ray, Vec3};
