//! Lumen Core - render configuration and scene description.
//!
//! This crate provides renderer-agnostic inputs:
//!
//! - **Configuration**: `RenderConfig`, `CameraConfig`
//! - **Scene description**: `SceneDescription`, `SphereDesc`, `MaterialDesc`
//! - **Loading**: JSON scene files
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres", scene.spheres.len());
//! ```

pub mod config;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use config::{CameraConfig, RenderConfig};
pub use loader::{load_scene, load_scene_from_str, SceneError};
pub use scene::{check_sphere_geometry, MaterialDesc, SceneDescription, SphereDesc};
