//! JSON scene loading.
//!
//! Scene files are plain JSON mirroring [`SceneDescription`]:
//!
//! ```json
//! {
//!   "camera": { "lookfrom": [-2, 2, 1], "lookat": [0, 0, -1], "vfov": 20 },
//!   "render": { "image_width": 200, "image_height": 100, "samples_per_pixel": 8 },
//!   "spheres": [
//!     { "center": [0, 0, -1], "radius": 0.5,
//!       "material": { "type": "lambertian", "albedo": [0.1, 0.2, 0.5] } }
//!   ]
//! }
//! ```

use std::path::Path;

use thiserror::Error;

use crate::scene::{check_sphere_geometry, SceneDescription};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&source)?;
    log::info!("Loaded {} spheres from {}", scene.spheres.len(), path.display());
    Ok(scene)
}

/// Parse a scene description from a JSON string.
pub fn load_scene_from_str(source: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(source)?;
    validate(&scene)?;
    Ok(scene)
}

/// Reject spheres the renderer would refuse, so a bad file fails at load time.
fn validate(scene: &SceneDescription) -> LoadResult<()> {
    for (index, sphere) in scene.spheres.iter().enumerate() {
        check_sphere_geometry(sphere.center, sphere.radius)
            .map_err(|message| SceneError::Invalid(format!("sphere {}: {}", index, message)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MaterialDesc;
    use lumen_math::Vec3;

    const TWO_SPHERES: &str = r#"{
        "render": { "image_width": 10, "image_height": 10, "samples_per_pixel": 1, "max_depth": 1 },
        "spheres": [
            { "center": [0, -100.5, -1], "radius": 100,
              "material": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] } },
            { "center": [0, 0, -1], "radius": 0.5,
              "material": { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.3 } }
        ]
    }"#;

    #[test]
    fn test_load_from_str() {
        let scene = load_scene_from_str(TWO_SPHERES).unwrap();
        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.spheres[0].center, Vec3::new(0.0, -100.5, -1.0));
        assert_eq!(scene.render.image_width, 10);
        assert_eq!(scene.render.max_depth, 1);
        assert!(matches!(
            scene.spheres[1].material,
            MaterialDesc::Metal { fuzz, .. } if (fuzz - 0.3).abs() < 1e-6
        ));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let scene = load_scene_from_str("{}").unwrap();
        assert!(scene.spheres.is_empty());
        assert_eq!(scene.camera.vfov, 20.0);
    }

    #[test]
    fn test_malformed_vector_is_fatal() {
        let source = r#"{ "spheres": [ { "center": [0, 0], "radius": 1,
            "material": { "type": "dielectric", "refractive_index": 1.5 } } ] }"#;
        assert!(matches!(load_scene_from_str(source), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_unknown_material_is_fatal() {
        let source = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1,
            "material": { "type": "plastic" } } ] }"#;
        assert!(matches!(load_scene_from_str(source), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_zero_radius_is_invalid() {
        let source = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 0,
            "material": { "type": "dielectric", "refractive_index": 1.5 } } ] }"#;
        match load_scene_from_str(source) {
            Err(SceneError::Invalid(message)) => assert!(message.starts_with("sphere 0:")),
            other => panic!("expected invalid scene, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = load_scene("/nonexistent/lumen/scene.json");
        assert!(matches!(result, Err(SceneError::Io(_))));
    }
}
