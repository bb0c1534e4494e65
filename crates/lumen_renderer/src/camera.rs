//! Camera for ray generation.

use crate::{RenderError, RenderResult};
use lumen_core::CameraConfig;
use lumen_math::{degrees_to_radians, near_zero, random_in_unit_disk, unit_vector, Ray, Vec3};
use rand::RngCore;

/// Thin-lens camera. Built once per render and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,

    // Orthonormal basis
    u: Vec3,
    v: Vec3,
    w: Vec3,

    lens_radius: f32,
}

impl Camera {
    /// Build a camera for an image with the given aspect ratio (width / height).
    pub fn new(config: &CameraConfig, aspect_ratio: f32) -> RenderResult<Self> {
        validate(config, aspect_ratio)?;

        let theta = degrees_to_radians(config.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = unit_vector(config.lookfrom - config.lookat);
        let u = unit_vector(config.vup.cross(w));
        let v = w.cross(u);

        let origin = config.lookfrom;
        let focus_dist = config.focus_dist;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        })
    }

    /// Generate a ray through viewport coordinates `s, t` in [0, 1].
    ///
    /// With a non-zero aperture the ray origin is jittered across the lens disk.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius <= 0.0 {
            Vec3::ZERO
        } else {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            rd.x * self.u + rd.y * self.v
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// View direction (unit length, from the camera towards the scene).
    pub fn forward(&self) -> Vec3 {
        -self.w
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

fn validate(config: &CameraConfig, aspect_ratio: f32) -> RenderResult<()> {
    let invalid = |message: String| Err(RenderError::InvalidCamera(message));

    if !(config.lookfrom.is_finite() && config.lookat.is_finite() && config.vup.is_finite()) {
        return invalid("camera vectors must be finite".to_string());
    }
    if near_zero(config.lookfrom - config.lookat) {
        return invalid(format!("lookfrom and lookat coincide at {:?}", config.lookfrom));
    }
    if near_zero(config.vup.cross(config.lookfrom - config.lookat)) {
        return invalid(format!("vup {:?} is parallel to the view direction", config.vup));
    }
    if !(config.vfov > 0.0 && config.vfov < 180.0) {
        return invalid(format!("vfov {} must be in (0, 180) degrees", config.vfov));
    }
    if !(config.focus_dist > 0.0 && config.focus_dist.is_finite()) {
        return invalid(format!("focus distance {} must be positive", config.focus_dist));
    }
    if !(config.aperture >= 0.0 && config.aperture.is_finite()) {
        return invalid(format!("aperture {} must be non-negative", config.aperture));
    }
    if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
        return invalid(format!("aspect ratio {} must be positive", aspect_ratio));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn straight_ahead() -> CameraConfig {
        CameraConfig::default()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(&straight_ahead(), 2.0).unwrap();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 1e-6);
        assert!((camera.u - Vec3::X).length() < 1e-6);
        assert!((camera.v - Vec3::Y).length() < 1e-6);
        assert!((camera.forward() + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_camera_viewport() {
        // vfov 90 gives a viewport of height 2; aspect 2 gives width 4
        let camera = Camera::new(&straight_ahead(), 2.0).unwrap();

        assert!((camera.horizontal - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
        assert!((camera.vertical - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!((camera.lower_left_corner - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_ray_corners() {
        let camera = Camera::new(&straight_ahead(), 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(center.origin, Vec3::ZERO);
        assert!((center.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((lower_left.direction - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_lens_jitter() {
        let config = straight_ahead().with_lens(90.0, 2.0, 3.0);
        let camera = Camera::new(&config, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(camera.lens_radius(), 1.0);
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            assert_eq!(ray.origin.z, 0.0);
            assert!(ray.origin.length() <= 1.0 + 1e-6);
            // Every ray passes through the focus point
            let focus = ray.at(1.0);
            assert!((focus - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-4);
        }
    }

    #[test]
    fn test_camera_rejects_degenerate_config() {
        let coincident = straight_ahead().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(matches!(
            Camera::new(&coincident, 1.0),
            Err(RenderError::InvalidCamera(_))
        ));

        let parallel_up = straight_ahead().with_position(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(Camera::new(&parallel_up, 1.0).is_err());

        assert!(Camera::new(&straight_ahead().with_lens(0.0, 0.0, 1.0), 1.0).is_err());
        assert!(Camera::new(&straight_ahead().with_lens(90.0, -1.0, 1.0), 1.0).is_err());
        assert!(Camera::new(&straight_ahead().with_lens(90.0, 0.0, 0.0), 1.0).is_err());
        assert!(Camera::new(&straight_ahead(), 0.0).is_err());
    }
}
