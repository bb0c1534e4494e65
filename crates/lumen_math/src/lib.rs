// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod random;
mod ray;
mod vector;

pub use interval::Interval;
pub use random::{
    gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec3,
};
pub use ray::Ray;
pub use vector::{degrees_to_radians, near_zero, reflect, refract, unit_vector, NEAR_ZERO_EPSILON};

/// Color type alias (linear RGB, nominally 0-1 per channel)
pub type Color = Vec3;
