//! Vector helpers used by scattering and camera setup.

use crate::Vec3;

/// Absolute per-component tolerance for [`near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// `v / |v|`. The caller guarantees `v` is non-zero.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the boundary.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// True if every component is within [`NEAR_ZERO_EPSILON`] of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().cmplt(Vec3::splat(NEAR_ZERO_EPSILON)).all()
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
