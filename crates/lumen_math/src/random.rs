//! Random vector generators.
//!
//! All generators draw from a caller-supplied RNG so that renders can be
//! reproduced from a seed.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform random f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform random f32 in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Random vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

/// Random point inside the unit ball (rejection sampled).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit-length vector: a unit ball point, normalized.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        // Points too close to the origin lose precision when normalized
        let len_sq = p.length_squared();
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random point inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_range_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_range_f32(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
        }
    }

    #[test]
    fn test_random_vec3_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let v = random_vec3(&mut rng, 0.25, 0.5);
            assert!(v.min_element() >= 0.25);
            assert!(v.max_element() < 0.5);
        }
    }

    #[test]
    fn test_random_in_unit_sphere() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() <= 1.0);
        }
    }

    #[test]
    fn test_generators_are_reproducible() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
        }
    }
}
