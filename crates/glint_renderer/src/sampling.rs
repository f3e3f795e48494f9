//! Random sampling helpers.
//!
//! Every helper takes the generator explicitly so that BVH construction and
//! rendering stay reproducible for a given seed.

use crate::Color;
use glint_math::{Vec2, Vec3};
use rand::{Rng, RngCore};

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform float in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniform point in the cube [min, max)^3.
fn random_in_cube(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

/// Random point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_cube(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the unit sphere.
///
/// Rejection-samples the cube until a point falls strictly inside the
/// sphere, then normalizes it. Points too close to the origin are rejected
/// as well so the normalization stays finite.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_cube(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if len_sq > 1e-12 && len_sq < 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random point strictly inside the unit disk in the xy plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec2 {
    loop {
        let p = Vec2::new(gen_range_f32(rng, -1.0, 1.0), gen_range_f32(rng, -1.0, 1.0));
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random color with each channel in [min, max).
pub fn random_color(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    random_in_cube(rng, min, max)
}

/// True if every component is below 1e-8 in magnitude.
#[inline]
pub fn is_near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_unit_vector_is_normalized() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_random_in_unit_sphere_is_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_in_unit_disk_is_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_disk(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_color_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = random_color(&mut rng, 0.5, 1.0);
            assert!(c.min_element() >= 0.5 && c.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_is_near_zero() {
        assert!(is_near_zero(Vec3::ZERO));
        assert!(is_near_zero(Vec3::splat(1e-9)));
        assert!(!is_near_zero(Vec3::new(0.0, 1e-7, 0.0)));
    }

    #[test]
    fn test_same_seed_same_samples() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
        }
    }
}
