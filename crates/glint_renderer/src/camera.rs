//! Thin-lens camera for ray generation.

use crate::sampling::{gen_f32, random_in_unit_disk};
use glint_math::{Ray, Vec2, Vec3};
use rand::RngCore;

/// Derived viewing frame, recomputed by [`Camera::initialize`].
#[derive(Debug, Clone, Copy)]
struct Frame {
    origin: Vec3,
    /// World position of the center of pixel (0, 0)
    pixel00: Vec3,
    /// Step to the next pixel to the right
    step_right: Vec3,
    /// Step to the next pixel down
    step_down: Vec3,
    /// Orthonormal basis: `w` points backwards, `u` right, `v` up
    u: Vec3,
    v: Vec3,
    w: Vec3,
    /// Defocus disk axes, scaled by the disk radius
    disk_u: Vec3,
    disk_v: Vec3,
}

impl Frame {
    const UNSET: Frame = Frame {
        origin: Vec3::ZERO,
        pixel00: Vec3::ZERO,
        step_right: Vec3::ZERO,
        step_down: Vec3::ZERO,
        u: Vec3::X,
        v: Vec3::Y,
        w: Vec3::Z,
        disk_u: Vec3::ZERO,
        disk_v: Vec3::ZERO,
    };
}

/// Camera for generating rays into the scene.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`]
/// before asking for rays.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view, degrees
    vfov: f32,
    /// Cone angle of rays through each pixel, degrees; 0 is a pinhole
    defocus_angle: f32,
    /// Distance to the plane in perfect focus
    focus_dist: f32,

    frame: Frame,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            image_width: 100,
            image_height: 100,
            look_from: Vec3::new(0.0, 0.0, -1.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            frame: Frame::UNSET,
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the width and derive the height from an `aspect_w:aspect_h`
    /// ratio, rounded down to at least 1 pixel.
    pub fn with_aspect_ratio(mut self, width: u32, aspect_w: u32, aspect_h: u32) -> Self {
        let height = width as u64 * aspect_h as u64 / aspect_w.max(1) as u64;
        self.image_width = width;
        self.image_height = height.clamp(1, u32::MAX as u64) as u32;
        self
    }

    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Field of view (degrees), defocus cone angle (degrees) and focus distance.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Compute the viewing frame. Must run after the last `with_*` call.
    pub fn initialize(&mut self) {
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let half_height = (self.vfov.to_radians() * 0.5).tan() * self.focus_dist;
        let half_width = half_height * (self.image_width as f32 / self.image_height as f32);

        // Image rows run down the viewport, against v
        let across = 2.0 * half_width * u;
        let down = -2.0 * half_height * v;
        let step_right = across / self.image_width as f32;
        let step_down = down / self.image_height as f32;

        let upper_left = self.look_from - self.focus_dist * w - 0.5 * (across + down);

        let disk_radius = self.focus_dist * (self.defocus_angle * 0.5).to_radians().tan();

        self.frame = Frame {
            origin: self.look_from,
            pixel00: upper_left + 0.5 * (step_right + step_down),
            step_right,
            step_down,
            u,
            v,
            w,
            disk_u: disk_radius * u,
            disk_v: disk_radius * v,
        };
    }

    /// Ray through pixel (i, j) for explicit sample offsets.
    ///
    /// `jitter` is the sub-pixel offset in [-0.5, 0.5]^2 and `lens` a point
    /// in the unit disk. The lens sample is ignored for a pinhole camera.
    pub fn ray_for_sample(&self, i: u32, j: u32, jitter: Vec2, lens: Vec2) -> Ray {
        let f = &self.frame;
        let target = f.pixel00
            + (i as f32 + jitter.x) * f.step_right
            + (j as f32 + jitter.y) * f.step_down;

        let origin = if self.is_pinhole() {
            f.origin
        } else {
            f.origin + lens.x * f.disk_u + lens.y * f.disk_v
        };

        Ray::new(origin, target - origin)
    }

    /// Ray through a random point of pixel (i, j), from a random lens point.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let jitter = Vec2::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5);
        let lens = if self.is_pinhole() {
            Vec2::ZERO
        } else {
            random_in_unit_disk(rng)
        };
        self.ray_for_sample(i, j, jitter, lens)
    }

    pub fn center(&self) -> Vec3 {
        self.frame.origin
    }

    fn is_pinhole(&self) -> bool {
        self.defocus_angle <= 0.0
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn looking_down_z(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();
        camera
    }

    #[test]
    fn test_basis_is_right_handed() {
        let camera = looking_down_z(800, 600);

        assert_eq!(camera.center(), Vec3::ZERO);
        assert!((camera.frame.w - Vec3::Z).length() < 0.001);
        assert!((camera.frame.u - Vec3::X).length() < 0.001);
        assert!((camera.frame.v - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_aspect_ratio_sets_height() {
        let camera = Camera::new().with_aspect_ratio(1200, 16, 9);
        assert_eq!(camera.image_height, 675);

        let tiny = Camera::new().with_aspect_ratio(1, 16, 9);
        assert_eq!(tiny.image_width, 1);
        assert_eq!(tiny.image_height, 1);
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let camera = looking_down_z(101, 101);
        let ray = camera.ray_for_sample(50, 50, Vec2::ZERO, Vec2::ZERO);

        let dir = ray.direction().normalize();
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_top_left_pixel_is_up_and_left() {
        let camera = looking_down_z(100, 100);
        let ray = camera.ray_for_sample(0, 0, Vec2::ZERO, Vec2::ZERO);

        assert!(ray.direction().x < 0.0);
        assert!(ray.direction().y > 0.0);
        assert!(ray.direction().z < 0.0);
    }

    #[test]
    fn test_pinhole_ignores_lens_sample() {
        let camera = looking_down_z(10, 10);
        let ray = camera.ray_for_sample(3, 4, Vec2::ZERO, Vec2::new(0.9, -0.3));
        assert_eq!(ray.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_defocus_moves_origin_within_disk() {
        let mut camera = Camera::new()
            .with_resolution(10, 10)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(40.0, 10.0, 5.0);
        camera.initialize();

        let radius = 5.0 * (5.0_f32).to_radians().tan();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ray = camera.get_ray(5, 5, &mut rng);
            assert!(ray.origin().length() <= radius + 1e-5);
            assert_eq!(ray.origin().z, 0.0);
        }
    }

    #[test]
    fn test_jittered_rays_stay_inside_pixel_cone() {
        let camera = looking_down_z(100, 100);
        let mut rng = StdRng::seed_from_u64(42);

        let corner_a = camera.ray_for_sample(50, 50, Vec2::splat(-0.5), Vec2::ZERO);
        let corner_b = camera.ray_for_sample(50, 50, Vec2::splat(0.5), Vec2::ZERO);
        for _ in 0..100 {
            let ray = camera.get_ray(50, 50, &mut rng);
            let d = ray.direction();
            assert!(d.z < 0.0);
            assert!(d.x >= corner_a.direction().x && d.x <= corner_b.direction().x);
        }
    }
}
