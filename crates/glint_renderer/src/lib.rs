//! Glint renderer - CPU path tracing over a sphere BVH.
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials, accelerated by a bounding volume hierarchy.

mod bvh;
mod camera;
mod error;
mod hittable;
mod material;
mod ppm;
mod renderer;
pub mod sampling;
pub mod scene;
mod sphere;
mod stats;
mod surface;

pub use bvh::BvhNode;
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, refract, Color, Dielectric, Lambertian, Material, Metal, ScatterResult,
};
pub use ppm::{save_ppm, write_ppm};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, ImageBuffer,
    RenderConfig, SHADOW_ACNE_EPSILON,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use stats::TraversalStats;
pub use surface::Surface;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Axis, Interval, Ray, Vec2, Vec3};
