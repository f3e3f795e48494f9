//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce budget
//! - Anti-aliasing via multi-sampling
//! - Row-parallel rendering with one seeded generator per row

use std::time::Instant;

use crate::{Camera, Color, Hittable, RenderError, RenderResult, TraversalStats};
use glint_math::{Interval, Ray};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Smallest accepted hit distance, keeps scattered rays from re-hitting
/// their own origin.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for every random draw made while rendering
    pub seed: u64,
    /// Spread rows over the rayon thread pool
    pub parallel: bool,
    /// Draw a per-row progress bar on stderr
    pub progress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
            parallel: true,
            progress: true,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Each hit multiplies the attenuation of the scattering material into the
/// color gathered by the scattered ray. Rays that escape see the sky.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
    stats: &mut TraversalStats,
) -> Color {
    // Bounce budget exhausted, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    stats.record_ray();

    let Some(rec) = world.hit_counted(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY), stats)
    else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth - 1, rng, stats)
        }
        None => Color::ZERO,
    }
}

/// Background: white at the horizon blending to light blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
///
/// Gamma-corrects each channel, clamps it to [0, 0.999] and scales by 256,
/// so every channel lands in [0, 255].
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.0, 0.999);
    let channel = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel with multi-sampling. Returns the averaged color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    stats: &mut TraversalStats,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng, stats);
    }

    pixel_color * (1.0 / config.samples_per_pixel as f32)
}

/// Image buffer of averaged linear colors, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-corrected 8-bit RGB triples in raster order.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|&c| color_to_rgb8(c)).collect()
    }
}

/// Seed for the generator that owns one image row.
fn row_seed(seed: u64, row: u32) -> u64 {
    seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    y: u32,
    config: &RenderConfig,
) -> (Vec<Color>, TraversalStats) {
    let mut rng = StdRng::seed_from_u64(row_seed(config.seed, y));
    let mut stats = TraversalStats::new();

    let row = (0..camera.image_width)
        .map(|x| render_pixel(camera, world, x, y, config, &mut rng, &mut stats))
        .collect();

    (row, stats)
}

/// Row-count progress bar, hidden when progress reporting is off.
fn row_progress(rows: u32, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(rows as u64);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Render every row in raster order, ticking `progress` once per finished row.
fn render_rows(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    progress: &ProgressBar,
) -> Vec<(Vec<Color>, TraversalStats)> {
    let render_and_tick = |y| {
        let row = render_row(camera, world, y, config);
        progress.inc(1);
        row
    };

    if config.parallel {
        (0..camera.image_height)
            .into_par_iter()
            .map(render_and_tick)
            .collect()
    } else {
        (0..camera.image_height).map(render_and_tick).collect()
    }
}

/// Render the entire scene.
///
/// Each row draws from its own generator seeded from `config.seed`, so the
/// image is the same whether rows run in parallel or one after another.
/// Rows are gathered in raster order.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<(ImageBuffer, TraversalStats)> {
    config.validate()?;
    if camera.image_width == 0 || camera.image_height == 0 {
        return Err(RenderError::InvalidConfig(format!(
            "image size {}x{} is empty",
            camera.image_width, camera.image_height
        )));
    }

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}{}",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth,
        if config.parallel { "" } else { " (single-threaded)" }
    );
    let start = Instant::now();

    let progress = row_progress(camera.image_height, config.progress);
    let rows = render_rows(camera, world, config, &progress);
    progress.finish_and_clear();

    let mut image = ImageBuffer {
        width: camera.image_width,
        height: camera.image_height,
        pixels: Vec::with_capacity(camera.image_width as usize * camera.image_height as usize),
    };
    let mut stats = TraversalStats::new();
    for (row, row_stats) in rows {
        image.pixels.extend(row);
        stats.merge(&row_stats);
    }

    log::info!(
        "Rendered in {:?}: {} rays, {:.1} BVH nodes per ray, max BVH depth {}",
        start.elapsed(),
        stats.rays,
        stats.nodes_per_ray(),
        stats.max_bvh_depth
    );

    Ok((image, stats))
}
