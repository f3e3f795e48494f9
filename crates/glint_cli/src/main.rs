mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::scene::{final_scene, single_sphere, Scene};
use glint_renderer::{render, save_ppm, BvhNode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

use settings::{Args, RenderSettings, SceneKind};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let settings = RenderSettings::resolve(&args)?;
    log::debug!("Settings: {:?}", settings);

    // Scene generation and BVH construction share one seeded stream
    let mut rng = StdRng::seed_from_u64(settings.seed);

    let start = Instant::now();
    let Scene { world, camera } = match settings.scene {
        SceneKind::Final => final_scene(settings.width, &mut rng),
        SceneKind::Single => single_sphere(settings.width),
    };
    let bvh = BvhNode::from_list(world, &mut rng).context("Failed to build scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    let (image, stats) = render(&camera, &bvh, &settings.render_config())?;
    log::debug!(
        "{} BVH node visits, {} primitive tests",
        stats.bvh_node_visits,
        stats.primitive_tests
    );

    save_ppm(&image, &settings.output)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;
    log::info!("Saved to {}", settings.output.display());

    Ok(())
}
