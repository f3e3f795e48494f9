//! Render settings: JSON file values overridden by command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_renderer::RenderConfig;
use serde::Deserialize;

/// Which built-in scene to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Random sphere field with three feature spheres
    Final,
    /// One white diffuse sphere
    Single,
}

/// Command-line arguments. Every render option is optional so that only
/// flags actually passed override the config file.
#[derive(Debug, Parser)]
#[command(name = "glint", version, about = "CPU path tracer for sphere scenes")]
pub struct Args {
    /// Output PPM path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Width of the rendered image
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene generation, BVH construction and rendering
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scene to render
    #[arg(long, value_enum)]
    pub scene: Option<SceneKind>,

    /// JSON file with render settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Render rows on the calling thread only
    #[arg(long)]
    pub single_threaded: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Fully resolved render settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub output: PathBuf,
    pub width: u32,
    pub samples: u32,
    pub max_depth: u32,
    pub seed: u64,
    pub scene: SceneKind,
    pub single_threaded: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("image.ppm"),
            width: 1200,
            samples: 10,
            max_depth: 50,
            seed: 0,
            scene: SceneKind::Final,
            single_threaded: false,
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve settings: the config file (if any) over defaults, then any
    /// explicitly passed flags over that.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_args(args);
        Ok(settings)
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(samples) = args.samples {
            self.samples = samples;
        }
        if let Some(max_depth) = args.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(scene) = args.scene {
            self.scene = scene;
        }
        if args.single_threaded {
            self.single_threaded = true;
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            seed: self.seed,
            parallel: !self.single_threaded,
            progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("glint").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults_without_flags() {
        let settings = RenderSettings::resolve(&args(&[])).unwrap();
        assert_eq!(settings, RenderSettings::default());
        assert_eq!(settings.output, PathBuf::from("image.ppm"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let settings = RenderSettings::resolve(&args(&[
            "--width",
            "320",
            "--samples",
            "4",
            "--max-depth",
            "8",
            "--seed",
            "99",
            "--scene",
            "single",
            "--single-threaded",
            "-o",
            "out.ppm",
        ]))
        .unwrap();

        assert_eq!(settings.width, 320);
        assert_eq!(settings.samples, 4);
        assert_eq!(settings.max_depth, 8);
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.scene, SceneKind::Single);
        assert!(settings.single_threaded);
        assert_eq!(settings.output, PathBuf::from("out.ppm"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = RenderSettings::from_json(r#"{"width": 640, "scene": "single"}"#).unwrap();

        assert_eq!(settings.width, 640);
        assert_eq!(settings.scene, SceneKind::Single);
        assert_eq!(settings.samples, RenderSettings::default().samples);
    }

    #[test]
    fn test_unknown_json_field_is_rejected() {
        assert!(RenderSettings::from_json(r#"{"widht": 640}"#).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("glint-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"width": 640, "samples": 32, "seed": 5}"#).unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let settings =
            RenderSettings::resolve(&args(&["--config", &path_arg, "--samples", "2"])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.width, 640);
        assert_eq!(settings.samples, 2);
        assert_eq!(settings.seed, 5);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = RenderSettings::resolve(&args(&["--config", "/nonexistent/glint.json"]))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_render_config_mapping() {
        let settings = RenderSettings {
            single_threaded: true,
            ..RenderSettings::default()
        };
        let config = settings.render_config();

        assert_eq!(config.samples_per_pixel, settings.samples);
        assert!(!config.parallel);
    }
}
