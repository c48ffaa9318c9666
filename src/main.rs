use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use beacon::{Camera, Renderer, Scene};
use clap::Parser;
use image::RgbaImage;
use log::info;

/// Renders the demo scene headlessly and writes the converged image as PNG.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Number of frames to accumulate.
    #[arg(short, long, default_value_t = 64)]
    frames: u32,

    #[arg(short, long, default_value_t = 5)]
    bounces: usize,

    /// Start over every frame instead of averaging.
    #[arg(long)]
    no_accumulate: bool,

    /// Use the thread RNG instead of the PCG hash for scatter directions.
    #[arg(long)]
    slow_render: bool,

    #[arg(long)]
    weighted_emission: bool,

    #[arg(short, long, default_value = "beacon.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scene = Scene::demo();
    let camera = Camera::new(45.0, 0.1, 100.0, args.width, args.height);

    let mut renderer = Renderer::new(args.width, args.height);
    renderer.settings.accumulate = !args.no_accumulate;
    renderer.settings.slow_render = args.slow_render;
    renderer.settings.bounce_limit = args.bounces;
    renderer.settings.weighted_emission = args.weighted_emission;

    let started = Instant::now();
    for frame in 1..=args.frames {
        renderer.render(&scene, &camera)?;
        if frame % 16 == 0 || frame == args.frames {
            info!("frame {}/{} ({:.1?} so far)", frame, args.frames, started.elapsed());
        }
    }

    let (width, height) = renderer.size();
    let image = RgbaImage::from_raw(width, height, renderer.image_bytes().to_vec())
        .context("pixel buffer does not match the image size")?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("wrote {}", args.output.display());
    Ok(())
}
