use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{load_scene, SceneDescription};
use lumen_renderer::{
    Camera, LineProgress, NoProgress, ProgressSink, RenderStats, Renderer, Scene,
};

/// Render a sphere scene with the Lumen CPU path tracer.
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about)]
struct Args {
    /// JSON scene file (defaults to the built-in reference scene)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    /// Worker threads (clamped to the host's parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output PPM path
    #[arg(short, long, default_value = "image.ppm")]
    output: PathBuf,

    /// Stream "<col> <row> <r> <g> <b>" lines to stdout as pixels finish
    #[arg(long)]
    progress: bool,
}

impl Args {
    /// Command-line values override the scene file's render settings.
    fn apply_overrides(&self, desc: &mut SceneDescription) {
        let render = &mut desc.render;
        if let Some(width) = self.width {
            render.image_width = width;
        }
        if let Some(height) = self.height {
            render.image_height = height;
        }
        if let Some(samples) = self.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            render.max_depth = depth;
        }
        if let Some(workers) = self.workers {
            render.worker_count = workers;
        }
        if let Some(seed) = self.seed {
            render.seed = seed;
        }
    }
}

/// Render `desc` and encode the finished image as PPM into `writer`.
fn render_scene<W: Write>(
    desc: &SceneDescription,
    progress: &dyn ProgressSink,
    writer: W,
) -> Result<RenderStats> {
    let renderer = Renderer::new(&desc.render)?;
    let camera = Camera::new(&desc.camera, renderer.config().aspect_ratio())
        .context("Failed to set up camera")?;
    let scene = Scene::from_description(desc).context("Failed to build scene")?;

    Ok(renderer.render_to(&camera, &scene, progress, writer)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting Lumen");

    let mut desc = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => SceneDescription::reference(),
    };
    args.apply_overrides(&mut desc);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let writer = BufWriter::new(file);

    let stats = if args.progress {
        render_scene(&desc, &LineProgress::new(std::io::stdout()), writer)
    } else {
        render_scene(&desc, &NoProgress, writer)
    }
    .with_context(|| format!("Failed to render {}", args.output.display()))?;

    log::info!(
        "Saved {} ({} pixels in {:?} on {} workers)",
        args.output.display(),
        stats.pixels,
        stats.elapsed,
        stats.workers
    );

    Ok(())
}
