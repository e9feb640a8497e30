// External crates
use anyhow::{Context, Result};
use clap::Parser;
use log::info;

// STD library
use std::sync::atomic::AtomicBool;

// Internal imports
use depth_rasterizer::config::Args;
use depth_rasterizer::obj::{load_obj, triangulate};
use depth_rasterizer::pipeline::Renderer;
use depth_rasterizer::screen::ScreenSpace;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cores = args.threads.unwrap_or_else(num_cpus::get);
    info!("Projection threads: {}", cores);
    rayon::ThreadPoolBuilder::new()
        .num_threads(cores)
        .build_global()
        .context("failed to build thread pool")?;

    // Load and mesh the model before anything is drawn
    let mut model = load_obj(&args.mesh, &args.load_options())
        .with_context(|| format!("failed to load {}", args.mesh.display()))?;
    triangulate(&mut model).with_context(|| format!("failed to triangulate {}", args.mesh.display()))?;
    info!("Loaded {:?}: {} triangles", model.name, model.triangles.len());

    let config = args.frame_config();
    let mut renderer = Renderer::new(model, config);
    renderer.orient(args.initial_yaw, args.initial_roll);

    match &args.output {
        Some(path) => {
            let mut screen = ScreenSpace::new(config.width, config.height);
            let stop = AtomicBool::new(false);
            let frames = renderer.run(&mut screen, &stop, Some(args.frames.unwrap_or(1)))?;
            screen.save_png(path)?;
            info!("Rendered {} frames, saved {}", frames, path.display());
        }
        None => run_window(&mut renderer, args.frames)?,
    }
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(renderer: &mut Renderer, max_frames: Option<u64>) -> Result<()> {
    use depth_rasterizer::screen::DisplaySurface;
    use depth_rasterizer::window::RaylibSurface;

    let config = *renderer.config();
    let mut surface = RaylibSurface::open(config.width, config.height, "depth-rasterizer")?;
    while !surface.should_close() && max_frames.is_none_or(|max| renderer.frames() < max) {
        let stats = renderer.render_frame(&mut surface)?;
        // Perf stats
        surface.set_overlay(format!(
            "Rotate: {:.2?}\nProject: {:.2?}\nRaster: {:.2?}\nFrame: {:.2?}",
            stats.rotate_time, stats.project_time, stats.raster_time, stats.frame_time
        ));
    }
    info!("Window closed after {} frames", renderer.frames());
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_renderer: &mut Renderer, _max_frames: Option<u64>) -> Result<()> {
    anyhow::bail!("built without the `window` feature; pass --output <PNG> to render headless")
}
