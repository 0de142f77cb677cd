use anyhow::{Context, Result};
use lumen_core::{load_scene, SceneOptions};
use lumen_renderer::{render, RenderConfig};
use std::env;
use std::process;
use std::time::Instant;

/// Output image path, relative to the working directory.
const OUTPUT_PATH: &str = "output.png";

/// Logger at level Info, with `RUST_LOG`-style directives applied on top.
fn log_builder(directives: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(directives) = directives {
        builder.parse_filters(directives);
    }
    builder
}

fn main() -> Result<()> {
    let directives = env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    log_builder(directives.as_deref()).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        let program = args.first().map(String::as_str).unwrap_or("lumen");
        eprintln!("Usage: {} <scene-file>", program);
        process::exit(1);
    }
    if args.len() > 2 {
        log::warn!("Ignoring {} extra argument(s)", args.len() - 2);
    }

    let start = Instant::now();
    let path = &args[1];
    log::info!("Starting Lumen on {}", path);

    let scene = load_scene(path, &SceneOptions::default())
        .with_context(|| format!("Failed to load scene {}", path))?;

    let canvas = render(&scene, &RenderConfig::default());

    canvas
        .save(OUTPUT_PATH)
        .with_context(|| format!("Failed to write {}", OUTPUT_PATH))?;
    log::info!("Wrote {}", OUTPUT_PATH);
    log::info!("Finished in {:.2?}", start.elapsed());

    Ok(())
}
