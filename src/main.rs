//! # Stagehand Main Entry Point
//!
//! Parses the command line, sets up logging, builds the demo stage and runs
//! the dispatch loop in a macroquad window.

mod demo;

use clap::Parser;
use macroquad::prelude::*;
use stagehand::{
    FileImageLoader, FrameClock, MacroquadInput, MacroquadSurface, Stage, StageConfig,
    StageResult,
};
use std::path::PathBuf;

#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for the Stagehand demo.
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(about = "A minimal 2D sprite stage with layered rendering")]
#[command(version)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f32>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f32>,

    /// Target ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Backdrop image, relative to the asset root (repeatable)
    #[arg(long = "backdrop")]
    backdrops: Vec<PathBuf>,

    /// Directory image paths are resolved against
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Seed for random placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Merges the config file (if any) with command line overrides.
fn resolve_config(args: &Args) -> StageResult<StageConfig> {
    let mut config = match &args.config {
        Some(path) => StageConfig::load(path)?,
        None => StageConfig::default(),
    };
    if let Some(width) = args.width {
        config.screen_width = width;
    }
    if let Some(height) = args.height {
        config.screen_height = height;
    }
    if let Some(rate) = args.tick_rate {
        config.tick_rate = rate;
    }
    if !args.backdrops.is_empty() {
        config.backdrops = args.backdrops.clone();
    }
    if let Some(root) = &args.assets {
        config.asset_root = root.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn window_conf() -> Conf {
    let config = resolve_config(&Args::parse()).unwrap_or_default();
    Conf {
        window_title: config.window_title,
        window_width: config.screen_width as i32,
        window_height: config.screen_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Stagehand v{}", stagehand::VERSION);

    let stage = match build_stage(&args) {
        Ok(stage) => stage,
        Err(e) => {
            // Without its assets the stage cannot run at all.
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let surface = MacroquadSurface::new(stage.config().viewport());
    stagehand::runtime::run(stage, MacroquadInput::new(), surface, FrameClock::new()).await;
}

/// Loads backdrops and populates the stage with the demo sprites.
fn build_stage(args: &Args) -> StageResult<Stage> {
    let config = resolve_config(args)?;
    let mut loader = FileImageLoader::new(config.asset_root.clone());
    let mut stage = Stage::from_config(config, &mut loader)?;

    let factory = demo::factory()?;
    stage.populate(&factory, &mut loader)?;
    Ok(stage)
}
