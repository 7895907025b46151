//! Particle Morph viewer
//!
//! Opens a window with the particle morph; scroll to morph.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use morph_app::windowed::WindowedApp;
use morph_app::{MorphConfig, WindowConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "particle-morph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scroll-driven sphere-to-spread particle morph", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of particles
    #[arg(short = 'n', long)]
    particles: Option<usize>,

    /// Seed for the spread formation and colors
    #[arg(long)]
    seed: Option<u64>,

    /// Window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Open borderless fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => MorphConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MorphConfig::default(),
    };
    if let Some(count) = cli.particles {
        config.particles.count = count;
    }
    if cli.seed.is_some() {
        config.particles.seed = cli.seed;
    }
    config.validate().context("Invalid configuration")?;

    if cli.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    info!(
        "Particle morph: {} particles, {:?} easing",
        config.particles.count, config.easing
    );

    let window = WindowConfig::new("Particle Morph")
        .size(cli.width, cli.height)
        .fullscreen(cli.fullscreen);
    WindowedApp::run(config, window)?;
    Ok(())
}
