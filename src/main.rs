use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use conway3d::{Algorithm, Preset, SimConfig, Simulation};
use tracing_subscriber::EnvFilter;

/// Headless driver for the 3D automaton: seeds a preset, then steps and
/// reports each generation's change set.
#[derive(Debug, Parser)]
#[command(name = "conway3d", version, about)]
struct Cli {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side length of the cube
    #[arg(short, long)]
    size: Option<usize>,

    /// Preset name or index (random, two_walls, weird_corners, halfsies, triangular, single_beam)
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Seed for the randomized presets
    #[arg(long)]
    seed: Option<u64>,

    /// Step algorithm (serial or parallel)
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Number of generations to run
    #[arg(short, long, default_value_t = 10)]
    generations: u64,

    /// Pause between generations
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Write the effective settings to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => SimConfig::default(),
        };

        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(preset) = self.preset {
            config.preset = preset;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }

        config.validate().context("Invalid settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.settings()?;

    if let Some(path) = &cli.write_config {
        config
            .to_file(path)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    let (mut sim, seeded) = Simulation::from_config(&config).context("Failed to start simulation")?;
    println!(
        "{}³ grid, preset {}, {} cells seeded, {} step",
        config.grid_size,
        sim.preset(),
        seeded.len(),
        sim.algorithm().name()
    );
    if sim.preset().is_randomized() {
        println!("random source: density {:.3}, seed {:?}", sim.density(), config.seed);
        if config.seed.is_none() {
            tracing::warn!(preset = %sim.preset(), "no seed given, this run is not reproducible");
        }
    }

    println!(
        "{:>6} {:>8} {:>8} {:>8} {:>10} {:>10}",
        "Gen", "Born", "Died", "Net", "Alive", "Time"
    );
    println!("{:-<55}", "");

    let interval = cli.interval_ms.map(Duration::from_millis);
    for _ in 0..cli.generations {
        let start = Instant::now();
        let changes = sim.step();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        println!(
            "{:>6} {:>8} {:>8} {:>+8} {:>10} {:>8.2}ms",
            sim.generation(),
            changes.born().count(),
            changes.died().count(),
            changes.net(),
            sim.grid().population(),
            elapsed_ms
        );

        if let Some(interval) = interval {
            std::thread::sleep(interval.saturating_sub(start.elapsed()));
        }
    }

    Ok(())
}
