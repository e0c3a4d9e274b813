//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Headless solar-system simulation")]
pub struct CliArgs {
    /// Number of frames to simulate (0 = run until interrupted).
    #[arg(long)]
    pub frames: Option<u64>,

    /// Simulation seconds per wall-clock second.
    #[arg(long)]
    pub time_scale: Option<f64>,

    /// Seed for both the asteroid belt and the ring.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sphere latitude subdivisions.
    #[arg(long)]
    pub rings: Option<u32>,

    /// Sphere longitude subdivisions.
    #[arg(long)]
    pub sectors: Option<u32>,

    /// Worker threads for asteroid updates (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(frames) = args.frames {
            self.simulation.frames = frames;
        }
        if let Some(scale) = args.time_scale {
            self.simulation.time_scale = scale;
        }
        if let Some(seed) = args.seed {
            self.belt.seed = Some(seed);
            self.ring.seed = Some(seed);
        }
        if let Some(rings) = args.rings {
            self.mesh.rings = rings;
        }
        if let Some(sectors) = args.sectors {
            self.mesh.sectors = sectors;
        }
        if let Some(workers) = args.workers {
            self.simulation.asteroid_workers = workers;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
