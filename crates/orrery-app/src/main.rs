//! Headless orrery driver.
//!
//! Loads `config.ron`, applies CLI overrides, builds the scene and runs the
//! fixed-timestep loop. With `--frames N` the loop is fed a synthetic frame
//! time and exits after N frames; with `--frames 0` it runs against the wall
//! clock until interrupted.
//!
//! Run with `cargo run -p orrery-app -- --frames 600 --seed 7`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use orrery_app::{FrameSnapshot, GameLoop, SceneError, SceneState};
use orrery_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from(".orrery"));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Orrery failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), SceneError> {
    let mut scene = SceneState::from_config(config)?;
    let mut game_loop = GameLoop::new(config.simulation.time_scale);
    let report_interval = config.debug.report_interval.max(1);
    let frames = config.simulation.frames;

    info!(
        planets = scene.planets().len(),
        frames,
        time_scale = config.simulation.time_scale,
        "Starting orrery"
    );

    let mut rendered = 0u64;
    let mut last = None;
    let mut render = |scene: &SceneState, alpha: f64| {
        let frame = scene.frame();
        if rendered % report_interval == 0 {
            report(&frame, alpha);
        }
        rendered += 1;
        last = Some(frame);
    };
    let update = |scene: &mut SceneState, dt: f64, _sim_time: f64| scene.update(dt);

    if frames == 0 {
        let pause = Duration::try_from_secs_f64(config.simulation.frame_time).unwrap_or(Duration::ZERO);
        loop {
            game_loop.tick(&mut scene, update, &mut render);
            std::thread::sleep(pause);
        }
    }

    for _ in 0..frames {
        game_loop.tick_with(config.simulation.frame_time, &mut scene, update, &mut render);
    }

    info!(
        frames = game_loop.frame_count(),
        ticks = game_loop.update_count(),
        sim_time = game_loop.total_sim_time(),
        "Run complete"
    );
    if let Some(frame) = last {
        report(&frame, game_loop.alpha());
    }
    Ok(())
}

fn report(frame: &FrameSnapshot, alpha: f64) {
    let sun = frame.sun.w_axis.truncate();
    let first_planet = frame.planets.first().map(|m| m.w_axis.truncate());
    info!(
        time = frame.time,
        alpha,
        ?sun,
        ?first_planet,
        belt = frame.belt.len(),
        ring = frame.ring.len(),
        light = ?frame.light_position,
        "Frame"
    );
}
