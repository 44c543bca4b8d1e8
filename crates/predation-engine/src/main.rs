//! Terminal run loop for the Predation simulation.
//!
//! Loads configuration, builds and populates the grid, and animates the
//! run in the terminal until one species dies out.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$PREDATION_CONFIG` or `predation-config.yaml`
//! 2. Initialize structured logging (tracing, to stderr)
//! 3. Build the simulation and place the initial populations
//! 4. Show the initial grid for the start delay
//! 5. Every refresh interval run one frame of ticks and redraw
//! 6. Print the verdict and the population histogram

mod error;
mod render;

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use predation_core::config::LogFormat;
use predation_core::runner::{self, EndReason, NoOpCallback, Runner};
use predation_core::{Simulation, SimulationConfig};
use predation_world::RandomSource;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Environment variable naming an alternative config file.
const CONFIG_ENV: &str = "PREDATION_CONFIG";

/// Config file read from the working directory by default.
const DEFAULT_CONFIG_PATH: &str = "predation-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, setup, a tick, or terminal output
/// fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration (before logging, which reads its level).
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    info!("predation-engine starting");
    info!(
        source = %source
            .as_deref()
            .map_or_else(|| "defaults".to_owned(), |p| p.display().to_string()),
        dimension = config.world.dimension,
        seed = ?config.world.seed,
        tick_multiple = config.run.tick_multiple,
        refresh_rate_ms = config.run.refresh_rate_ms,
        max_ticks = ?config.run.max_ticks,
        "Configuration loaded"
    );

    // 3. Build the simulation.
    let mut sim = Simulation::new(&config)?;

    // 4. Initial frame.
    present(&sim)?;
    tokio::time::sleep(Duration::from_millis(config.run.start_delay_ms)).await;

    // 5. Paced frames.
    let mut runner = Runner::new(&config.run);
    let refresh = Duration::from_millis(config.run.refresh_rate_ms);
    let end_reason = loop {
        tokio::time::sleep(refresh).await;
        let step = runner.step_frame(&mut sim, &mut NoOpCallback)?;
        present(&sim)?;
        if let Some(reason) = step {
            break reason;
        }
    };

    // 6. Verdict and histogram.
    let result = runner.finish(end_reason);
    runner::log_run_end(&result);

    let mut out = std::io::stdout().lock();
    match result.end_reason {
        EndReason::Extinction { outcome } => {
            writeln!(out, "{outcome} after {} Ticks", sim.tick_number())?;
        }
        EndReason::MaxTicksReached => {
            writeln!(out, "Tick limit reached after {} Ticks", sim.tick_number())?;
        }
    }
    writeln!(out)?;
    out.write_all(
        render::render_histogram(
            sim.population_history(),
            config.run.histogram_width,
            config.run.histogram_height,
        )
        .as_bytes(),
    )?;
    out.flush()?;

    let history = sim.state().population.history_json()?;
    debug!(%history, "Population history");

    Ok(())
}

/// Draw one frame to stdout, clearing the screen first on a terminal.
fn present<R: RandomSource>(sim: &Simulation<R>) -> Result<(), EngineError> {
    let frame = render::render_grid(sim)?;
    let mut out = std::io::stdout().lock();
    if out.is_terminal() {
        out.write_all(render::CLEAR_SCREEN.as_bytes())?;
    }
    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Load configuration from `$PREDATION_CONFIG` or `predation-config.yaml`.
///
/// Falls back to defaults when the file does not exist. Returns the path
/// that was read, if any. `PREDATION_SEED` applies in both cases.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    let config_path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        let mut config = SimulationConfig::default();
        config.world.apply_env_overrides()?;
        Ok((config, None))
    }
}
