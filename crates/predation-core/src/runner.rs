//! Headless run loop.
//!
//! A [`Runner`] drives a [`Simulation`] in frames of `tick_multiple` ticks
//! and stops when:
//!
//! - **Extinction**: either species reaches zero
//! - **Tick limit**: `max_ticks` ticks have run
//!
//! It never sleeps. The engine binary owns wall-clock pacing and calls
//! [`Runner::step_frame`] between renders; tests call [`Runner::run`].

use predation_world::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::simulation::{Outcome, Simulation};
use crate::tick::{SimulationState, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// One species died out.
    Extinction {
        /// Which species outlasted the other.
        outcome: Outcome,
    },
    /// The configured tick limit was reached with both species alive.
    MaxTicksReached,
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The reason the run ended.
    pub end_reason: EndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Ticks executed by this runner.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Frame-by-frame driver.
#[derive(Debug, Clone)]
pub struct Runner {
    /// Ticks per frame.
    tick_multiple: u32,
    /// Absolute tick number to stop at.
    max_ticks: Option<u64>,
    /// Ticks executed so far.
    total_ticks: u64,
    /// Summary of the most recent tick.
    last_summary: Option<TickSummary>,
}

impl Runner {
    /// Create a runner from the `run` config section.
    pub const fn new(config: &RunConfig) -> Self {
        Self::with_limits(config.tick_multiple, config.max_ticks)
    }

    /// Create a runner with explicit limits. A zero `tick_multiple` is
    /// treated as 1.
    pub const fn with_limits(tick_multiple: u32, max_ticks: Option<u64>) -> Self {
        Self {
            tick_multiple: if tick_multiple == 0 { 1 } else { tick_multiple },
            max_ticks,
            total_ticks: 0,
            last_summary: None,
        }
    }

    /// Return the stop condition that currently holds, if any.
    pub const fn end_reason<R: RandomSource>(&self, sim: &Simulation<R>) -> Option<EndReason> {
        if let Some(outcome) = sim.outcome() {
            return Some(EndReason::Extinction { outcome });
        }
        match self.max_ticks {
            Some(limit) if sim.tick_number() >= limit => Some(EndReason::MaxTicksReached),
            _ => None,
        }
    }

    /// Run up to `tick_multiple` ticks, stopping early when the run ends.
    ///
    /// Returns the end reason once a stop condition holds.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if a tick execution fails.
    pub fn step_frame<R: RandomSource>(
        &mut self,
        sim: &mut Simulation<R>,
        callback: &mut dyn TickCallback,
    ) -> Result<Option<EndReason>, RunnerError> {
        for _ in 0..self.tick_multiple {
            if let Some(reason) = self.end_reason(sim) {
                return Ok(Some(reason));
            }
            let summary = sim.tick()?;
            self.total_ticks = self.total_ticks.saturating_add(1);
            callback.on_tick(&summary, sim.state());
            self.last_summary = Some(summary);
        }
        Ok(self.end_reason(sim))
    }

    /// Run frames until a stop condition holds.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if a tick execution fails.
    pub fn run<R: RandomSource>(
        mut self,
        sim: &mut Simulation<R>,
        callback: &mut dyn TickCallback,
    ) -> Result<RunResult, RunnerError> {
        info!(
            tick_multiple = self.tick_multiple,
            max_ticks = ?self.max_ticks,
            "Run starting"
        );
        loop {
            if let Some(reason) = self.step_frame(sim, callback)? {
                return Ok(self.finish(reason));
            }
        }
    }

    /// Consume the runner into its result.
    pub fn finish(self, end_reason: EndReason) -> RunResult {
        RunResult {
            end_reason,
            final_summary: self.last_summary,
            total_ticks: self.total_ticks,
        }
    }

    /// Return the ticks executed so far.
    pub const fn total_ticks(&self) -> u64 {
        self.total_ticks
    }
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Run ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            predators = summary.population.predators,
            prey = summary.population.prey,
            "Final tick summary"
        );
    } else {
        warn!("Run ended with no ticks executed");
    }
}
