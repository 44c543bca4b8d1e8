//! Tick clock, tick cycle, and simulation facade for the Predation simulation.
//!
//! This crate owns the per-tick scan that drives every agent through
//! breeding, aging, hunger, sleep, and movement, plus the state around it.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter and global turn parity.
//! - [`config`] -- Configuration loading from `predation-config.yaml` into
//!   strongly-typed structs.
//! - [`population`] -- Latest counts and per-tick history.
//! - [`runner`] -- Headless frame-by-frame run loop.
//! - [`simulation`] -- The [`Simulation`] facade.
//! - [`spawn`] -- Initial random placement.
//! - [`tick`] -- The tick cycle.
//!
//! [`Simulation`]: simulation::Simulation

pub mod clock;
pub mod config;
pub mod population;
pub mod runner;
pub mod simulation;
pub mod spawn;
pub mod tick;

pub use clock::{ClockError, TickClock};
pub use config::{ConfigError, SimulationConfig};
pub use population::PopulationTracker;
pub use runner::{EndReason, NoOpCallback, RunResult, Runner, RunnerError, TickCallback};
pub use simulation::{Outcome, SetupError, Simulation};
pub use tick::{SimulationState, TickError, TickSummary, run_tick};
