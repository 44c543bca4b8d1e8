//! Agent state, vitals, movement, and breeding for the Predation simulation.
//!
//! This crate contains the logic layer for agents: everything that operates
//! on agent state without touching I/O or the tick clock. It sits between
//! `predation-world` (grid and randomness) and `predation-core` (the tick
//! pipeline that decides which agent acts when).
//!
//! # Modules
//!
//! - [`agent`] -- The [`Agent`] enum and its per-species state
//! - [`config`] -- Species parameters ([`EcosystemConfig`])
//! - [`death`] -- Death causes and records ([`DeathCause`], [`DeathRecord`])
//! - [`error`] -- Error types for all agent operations ([`AgentError`])
//! - [`habitat`] -- The [`Habitat`]: grid plus agent arena
//! - [`movement`] -- Relocation and predation ([`move_agent`], [`kill`])
//! - [`reproduction`] -- Breeding ([`handle_breeding`])
//! - [`turn`] -- Shared per-tick inputs ([`TurnContext`])
//! - [`vitals`] -- Aging, hunger, and sleep

pub mod agent;
pub mod config;
pub mod death;
pub mod error;
pub mod habitat;
pub mod movement;
pub mod reproduction;
pub mod turn;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use agent::{Agent, AgentCore, PredatorState, PreyState};
pub use config::{EcosystemConfig, PredatorConfig, PreyConfig, SpeciesTraits};
pub use death::{DeathCause, DeathRecord};
pub use error::AgentError;
pub use habitat::Habitat;
pub use movement::{MoveOutcome, kill, move_agent};
pub use reproduction::{BirthRecord, BreedingOutcome, handle_breeding};
pub use turn::TurnContext;
pub use vitals::{LifeOutcome, SleepOutcome, handle_age, handle_hunger, handle_sleep};
