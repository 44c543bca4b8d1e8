//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the run loop.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: predation_core::ConfigError,
    },

    /// The simulation could not be built.
    #[error("setup error: {source}")]
    Setup {
        /// The underlying setup error.
        #[from]
        source: predation_core::SetupError,
    },

    /// The run loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: predation_core::RunnerError,
    },

    /// The grid could not be read for rendering.
    #[error("render error: {source}")]
    Render {
        /// The underlying agent-layer error.
        #[from]
        source: predation_agents::AgentError,
    },

    /// Writing to the terminal failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The population history could not be serialized.
    #[error("history serialization error: {source}")]
    History {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
