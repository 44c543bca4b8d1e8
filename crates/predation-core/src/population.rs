//! Population history.
//!
//! The tracker holds the most recent count pair and an append-only
//! history with one sample per completed tick. The count taken right
//! after the initial spawn is the latest sample but not part of the
//! history.

use predation_types::PopulationSample;

/// Latest counts plus per-tick history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationTracker {
    /// Counts from the most recent observation.
    latest: PopulationSample,
    /// One sample per completed tick, oldest first.
    history: Vec<PopulationSample>,
}

impl PopulationTracker {
    /// Create a tracker with zero counts and no history.
    pub const fn new() -> Self {
        Self {
            latest: PopulationSample::new(0, 0),
            history: Vec::new(),
        }
    }

    /// Set the latest counts without extending the history.
    pub const fn observe(&mut self, sample: PopulationSample) {
        self.latest = sample;
    }

    /// Record the counts at the end of a tick.
    pub fn record(&mut self, sample: PopulationSample) {
        self.latest = sample;
        self.history.push(sample);
    }

    /// Return the most recent counts.
    pub const fn latest(&self) -> PopulationSample {
        self.latest
    }

    /// Return every recorded sample, oldest first.
    pub fn history(&self) -> &[PopulationSample] {
        &self.history
    }

    /// Serialize the history as a JSON array of `{predators, prey}` objects.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.history)
    }
}
