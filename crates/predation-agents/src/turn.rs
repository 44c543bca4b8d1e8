//! Per-tick context handed to agent behaviors.

use predation_types::Parity;

use crate::config::EcosystemConfig;

/// Read-only inputs every behavior in one tick shares.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    /// Species parameters.
    pub config: &'a EcosystemConfig,
    /// Parity stamped onto agents born during this tick: the tick's global
    /// parity.
    pub newborn_parity: Parity,
    /// The tick being processed.
    pub tick: u64,
}

impl<'a> TurnContext<'a> {
    /// Build the context for a tick running under `global_parity`.
    pub const fn new(config: &'a EcosystemConfig, global_parity: Parity, tick: u64) -> Self {
        Self {
            config,
            newborn_parity: global_parity,
            tick,
        }
    }
}
