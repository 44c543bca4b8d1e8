//! Agent identifiers.
//!
//! Agents are addressed by an [`AgentId`] handle rather than by reference.
//! Handles are allocated from a per-habitat monotonic counter starting at 1
//! and are never reused within a run, so a stale handle can only ever miss
//! (the arena no longer holds it), never alias a newer agent.

use serde::{Deserialize, Serialize};

/// Unique, monotonically increasing identifier for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl AgentId {
    /// Return the raw counter value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Return the identifier that follows this one, or `None` on overflow.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<AgentId> for u64 {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(AgentId(1).next(), Some(AgentId(2)));
    }

    #[test]
    fn next_overflow_is_none() {
        assert_eq!(AgentId(u64::MAX).next(), None);
    }

    #[test]
    fn ids_order_by_allocation() {
        assert!(AgentId(3) < AgentId(10));
        assert_eq!(AgentId(7).to_string(), "#7");
    }
}
