//! Agent identity and per-variant state.
//!
//! Agents are plain data owned by the model's registry; the grid and the
//! scheduler refer to them by [`AgentId`] handles only. Variant-specific
//! behavior (fire spread, suppression) lives in the model, which is the only
//! place with enough context to mutate shared state mid-tick.

use serde::{Deserialize, Serialize};

/// Unique agent identifier, allocated monotonically for the run's lifetime.
///
/// Ids are never reused, so a retired tree's id can never collide with a
/// still-live agent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AgentId(pub u64);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant-specific agent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    /// A tree, possibly burning.
    Tree {
        /// Whether the tree is currently on fire.
        on_fire: bool,
    },
    /// A suppression unit that hunts the nearest burning tree.
    Firefighter,
}

impl AgentKind {
    /// True for either tree variant state.
    pub fn is_tree(self) -> bool {
        matches!(self, AgentKind::Tree { .. })
    }

    /// True for firefighters.
    pub fn is_firefighter(self) -> bool {
        matches!(self, AgentKind::Firefighter)
    }

    /// Fire state: `Some(on_fire)` for trees, `None` for agents with no
    /// fire state of their own.
    pub fn on_fire(self) -> Option<bool> {
        match self {
            AgentKind::Tree { on_fire } => Some(on_fire),
            AgentKind::Firefighter => None,
        }
    }
}

/// A live agent: identity, grid position, variant state.
///
/// Invariant: `pos` always names the one grid cell whose contents list this
/// agent's id. The model keeps the two sides in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique id, stable for the run.
    pub id: AgentId,
    /// Current cell, `(x, y)`.
    pub pos: (u32, u32),
    /// Variant state.
    pub kind: AgentKind,
}
