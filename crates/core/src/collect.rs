//! Append-only per-tick fire-state records.

use serde::{Deserialize, Serialize};

use crate::agent::AgentId;

/// One observation row: which agent, at which tick, burning or not.
///
/// `on_fire` is `None` for agents that have no fire state of their own
/// (firefighters); trees always report `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireRecord {
    /// Tick index the observation was taken at, before that tick's
    /// activation pass ran.
    pub tick: u64,
    /// The observed agent.
    pub agent: AgentId,
    /// Fire state, or `None` for non-tree agents.
    pub on_fire: Option<bool>,
}

/// Passive recorder consumed by external reporting.
///
/// The simulation appends one row per scheduled agent immediately before
/// each activation pass and never reads the log back.
#[derive(Debug, Clone, Default)]
pub struct DataCollector {
    records: Vec<FireRecord>,
}

impl DataCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation row.
    pub fn record(&mut self, record: FireRecord) {
        self.records.push(record);
    }

    /// All rows in collection order.
    pub fn records(&self) -> &[FireRecord] {
        &self.records
    }

    /// Rows collected at the start of one tick, in collection order.
    pub fn tick_records(&self, tick: u64) -> impl Iterator<Item = &FireRecord> {
        self.records.iter().filter(move |r| r.tick == tick)
    }
}
