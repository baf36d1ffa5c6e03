//! Random-activation scheduler.
//!
//! Holds the live agent set and hands out a fresh uniformly random
//! activation order each tick. Registration order is retained only so that
//! iteration is deterministic for a given sequence of operations; it carries
//! no scheduling meaning.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::agent::AgentId;
use crate::error::SimError;

/// The live agent set with per-tick randomized activation order.
///
/// The tick protocol is driven by the model, which owns both this scheduler
/// and the run's random stream: take a [`permutation`](Self::permutation)
/// snapshot, then activate each id in order, skipping any id that is no
/// longer [`contains`](Self::contains)-live when its turn arrives. Agents
/// registered after the snapshot was taken are not part of it and therefore
/// first activate on the following tick.
#[derive(Debug, Clone, Default)]
pub struct RandomActivation {
    order: Vec<AgentId>,
    live: FxHashSet<AgentId>,
}

impl RandomActivation {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live agent.
    pub fn add(&mut self, id: AgentId) -> Result<(), SimError> {
        if !self.live.insert(id) {
            return Err(SimError::DuplicateAgent(id));
        }
        self.order.push(id);
        Ok(())
    }

    /// Deregister an agent. No-op when the agent is not registered, so
    /// removal is safe to repeat.
    pub fn remove(&mut self, id: AgentId) {
        if self.live.remove(&id) {
            if let Some(slot) = self.order.iter().position(|&a| a == id) {
                self.order.remove(slot);
            }
        }
    }

    /// Whether the agent is currently registered.
    pub fn contains(&self, id: AgentId) -> bool {
        self.live.contains(&id)
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no agents are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered agents in registration order. Deterministic; used for
    /// snapshot collection and rendering, never for activation.
    pub fn agents(&self) -> &[AgentId] {
        &self.order
    }

    /// Snapshot of the registered set in a fresh uniformly random order.
    ///
    /// Each call consumes the random stream once. The caller must re-check
    /// liveness before activating each entry, since earlier activations in
    /// the same tick may have removed later entries.
    pub fn permutation<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<AgentId> {
        let mut ids = self.order.clone();
        ids.shuffle(rng);
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut schedule = RandomActivation::new();
        schedule.add(AgentId(1)).unwrap();
        assert_eq!(
            schedule.add(AgentId(1)),
            Err(SimError::DuplicateAgent(AgentId(1)))
        );
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut schedule = RandomActivation::new();
        schedule.add(AgentId(1)).unwrap();
        schedule.remove(AgentId(1));
        schedule.remove(AgentId(1));
        assert!(schedule.is_empty());
        assert!(!schedule.contains(AgentId(1)));
    }

    #[test]
    fn permutation_covers_every_live_agent_exactly_once() {
        let mut schedule = RandomActivation::new();
        for n in 0..20 {
            schedule.add(AgentId(n)).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(7);
        let mut perm = schedule.permutation(&mut rng);
        perm.sort_unstable();
        let expected: Vec<AgentId> = (0..20).map(AgentId).collect();
        assert_eq!(perm, expected);
    }

    #[test]
    fn agents_added_after_the_snapshot_are_not_in_it() {
        let mut schedule = RandomActivation::new();
        schedule.add(AgentId(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let perm = schedule.permutation(&mut rng);
        schedule.add(AgentId(2)).unwrap();
        assert!(!perm.contains(&AgentId(2)));
    }

    #[test]
    fn identical_seeds_give_identical_permutations() {
        let mut schedule = RandomActivation::new();
        for n in 0..50 {
            schedule.add(AgentId(n)).unwrap();
        }
        let a = schedule.permutation(&mut StdRng::seed_from_u64(99));
        let b = schedule.permutation(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
