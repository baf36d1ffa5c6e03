//! Simulation orchestrator.
//!
//! [`BushfireModel`] owns the grid, the scheduler, the agent registry, the
//! data collector, and the run's single seeded random stream. All agent
//! behavior lives here: tree activations spread fire, firefighter
//! activations hunt and remove the nearest burning tree. Keeping the
//! behaviors on the model is what lets one activation mutate shared state
//! that the next activation in the same tick observes.
//!
//! Fire state advances on tick boundaries: a tree ignited partway through a
//! tick is flagged immediately (visible to renders, snapshots, and repeat
//! ignitions) but neither spreads nor attracts firefighters until the next
//! tick. Removal, by contrast, is visible immediately: a tree retired by a
//! firefighter is skipped by every later activation in the same tick.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::agent::{Agent, AgentId, AgentKind};
use crate::collect::{DataCollector, FireRecord};
use crate::error::SimError;
use crate::grid::MultiGrid;
use crate::schedule::RandomActivation;

/// Construction-time configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Grid width in cells. Must be positive.
    pub width: u32,
    /// Grid height in cells. Must be positive.
    pub height: u32,
    /// Bernoulli probability that a cell starts with a tree. Clamped to
    /// `[0, 1]`; non-finite values are treated as zero.
    pub tree_density: f64,
    /// Firefighters scattered at uniformly random cells during construction
    /// when `auto_place_firefighters` is set; otherwise informational only.
    pub num_firefighters: u32,
    /// Auto-placement is off by default: firefighters normally enter the
    /// run through explicit [`BushfireModel::place_firefighter`] commands.
    pub auto_place_firefighters: bool,
    /// Seed for the run's random stream. Two runs with the same seed and
    /// the same command sequence are identical.
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            width: 5,
            height: 5,
            tree_density: 1.0,
            num_firefighters: 1,
            auto_place_firefighters: false,
            seed: 42,
        }
    }
}

/// The bushfire simulation: grid, scheduler, agents, collector, randomness.
pub struct BushfireModel {
    config: ModelConfig,
    grid: MultiGrid,
    schedule: RandomActivation,
    agents: FxHashMap<AgentId, Agent>,
    collector: DataCollector,
    rng: StdRng,
    next_id: u64,
    tick: u64,
}

impl BushfireModel {
    /// Build a model: for every cell, row-major with `x` outer, one
    /// Bernoulli(`tree_density`) draw decides whether a fresh unburning
    /// tree is placed there. The draw order is part of the deterministic
    /// contract. Firefighters are then scattered if auto-placement is on.
    ///
    /// # Panics
    /// Panics if either grid dimension is zero.
    pub fn new(config: ModelConfig) -> Self {
        // clamp passes NaN through, so sanitize non-finite input first.
        let density = if config.tree_density.is_finite() {
            config.tree_density.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut model = BushfireModel {
            grid: MultiGrid::new(config.width, config.height),
            schedule: RandomActivation::new(),
            agents: FxHashMap::default(),
            collector: DataCollector::new(),
            rng: StdRng::seed_from_u64(config.seed),
            next_id: 0,
            tick: 0,
            config,
        };

        for x in 0..model.config.width {
            for y in 0..model.config.height {
                if model.rng.random_bool(density) {
                    // In-bounds by construction, so spawning cannot fail.
                    let _ = model.spawn(AgentKind::Tree { on_fire: false }, x as i32, y as i32);
                }
            }
        }

        if model.config.auto_place_firefighters {
            for _ in 0..model.config.num_firefighters {
                let x = model.rng.random_range(0..model.config.width) as i32;
                let y = model.rng.random_range(0..model.config.height) as i32;
                let _ = model.spawn(AgentKind::Firefighter, x, y);
            }
        }

        debug!(
            width = model.config.width,
            height = model.config.height,
            trees = model.schedule.len(),
            seed = model.config.seed,
            "model constructed"
        );
        model
    }

    /// The configuration the model was built with.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The spatial grid.
    pub fn grid(&self) -> &MultiGrid {
        &self.grid
    }

    /// The scheduler's live set.
    pub fn schedule(&self) -> &RandomActivation {
        &self.schedule
    }

    /// The fire-state observation log.
    pub fn collector(&self) -> &DataCollector {
        &self.collector
    }

    /// Index of the next tick to run; starts at zero.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Look up a live agent by id.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// All live agents, in no particular order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    fn alloc_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an agent, place it on the grid, register it for activation.
    fn spawn(&mut self, kind: AgentKind, x: i32, y: i32) -> Result<AgentId, SimError> {
        self.grid.bounds_check(x, y)?;
        let id = self.alloc_id();
        let pos = self.grid.place(id, x, y)?;
        self.agents.insert(id, Agent { id, pos, kind });
        self.schedule.add(id)?;
        Ok(id)
    }

    /// Set `on_fire` on every tree in the cell. A cell without trees is a
    /// no-op, not an error; re-igniting a burning tree changes nothing.
    pub fn ignite(&mut self, x: i32, y: i32) -> Result<(), SimError> {
        let ids: Vec<AgentId> = self.grid.contents(x, y)?.to_vec();
        for id in ids {
            if let Some(agent) = self.agents.get_mut(&id) {
                if let AgentKind::Tree { on_fire } = &mut agent.kind {
                    if !*on_fire {
                        *on_fire = true;
                        debug!(tree = %id, x, y, "tree ignited");
                    }
                }
            }
        }
        Ok(())
    }

    /// Clear `on_fire` on every burning tree in the cell, leaving the trees
    /// in place. Distinct from the firefighter's extinguish-and-remove.
    pub fn extinguish(&mut self, x: i32, y: i32) -> Result<(), SimError> {
        let ids: Vec<AgentId> = self.grid.contents(x, y)?.to_vec();
        for id in ids {
            if let Some(agent) = self.agents.get_mut(&id) {
                if let AgentKind::Tree { on_fire } = &mut agent.kind {
                    if *on_fire {
                        *on_fire = false;
                        debug!(tree = %id, x, y, "fire extinguished in place");
                    }
                }
            }
        }
        Ok(())
    }

    /// Spawn a firefighter with a fresh id at the cell.
    pub fn place_firefighter(&mut self, x: i32, y: i32) -> Result<AgentId, SimError> {
        let id = self.spawn(AgentKind::Firefighter, x, y)?;
        debug!(firefighter = %id, x, y, "firefighter placed");
        Ok(id)
    }

    /// Advance one tick: snapshot fire state, then activate every currently
    /// registered agent exactly once in a fresh random order.
    ///
    /// Agents removed by an earlier activation are skipped when their turn
    /// arrives; agents registered mid-tick wait for the next tick.
    pub fn step(&mut self) -> Result<(), SimError> {
        self.collect_snapshot();

        // Trees burning now are the tick's fire front. Trees ignited during
        // the pass join the front next tick.
        let burning_start: FxHashSet<AgentId> = self
            .agents
            .values()
            .filter(|a| a.kind.on_fire() == Some(true))
            .map(|a| a.id)
            .collect();

        let order = self.schedule.permutation(&mut self.rng);
        trace!(tick = self.tick, agents = order.len(), "tick start");
        for id in order {
            if !self.schedule.contains(id) {
                continue; // removed earlier this tick
            }
            self.activate(id, &burning_start)?;
        }
        self.tick += 1;
        Ok(())
    }

    /// One observation row per scheduled agent, taken before the pass runs.
    fn collect_snapshot(&mut self) {
        for &id in self.schedule.agents() {
            if let Some(agent) = self.agents.get(&id) {
                self.collector.record(FireRecord {
                    tick: self.tick,
                    agent: id,
                    on_fire: agent.kind.on_fire(),
                });
            }
        }
    }

    fn activate(&mut self, id: AgentId, burning_start: &FxHashSet<AgentId>) -> Result<(), SimError> {
        let Some(agent) = self.agents.get(&id).copied() else {
            return Ok(());
        };
        match agent.kind {
            // Burning trees that were part of the tick's fire front spread;
            // unburning trees do nothing and consume no randomness.
            AgentKind::Tree { on_fire: true } if burning_start.contains(&id) => {
                self.spread_fire(agent)
            }
            AgentKind::Tree { .. } => Ok(()),
            AgentKind::Firefighter => self.suppress_nearest(agent, burning_start),
        }
    }

    /// Fire spread: shuffle the four edge-adjacent neighbor cells, scan them
    /// in shuffled order, ignite the first in-bounds occupied one. At most
    /// one ignition per activation; out-of-bounds and empty neighbors do
    /// not consume the slot.
    fn spread_fire(&mut self, tree: Agent) -> Result<(), SimError> {
        let (x, y) = (tree.pos.0 as i32, tree.pos.1 as i32);
        let mut neighbors = [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)];
        neighbors.shuffle(&mut self.rng);

        for (nx, ny) in neighbors {
            if !self.grid.in_bounds(nx, ny) {
                continue;
            }
            if self.grid.is_empty(nx as u32, ny as u32) {
                continue;
            }
            trace!(from = ?tree.pos, to = ?(nx, ny), "fire spreading");
            self.ignite(nx, ny)?;
            break;
        }
        Ok(())
    }

    /// Firefighter behavior: jump to the nearest tree of the tick's fire
    /// front and retire it. No-op when the front is already gone.
    fn suppress_nearest(
        &mut self,
        firefighter: Agent,
        burning_start: &FxHashSet<AgentId>,
    ) -> Result<(), SimError> {
        let Some(target) = self.nearest_burning_tree(firefighter.pos, burning_start) else {
            return Ok(());
        };

        let pos = self.grid.move_agent(
            firefighter.id,
            firefighter.pos,
            target.pos.0 as i32,
            target.pos.1 as i32,
        )?;
        if let Some(me) = self.agents.get_mut(&firefighter.id) {
            me.pos = pos;
        }
        self.retire_tree(target.id);
        debug!(
            firefighter = %firefighter.id,
            tree = %target.id,
            pos = ?target.pos,
            "fire extinguished, tree removed"
        );
        Ok(())
    }

    /// Scan the whole grid row-major (`x` outer, `y` inner) for still-live
    /// front trees and pick the one at minimum Manhattan distance. Ties go
    /// to the first candidate in scan order.
    fn nearest_burning_tree(
        &self,
        from: (u32, u32),
        burning_start: &FxHashSet<AgentId>,
    ) -> Option<Agent> {
        let mut best: Option<(u32, Agent)> = None;
        for x in 0..self.grid.width() {
            for y in 0..self.grid.height() {
                for &id in self.grid.cell(x, y) {
                    if !burning_start.contains(&id) {
                        continue;
                    }
                    let Some(agent) = self.agents.get(&id) else {
                        continue;
                    };
                    if agent.kind.on_fire() != Some(true) {
                        continue;
                    }
                    let dist = manhattan(from, agent.pos);
                    match best {
                        Some((shortest, _)) if dist >= shortest => {}
                        _ => best = Some((dist, *agent)),
                    }
                }
            }
        }
        best.map(|(_, agent)| agent)
    }

    /// Extinguish-and-remove as one atomic transition: the flag is cleared
    /// and the tree is fully retracted from grid, scheduler, and registry
    /// before the next agent in the permutation activates.
    fn retire_tree(&mut self, id: AgentId) {
        if let Some(agent) = self.agents.remove(&id) {
            self.grid.remove(id, agent.pos);
            self.schedule.remove(id);
        }
    }
}

/// Sum of absolute coordinate differences between two cells.
fn manhattan(a: (u32, u32), b: (u32, u32)) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
