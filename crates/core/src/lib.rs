//! Bushfire Simulation Core Library
//!
//! An agent-based wildfire model on a discrete 2D grid with multi-occupancy
//! cells. Tree and firefighter agents activate once per tick in a freshly
//! randomized order: burning trees spread fire stochastically to one
//! edge-adjacent neighbor, firefighters jump to the nearest burning tree
//! and remove it. All randomness flows through a single seeded stream, so a
//! run is fully reproducible from its configuration and command sequence.
//!
//! The crate is the simulation engine only. The interactive command loop
//! and the per-tick textual dump live in the driver binary; graphical
//! visualization is out of scope entirely.

pub mod agent;
pub mod collect;
pub mod error;
pub mod grid;
pub mod model;
pub mod render;
pub mod schedule;

pub use agent::{Agent, AgentId, AgentKind};
pub use collect::{DataCollector, FireRecord};
pub use error::SimError;
pub use grid::MultiGrid;
pub use model::{BushfireModel, ModelConfig};
pub use render::render_ascii;
pub use schedule::RandomActivation;
