//! Error types for the simulation core.

use crate::agent::AgentId;

/// Errors raised by the simulation core.
///
/// `OutOfBounds` is recoverable at the command boundary (a driver can report
/// it and re-prompt). Either variant surfacing *during* a tick means an
/// internal invariant is broken and the run should abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Coordinate outside `[0, width) x [0, height)`.
    OutOfBounds {
        /// Requested x coordinate.
        x: i32,
        /// Requested y coordinate.
        y: i32,
        /// Grid width in cells.
        width: u32,
        /// Grid height in cells.
        height: u32,
    },
    /// An agent with this id is already registered with the scheduler.
    DuplicateAgent(AgentId),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "coordinate ({x}, {y}) is outside the {width}x{height} grid")
            }
            SimError::DuplicateAgent(id) => write!(f, "agent {id} is already scheduled"),
        }
    }
}

impl std::error::Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_coordinate() {
        let err = SimError::OutOfBounds {
            x: -1,
            y: 7,
            width: 5,
            height: 5,
        };
        assert_eq!(err.to_string(), "coordinate (-1, 7) is outside the 5x5 grid");
    }

    #[test]
    fn display_names_the_duplicate_agent() {
        let err = SimError::DuplicateAgent(AgentId(3));
        assert_eq!(err.to_string(), "agent 3 is already scheduled");
    }
}
