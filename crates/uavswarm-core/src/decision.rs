//! What a decision policy gets to look at.
//!
//! Everything is borrowed read-only. The swarm snapshot is taken once at
//! the start of a tick, so every UAV deciding in that tick sees the same
//! neighbour states no matter in which order the swarm is processed.

use crate::autopilot::Autopilot;
use crate::error::DecisionError;
use crate::scent::ScentField;
use crate::status::KinematicState;
use crate::topology::SwarmTopology;
use crate::types::{Destination, Position, Tick, UavId};
use crate::wireless::ReachabilityModel;

/// A UAV as seen by the rest of the swarm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UavSnapshot {
    pub id: UavId,
    pub state: KinematicState,
    pub destination: Destination,
    pub autopilot: Autopilot,
}

impl UavSnapshot {
    pub fn position(&self) -> Position {
        self.state.position
    }

    /// Where this UAV will be in `steps` ticks if it keeps its destination.
    pub fn predict(&self, steps: u32) -> Position {
        self.autopilot
            .project_endpoint(&self.state, &self.destination, steps)
    }
}

pub struct DecisionContext<'a> {
    pub tick: Tick,
    pub base: Position,
    /// Indexed by id.
    pub swarm: &'a [UavSnapshot],
    pub scent: &'a dyn ScentField,
    pub topology: &'a dyn SwarmTopology,
    pub reachability: &'a dyn ReachabilityModel,
}

impl<'a> DecisionContext<'a> {
    pub fn uav(&self, id: UavId) -> Option<&'a UavSnapshot> {
        self.swarm.get(id.index()).filter(|s| s.id == id)
    }
}

/// Outcome of one decision step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// The policy picked a destination on its own terms.
    Steer(Position),
    /// The policy could not decide and recovered to a fixed destination.
    Fallback {
        destination: Position,
        cause: DecisionError,
    },
}

impl Decision {
    pub fn destination(&self) -> Position {
        match self {
            Decision::Steer(p) => *p,
            Decision::Fallback { destination, .. } => *destination,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Fallback { .. })
    }
}
