//! Convenient imports for common usage.
//!
//! ```rust
//! use uavswarm_core::prelude::*;
//! ```

pub use crate::types::{BaseRank, Destination, HopCount, Position, Tick, UavId};
pub use crate::area::{Area, Cell};
pub use crate::status::{
    normalize_angle, shortest_rotation, FlightEnvelope, Heading, KinematicState, Speed, TurnRate,
};
pub use crate::autopilot::{Autopilot, SpeedProfile};
pub use crate::wireless::{ReachabilityModel, UniformRange};
pub use crate::scent::{ScentField, ScentLayer, OUTSIDE_SENTINEL};
pub use crate::topology::SwarmTopology;
pub use crate::decision::{Decision, DecisionContext, UavSnapshot};
pub use crate::agent::Agent;
pub use crate::error::{ConfigError, DecisionError};
