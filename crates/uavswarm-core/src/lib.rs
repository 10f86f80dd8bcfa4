//! # uavswarm core
//!
//! Core types, kinematics and read traits for simulating a fixed-wing UAV
//! swarm that covers an area while staying reachable from a base station.
//!
//! - **Geometry**: [`Position`](types::Position), [`Area`](area::Area) and its scan grid
//! - **Kinematics**: [`KinematicState`](status::KinematicState) and the
//!   [`Autopilot`](autopilot::Autopilot), which also projects trajectories
//! - **Reachability**: the [`ReachabilityModel`](wireless::ReachabilityModel) predicate
//! - **Read traits**: [`ScentField`](scent::ScentField) and
//!   [`SwarmTopology`](topology::SwarmTopology), implemented by the runtime
//! - **Decisions**: the [`DecisionContext`](decision::DecisionContext) a policy reads
//!   and the [`Agent`](agent::Agent) hooks the runtime drives
//!
//! ## Quick Start
//!
//! ```rust
//! use uavswarm_core::prelude::*;
//!
//! let area = Area::sized(2000.0, 1000.0, 20.0).unwrap();
//! let envelope = FlightEnvelope::default();
//! let pilot = Autopilot::new(area, &envelope, SpeedProfile::Instant);
//!
//! let state = KinematicState::launch(Position::new(1000.0, 0.0), 1.57, 0.0, &envelope);
//! let next = pilot.advance(&state, &Destination::new(Position::new(1000.0, 500.0)));
//! assert!(next.position.y > state.position.y);
//! ```

pub mod types;
pub mod area;
pub mod status;
pub mod autopilot;
pub mod wireless;
pub mod scent;
pub mod topology;
pub mod decision;
pub mod agent;
pub mod error;
pub mod prelude;
