//! # uavswarm
//!
//! Simulate a swarm of fixed-wing UAVs that covers a rectangular area while
//! every UAV tries to stay within wireless reach of the base station,
//! directly or through other UAVs.
//!
//! UAVs leave a digital pheromone ("scent") on every cell they fly over. The
//! scent fades with time, so the least fresh cells are the ones most worth
//! revisiting. The connectivity-preserving policy sweeps candidate headings,
//! keeps those that stay in range of a neighbour closer to the base, and
//! among them picks the one heading for the stalest terrain.
//!
//! ## Quick Start
//!
//! ```rust
//! use uavswarm::prelude::*;
//!
//! let config = SimulationConfig {
//!     agent_count: 5,
//!     warmup_ticks: 0,
//!     ..SimulationConfig::default()
//! };
//! let mut sim = Simulation::configure(config).unwrap();
//!
//! for event in sim.tick() {
//!     if let SimulationEvent::Decided { uav, destination, .. } = event {
//!         println!("{uav} -> ({:.0}, {:.0})", destination.x, destination.y);
//!     }
//! }
//!
//! let report = sim.run(200);
//! println!("never scanned: {}%", report.last.area.never_scanned_pct);
//! ```
//!
//! ## Architecture
//!
//! - [`uavswarm_core`] - geometry, kinematics, the autopilot and the read traits
//! - [`uavswarm_agents`] - the UAV agent and its decision policies
//! - [`uavswarm_runtime`] - scent grid, communication graph, metrics, the simulation
//!
//! ## Policies
//!
//! | Policy | Picks |
//! |--------|-------|
//! | `random-heading` | left, front or right at 0.2 / 0.6 / 0.2 |
//! | `random-destination` | any point of the area |
//! | `scent-following` | the least fresh of left, front and right |
//! | `distributed-scent` | the same, on a private layer shared with neighbours |
//! | `repulsion` | away from close neighbours, else scent following |
//! | `random-repulsion` | away from close neighbours, else a random heading |
//! | `connected-coverage` | the stalest heading that keeps a link toward the base |
//!
//! ## Scent
//!
//! A scanned cell is set to 1.0. Every evaporation step a positive value
//! loses the evaporation speed down to 0, and a non-positive value loses 1,
//! so below zero the value counts how long the cell has been forgotten.
//! Cells start at minus the "too old" threshold.

pub use uavswarm_agents as agents;
pub use uavswarm_core as core;
pub use uavswarm_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use uavswarm::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use uavswarm_core::types::{BaseRank, Destination, HopCount, Position, Tick, UavId};
    pub use uavswarm_core::area::{Area, Cell};
    pub use uavswarm_core::status::{FlightEnvelope, KinematicState};
    pub use uavswarm_core::autopilot::{Autopilot, SpeedProfile};

    // Core traits
    pub use uavswarm_core::agent::Agent;
    pub use uavswarm_core::scent::{ScentField, ScentLayer};
    pub use uavswarm_core::topology::SwarmTopology;
    pub use uavswarm_core::wireless::{ReachabilityModel, UniformRange};

    // Error types
    pub use uavswarm_core::error::{ConfigError, DecisionError, Result};

    // Agents
    pub use uavswarm_agents::policy::{DecisionPolicy, Policy, PolicyConfig, PolicyKind};
    pub use uavswarm_agents::uav::Uav;

    // Runtime
    pub use uavswarm_runtime::config::{AreaConfig, FlightConfig, ScentConfig, SimulationConfig};
    pub use uavswarm_runtime::metrics::{AreaMetrics, CoverageStats, GraphMetrics};
    pub use uavswarm_runtime::simulation::{
        RunReport, Simulation, SimulationEvent, SimulationSnapshot, UavView,
    };
    pub use uavswarm_runtime::agent_graph::{AgentGraph, Link};
    pub use uavswarm_runtime::scent_grid::ScentGrid;
}
