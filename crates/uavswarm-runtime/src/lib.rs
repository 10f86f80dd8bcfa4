//! # uavswarm runtime
//!
//! Runs the swarm. The [`Simulation`](simulation::Simulation) owns every UAV
//! together with the shared state they read:
//!
//! - **Scent**: [`ScentGrid`](scent_grid::ScentGrid), one shared layer or one
//!   private layer per UAV plus a merged view
//! - **Links**: [`AgentGraph`](agent_graph::AgentGraph), the reachability graph
//!   over the base station and the swarm, with hop counts to the base
//! - **Metrics**: scan counts, staleness and graph fragmentation
//!
//! The runtime performs no file or network I/O; export is up to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use uavswarm_runtime::prelude::*;
//!
//! let config = SimulationConfig {
//!     agent_count: 4,
//!     warmup_ticks: 10,
//!     ..SimulationConfig::default()
//! };
//! let mut sim = Simulation::configure(config).unwrap();
//! let report = sim.run(50);
//! assert_eq!(report.ticks, 50);
//! assert!(report.last.area.scanned_cells > 0);
//! ```

pub mod scent_grid;
pub mod agent_graph;
pub mod config;
pub mod simulation;
pub mod metrics;
pub mod prelude;
