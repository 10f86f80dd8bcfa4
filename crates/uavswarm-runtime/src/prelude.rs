//! Convenient imports for common usage.
//!
//! ```rust
//! use uavswarm_runtime::prelude::*;
//! ```

pub use crate::simulation::{RunReport, Simulation, SimulationEvent, SimulationSnapshot, UavView};
pub use crate::config::{AreaConfig, FlightConfig, ScentConfig, SimulationConfig};
pub use crate::scent_grid::{decay_value, ScentGrid, FRESH};
pub use crate::agent_graph::{AgentGraph, GraphNode, Link};
pub use crate::metrics::{AreaMetrics, CoverageStats, GraphMetrics, VisitLog};

pub use uavswarm_agents::prelude::*;
pub use uavswarm_core::prelude::*;
