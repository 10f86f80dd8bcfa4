//! Error types for swarm configuration and decision making.
//!
//! Configuration errors are fatal and surface before the first tick.
//! Decision errors are expected outcomes that a policy recovers from
//! locally. Broken kinematic invariants are not errors at all: they are
//! checked with `debug_assert!` where the state is updated.

use thiserror::Error;

use crate::types::UavId;

/// Result type for configuration and construction.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Rejected simulation configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid granularity must be positive, got {0}")]
    NonPositiveGranularity(f64),

    #[error("area {width}x{height} is not an integer number of {granularity}-unit cells")]
    UnevenGrid {
        width: f64,
        height: f64,
        granularity: f64,
    },

    #[error("area bounds are empty or inverted")]
    EmptyArea,

    #[error("angular granularity {0} must be positive and divide 360")]
    AngularGranularity(u32),

    #[error("decision frequency must be at least one tick")]
    ZeroDecisionFrequency,

    #[error("agent count must be at least one")]
    NoAgents,

    #[error("invalid speed limits: min {min}, max {max}, initial {initial}")]
    InvalidSpeedLimits { min: f64, max: f64, initial: f64 },

    #[error("max heading change must be in (0, 2pi], got {0}")]
    InvalidHeadingChange(f64),

    #[error("projection horizon must be at least one tick")]
    ZeroHorizon,

    #[error("evaporation frequency must be at least one tick")]
    ZeroEvaporationFrequency,

    #[error("exchange frequency must be at least one tick")]
    ZeroExchangeFrequency,

    #[error("base station ({x}, {y}) lies outside the area")]
    BaseOutsideArea { x: f64, y: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },
}

/// Outcome of a decision step that did not produce a regular choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// No candidate heading keeps any lower neighbour in range.
    #[error("{uav}: no heading keeps a lower neighbour reachable")]
    NoConnectedSolution { uav: UavId },
}
