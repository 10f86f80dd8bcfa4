//! Convenient imports for common usage.

pub use crate::policy::connected::{Anchor, Candidate, PredictedAnchor};
pub use crate::policy::{
    pick_min_uniform, ConnectedCoverage, DecisionPolicy, Policy, PolicyConfig, PolicyKind,
    RandomDestination, RandomHeading, Repulsion, RepulsionFallback, ScentFollowing,
};
pub use crate::uav::{uav_rng, Uav};
