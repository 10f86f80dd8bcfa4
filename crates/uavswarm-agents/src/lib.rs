//! # uavswarm agents
//!
//! The [`Uav`](uav::Uav) agent and the decision policies it can fly with:
//!
//! - **RandomHeading**: weighted random turn among left, front and right
//! - **RandomDestination**: a fresh random point of the area
//! - **ScentFollowing**: the least fresh of left, front and right
//! - **DistributedScent**: scent following on a private, gossiped layer
//! - **Repulsion**: push away from close neighbours, with a scent or random fallback
//! - **ConnectedCoverage**: explore while keeping a lower-ranked neighbour in range

pub mod policy;
pub mod uav;
pub mod prelude;
