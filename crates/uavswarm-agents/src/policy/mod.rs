//! Decision policies.
//!
//! A policy looks at a [`DecisionContext`] and picks the next destination.
//! Every policy has the same shape: sample a few candidate points, rank
//! them, pick one. The set of policies is closed and chosen once when a UAV
//! is built.

pub mod connected;
pub mod random;
pub mod repulsion;
pub mod scent_following;

pub use connected::ConnectedCoverage;
pub use random::{RandomDestination, RandomHeading};
pub use repulsion::{Repulsion, RepulsionFallback};
pub use scent_following::ScentFollowing;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uavswarm_core::decision::{Decision, DecisionContext, UavSnapshot};
use uavswarm_core::types::Position;

/// A way of choosing where to fly next.
pub trait DecisionPolicy {
    fn name(&self) -> &'static str;

    fn decide(&self, me: &UavSnapshot, ctx: &DecisionContext<'_>, rng: &mut dyn RngCore) -> Decision;
}

/// Pick uniformly among the candidates sharing the minimal score.
///
/// Candidates are compared in the order given, which is part of the
/// reproducibility contract. Returns `None` for an empty slice.
pub fn pick_min_uniform(candidates: &[(Position, f64)], rng: &mut dyn RngCore) -> Option<Position> {
    let best = candidates
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::INFINITY, f64::min);
    let tied: Vec<Position> = candidates
        .iter()
        .filter(|(_, score)| *score == best)
        .map(|(p, _)| *p)
        .collect();
    match tied.len() {
        0 => None,
        1 => Some(tied[0]),
        n => Some(tied[rng.gen_range(0..n)]),
    }
}

/// Which policy a swarm flies with. Selected from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    RandomHeading,
    RandomDestination,
    ScentFollowing,
    DistributedScent,
    Repulsion,
    RandomRepulsion,
    #[default]
    ConnectedCoverage,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 7] = [
        PolicyKind::RandomHeading,
        PolicyKind::RandomDestination,
        PolicyKind::ScentFollowing,
        PolicyKind::DistributedScent,
        PolicyKind::Repulsion,
        PolicyKind::RandomRepulsion,
        PolicyKind::ConnectedCoverage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::RandomHeading => "random-heading",
            PolicyKind::RandomDestination => "random-destination",
            PolicyKind::ScentFollowing => "scent-following",
            PolicyKind::DistributedScent => "distributed-scent",
            PolicyKind::Repulsion => "repulsion",
            PolicyKind::RandomRepulsion => "random-repulsion",
            PolicyKind::ConnectedCoverage => "connected-coverage",
        }
    }

    /// Whether each UAV keeps its own scent layer instead of sharing one.
    pub fn uses_private_layers(&self) -> bool {
        matches!(self, PolicyKind::DistributedScent)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = PolicyKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown policy '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

/// Tunables shared by the policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub kind: PolicyKind,
    /// Ticks projected ahead by connected coverage.
    pub horizon: u32,
    /// Degrees between candidate headings in connected coverage.
    pub angular_granularity: u32,
    /// Influence radius of the repulsion policies.
    pub repulsion_radius: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            kind: PolicyKind::ConnectedCoverage,
            horizon: 10,
            angular_granularity: 10,
            repulsion_radius: 200.0,
        }
    }
}

/// The closed set of policies a UAV can fly with.
#[derive(Debug, Clone, PartialEq)]
pub enum Policy {
    RandomHeading(RandomHeading),
    RandomDestination(RandomDestination),
    ScentFollowing(ScentFollowing),
    /// Scent following on the UAV's private layer.
    DistributedScent(ScentFollowing),
    Repulsion(Repulsion),
    ConnectedCoverage(ConnectedCoverage),
}

impl Policy {
    pub fn from_config(config: &PolicyConfig) -> Self {
        match config.kind {
            PolicyKind::RandomHeading => Policy::RandomHeading(RandomHeading),
            PolicyKind::RandomDestination => Policy::RandomDestination(RandomDestination),
            PolicyKind::ScentFollowing => Policy::ScentFollowing(ScentFollowing),
            PolicyKind::DistributedScent => Policy::DistributedScent(ScentFollowing),
            PolicyKind::Repulsion => Policy::Repulsion(Repulsion::new(
                config.repulsion_radius,
                RepulsionFallback::ScentFollowing,
            )),
            PolicyKind::RandomRepulsion => Policy::Repulsion(Repulsion::new(
                config.repulsion_radius,
                RepulsionFallback::RandomHeading,
            )),
            PolicyKind::ConnectedCoverage => Policy::ConnectedCoverage(ConnectedCoverage::new(
                config.horizon,
                config.angular_granularity,
            )),
        }
    }

    fn inner(&self) -> &dyn DecisionPolicy {
        match self {
            Policy::RandomHeading(p) => p,
            Policy::RandomDestination(p) => p,
            Policy::ScentFollowing(p) => p,
            Policy::DistributedScent(p) => p,
            Policy::Repulsion(p) => p,
            Policy::ConnectedCoverage(p) => p,
        }
    }
}

impl DecisionPolicy for Policy {
    fn name(&self) -> &'static str {
        match self {
            Policy::DistributedScent(_) => "distributed-scent",
            other => other.inner().name(),
        }
    }

    fn decide(&self, me: &UavSnapshot, ctx: &DecisionContext<'_>, rng: &mut dyn RngCore) -> Decision {
        self.inner().decide(me, ctx, rng)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A hand-built world for exercising policies without a runtime.

    use std::collections::HashMap;
    use uavswarm_core::prelude::*;

    pub struct FlatScent {
        pub area: Area,
        pub values: HashMap<Cell, f64>,
        pub default: f64,
    }

    impl FlatScent {
        pub fn new(area: Area) -> Self {
            Self { area, values: HashMap::new(), default: -20.0 }
        }
    }

    impl ScentField for FlatScent {
        fn area(&self) -> &Area {
            &self.area
        }

        fn value(&self, _layer: ScentLayer, cell: Cell) -> Option<f64> {
            Some(*self.values.get(&cell).unwrap_or(&self.default))
        }

        fn layer_for(&self, _uav: UavId) -> ScentLayer {
            ScentLayer::Shared
        }
    }

    /// Topology given explicitly as one-hop lists and hop counts.
    #[derive(Default)]
    pub struct FixedTopology {
        pub links: HashMap<UavId, Vec<UavId>>,
        pub base_links: Vec<UavId>,
        pub hops: HashMap<UavId, HopCount>,
    }

    impl SwarmTopology for FixedTopology {
        fn neighbours(&self, uav: UavId, _max_hops: u32) -> Vec<UavId> {
            let mut n = self.links.get(&uav).cloned().unwrap_or_default();
            n.sort();
            n
        }

        fn links_to_base(&self, uav: UavId) -> bool {
            self.base_links.contains(&uav)
        }

        fn hop_distance(&self, uav: UavId) -> HopCount {
            self.hops.get(&uav).copied().unwrap_or(HopCount::Unreachable)
        }
    }

    pub fn area() -> Area {
        Area::sized(2000.0, 1000.0, 20.0).unwrap()
    }

    pub fn snapshot(id: u32, at: Position, heading: f64) -> UavSnapshot {
        let envelope = FlightEnvelope::default();
        UavSnapshot {
            id: UavId(id),
            state: KinematicState::launch(at, heading, 10.0, &envelope),
            destination: Destination::new(at.offset(heading, 500.0)),
            autopilot: Autopilot::new(area(), &envelope, SpeedProfile::Instant),
        }
    }
}
