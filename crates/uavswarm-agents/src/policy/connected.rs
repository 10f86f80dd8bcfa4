//! Connectivity-preserving exploration.
//!
//! A UAV keeps in touch with the neighbours that rank closer to the base
//! (fewer hops, then lower id) and explores as freely as that allows:
//!
//! 1. collect the considered anchors: the base station if directly linked,
//!    plus every one-hop neighbour ranked strictly better than us;
//! 2. predict where each anchor will be `horizon` ticks from now, assuming
//!    it keeps flying toward its current destination;
//! 3. sweep candidate headings every `angular_granularity` degrees relative
//!    to our heading, projecting our own flight `horizon` ticks toward a
//!    point `horizon × max_speed` away along that heading;
//! 4. keep the candidates whose endpoint can still reach an anchor;
//! 5. fly to the valid endpoint with the lowest scent sample, smallest
//!    angle first on ties.
//!
//! If no candidate is valid the UAV heads straight back to the base.

use rand::RngCore;
use tracing::debug;
use uavswarm_core::decision::{Decision, DecisionContext, UavSnapshot};
use uavswarm_core::error::DecisionError;
use uavswarm_core::types::{Destination, Position, UavId};

use super::DecisionPolicy;

/// Something a UAV has to stay connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Base,
    Uav(UavId),
}

/// An anchor and where it is expected to be at the end of the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedAnchor {
    pub anchor: Anchor,
    pub position: Position,
}

/// One candidate heading and what flying it would lead to.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Degrees relative to the current heading.
    pub angle: u32,
    pub endpoint: Position,
    /// Anchors reachable from the endpoint, with their predicted distance.
    pub links: Vec<(Anchor, f64)>,
}

impl Candidate {
    pub fn is_valid(&self) -> bool {
        !self.links.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectedCoverage {
    horizon: u32,
    angular_granularity: u32,
}

impl ConnectedCoverage {
    pub fn new(horizon: u32, angular_granularity: u32) -> Self {
        Self {
            horizon,
            angular_granularity,
        }
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn angular_granularity(&self) -> u32 {
        self.angular_granularity
    }

    /// Anchors ranked strictly closer to the base than `me`, base first,
    /// then ascending id.
    pub fn considered_anchors(&self, me: &UavSnapshot, ctx: &DecisionContext<'_>) -> Vec<Anchor> {
        let topology = ctx.topology;
        let own_rank = topology.rank(me.id);
        let mut anchors = Vec::new();
        if topology.links_to_base(me.id) {
            anchors.push(Anchor::Base);
        }
        anchors.extend(
            topology
                .neighbours(me.id, 1)
                .into_iter()
                .filter(|id| topology.rank(*id) < own_rank)
                .map(Anchor::Uav),
        );
        anchors
    }

    pub fn predict(&self, anchors: &[Anchor], ctx: &DecisionContext<'_>) -> Vec<PredictedAnchor> {
        anchors
            .iter()
            .filter_map(|anchor| {
                let position = match anchor {
                    Anchor::Base => ctx.base,
                    Anchor::Uav(id) => ctx.uav(*id)?.predict(self.horizon),
                };
                Some(PredictedAnchor {
                    anchor: *anchor,
                    position,
                })
            })
            .collect()
    }

    /// Every candidate heading in sweep order, valid or not.
    pub fn candidates(
        &self,
        me: &UavSnapshot,
        predicted: &[PredictedAnchor],
        ctx: &DecisionContext<'_>,
    ) -> Vec<Candidate> {
        let pilot = &me.autopilot;
        let reach = f64::from(self.horizon) * me.state.speed.max();
        let step = self.angular_granularity.max(1) as usize;

        (0..360u32)
            .step_by(step)
            .map(|angle| {
                let aim = pilot.point_at(&me.state, f64::from(angle).to_radians(), reach);
                let endpoint = pilot.project_endpoint(&me.state, &Destination::new(aim), self.horizon);
                let links = predicted
                    .iter()
                    .filter(|p| ctx.reachability.can_communicate(&endpoint, &p.position))
                    .map(|p| (p.anchor, ctx.reachability.distance(&endpoint, &p.position)))
                    .collect();
                Candidate {
                    angle,
                    endpoint,
                    links,
                }
            })
            .collect()
    }

    /// The valid endpoint with the lowest scent, or `NoConnectedSolution`.
    pub fn connect_and_explore(
        &self,
        me: &UavSnapshot,
        ctx: &DecisionContext<'_>,
    ) -> Result<Position, DecisionError> {
        let anchors = self.considered_anchors(me, ctx);
        let predicted = self.predict(&anchors, ctx);
        if predicted.is_empty() {
            return Err(DecisionError::NoConnectedSolution { uav: me.id });
        }

        let mut best: Option<(f64, Position)> = None;
        for candidate in self.candidates(me, &predicted, ctx) {
            if !candidate.is_valid() {
                continue;
            }
            let score = ctx.scent.sample_for(me.id, &candidate.endpoint);
            // strict comparison keeps the smallest angle among equals
            if best.map_or(true, |(b, _)| score < b) {
                best = Some((score, candidate.endpoint));
            }
        }
        best.map(|(_, endpoint)| endpoint)
            .ok_or(DecisionError::NoConnectedSolution { uav: me.id })
    }
}

impl DecisionPolicy for ConnectedCoverage {
    fn name(&self) -> &'static str {
        "connected-coverage"
    }

    fn decide(&self, me: &UavSnapshot, ctx: &DecisionContext<'_>, _rng: &mut dyn RngCore) -> Decision {
        match self.connect_and_explore(me, ctx) {
            Ok(endpoint) => Decision::Steer(endpoint),
            Err(cause) => {
                debug!(uav = %me.id, tick = ctx.tick, "{}, heading back to base", cause);
                Decision::Fallback {
                    destination: ctx.base,
                    cause,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::testing::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::FRAC_PI_2;
    use uavswarm_core::prelude::*;

    const BASE: Position = Position { x: 1000.0, y: 0.0, z: 0.0 };

    fn ctx<'a>(
        swarm: &'a [UavSnapshot],
        scent: &'a FlatScent,
        topo: &'a FixedTopology,
        range: &'a UniformRange,
    ) -> DecisionContext<'a> {
        DecisionContext {
            tick: 10,
            base: BASE,
            swarm,
            scent,
            topology: topo,
            reachability: range,
        }
    }

    #[test]
    fn lone_uav_returns_to_base() {
        let swarm = [snapshot(0, Position::new(0.0, 0.0), FRAC_PI_2)];
        let scent = FlatScent::new(area());
        let topo = FixedTopology::default();
        let range = UniformRange::new(400.0);
        let ctx = ctx(&swarm, &scent, &topo, &range);
        let policy = ConnectedCoverage::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let decision = policy.decide(&swarm[0], &ctx, &mut rng);
        assert_eq!(decision.destination(), BASE);
        assert_eq!(
            decision,
            Decision::Fallback {
                destination: BASE,
                cause: DecisionError::NoConnectedSolution { uav: UavId(0) },
            }
        );
    }

    #[test]
    fn considered_anchors_follow_rank() {
        let swarm: Vec<_> = (0..4)
            .map(|i| snapshot(i, Position::new(900.0 + 50.0 * i as f64, 500.0), 0.0))
            .collect();
        let mut topo = FixedTopology::default();
        topo.links.insert(UavId(2), vec![UavId(3), UavId(1), UavId(0)]);
        topo.hops.insert(UavId(0), HopCount::Hops(2));
        topo.hops.insert(UavId(1), HopCount::Hops(1));
        topo.hops.insert(UavId(2), HopCount::Hops(2));
        topo.hops.insert(UavId(3), HopCount::Hops(2));
        let scent = FlatScent::new(area());
        let range = UniformRange::new(400.0);
        let ctx = ctx(&swarm, &scent, &topo, &range);

        let anchors = ConnectedCoverage::new(10, 10).considered_anchors(&swarm[2], &ctx);
        assert_eq!(anchors, vec![Anchor::Uav(UavId(0)), Anchor::Uav(UavId(1))]);
    }

    #[test]
    fn base_link_makes_base_an_anchor() {
        let swarm = [snapshot(0, Position::new(1000.0, 250.0), FRAC_PI_2)];
        let mut topo = FixedTopology::default();
        topo.base_links.push(UavId(0));
        topo.hops.insert(UavId(0), HopCount::Hops(1));
        let scent = FlatScent::new(area());
        let range = UniformRange::new(400.0);
        let ctx = ctx(&swarm, &scent, &topo, &range);

        let policy = ConnectedCoverage::new(10, 10);
        assert_eq!(policy.considered_anchors(&swarm[0], &ctx), vec![Anchor::Base]);
    }

    #[test]
    fn equal_scores_pick_the_smallest_angle() {
        let swarm = [snapshot(0, Position::new(1000.0, 250.0), FRAC_PI_2)];
        let mut topo = FixedTopology::default();
        topo.base_links.push(UavId(0));
        let scent = FlatScent::new(area());
        let range = UniformRange::new(400.0);
        let ctx = ctx(&swarm, &scent, &topo, &range);
        let policy = ConnectedCoverage::new(10, 10);

        let p = policy.connect_and_explore(&swarm[0], &ctx).unwrap();
        // straight ahead, 100 units north
        assert!((p.x - 1000.0).abs() < 1e-6);
        assert!((p.y - 350.0).abs() < 1e-6);
    }

    #[test]
    fn stale_terrain_wins_among_valid_candidates() {
        let me = snapshot(0, Position::new(1000.0, 250.0), FRAC_PI_2);
        let swarm = [me];
        let mut topo = FixedTopology::default();
        topo.base_links.push(UavId(0));
        let range = UniformRange::new(400.0);
        let policy = ConnectedCoverage::new(10, 10);

        let aim = me.autopilot.point_at(&me.state, FRAC_PI_2, 100.0);
        let target = me
            .autopilot
            .project_endpoint(&me.state, &Destination::new(aim), 10);
        let mut scent = FlatScent::new(area());
        let (c, r) = area().grid_coords(&target);
        for (dc, dr) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            scent.values.insert(area().cell_at(c + dc, r + dr).unwrap(), -500.0);
        }
        let ctx = ctx(&swarm, &scent, &topo, &range);

        // several headings can end inside the stale block; any of them will do
        let p = policy.connect_and_explore(&me, &ctx).unwrap();
        assert_eq!(area().grid_coords(&p), (c, r));
        assert!(range.can_communicate(&p, &BASE));
    }

    #[test]
    fn stays_in_range_of_predicted_parent() {
        // uav0 hovers near base and is about to fly east; uav1 is out of base range
        let mut parent = snapshot(0, Position::new(1000.0, 200.0), 0.0);
        parent.destination = Destination::new(Position::new(1800.0, 200.0));
        let me = snapshot(1, Position::new(1000.0, 500.0), FRAC_PI_2);
        let swarm = [parent, me];
        let mut topo = FixedTopology::default();
        topo.links.insert(UavId(1), vec![UavId(0)]);
        topo.hops.insert(UavId(0), HopCount::Hops(1));
        let scent = FlatScent::new(area());
        let range = UniformRange::new(400.0);
        let ctx = ctx(&swarm, &scent, &topo, &range);
        let policy = ConnectedCoverage::new(10, 10);

        let predicted = parent.predict(10);
        assert!((predicted.x - 1100.0).abs() < 1e-6);

        let candidates = policy.candidates(&me, &policy.predict(&[Anchor::Uav(UavId(0))], &ctx), &ctx);
        assert_eq!(candidates.len(), 36);
        assert!(candidates.iter().any(|c| !c.is_valid()));

        let p = policy.connect_and_explore(&me, &ctx).unwrap();
        assert!(range.can_communicate(&p, &predicted));
    }

    #[test]
    fn sweep_size_follows_granularity() {
        let swarm = [snapshot(0, Position::new(1000.0, 250.0), FRAC_PI_2)];
        let topo = FixedTopology::default();
        let scent = FlatScent::new(area());
        let range = UniformRange::new(400.0);
        let ctx = ctx(&swarm, &scent, &topo, &range);
        let candidates = ConnectedCoverage::new(10, 45).candidates(&swarm[0], &[], &ctx);
        let angles: Vec<u32> = candidates.iter().map(|c| c.angle).collect();
        assert_eq!(angles, vec![0, 45, 90, 135, 180, 225, 270, 315]);
        assert!(candidates.iter().all(|c| !c.is_valid()));
    }
}
