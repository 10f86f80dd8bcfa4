//! Spread out by pushing away from close one-hop neighbours.
//!
//! Each neighbour inside the influence radius contributes a push directed
//! away from it, scaled linearly from 1 at contact to 0 at the radius. When
//! any push applies it wins outright; the scent field is only consulted by
//! the fallback.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use uavswarm_core::decision::{Decision, DecisionContext, UavSnapshot};
use uavswarm_core::types::Position;

use super::{DecisionPolicy, RandomHeading, ScentFollowing};

/// What to do when no neighbour is close enough to push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepulsionFallback {
    #[default]
    ScentFollowing,
    RandomHeading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsion {
    radius: f64,
    fallback: RepulsionFallback,
}

impl Repulsion {
    pub fn new(radius: f64, fallback: RepulsionFallback) -> Self {
        Self { radius, fallback }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn fallback(&self) -> RepulsionFallback {
        self.fallback
    }

    /// Summed push from all one-hop neighbours inside the radius, or `None`
    /// if none of them is close enough. Coincident neighbours have no
    /// direction to push along and are skipped.
    pub fn force(&self, me: &UavSnapshot, ctx: &DecisionContext<'_>) -> Option<Position> {
        let here = me.position();
        let mut total: Option<Position> = None;
        for id in ctx.topology.neighbours(me.id, 1) {
            let Some(other) = ctx.uav(id) else { continue };
            let d = here.distance_to(&other.position());
            if d >= self.radius {
                continue;
            }
            let Some(away) = (here - other.position()).normalized() else { continue };
            let push = away * ((self.radius - d) / self.radius);
            total = Some(total.map_or(push, |t| t + push));
        }
        total
    }
}

impl DecisionPolicy for Repulsion {
    fn name(&self) -> &'static str {
        match self.fallback {
            RepulsionFallback::ScentFollowing => "repulsion",
            RepulsionFallback::RandomHeading => "random-repulsion",
        }
    }

    fn decide(&self, me: &UavSnapshot, ctx: &DecisionContext<'_>, rng: &mut dyn RngCore) -> Decision {
        if let Some(direction) = self.force(me, ctx).and_then(|f| f.normalized()) {
            let reach = me.autopilot.lookahead_radius();
            return Decision::Steer(me.position() + direction * reach);
        }
        match self.fallback {
            RepulsionFallback::ScentFollowing => ScentFollowing.decide(me, ctx, rng),
            RepulsionFallback::RandomHeading => RandomHeading.decide(me, ctx, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::testing::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uavswarm_core::prelude::*;

    fn topology_linking(me: u32, others: &[u32]) -> FixedTopology {
        let mut topo = FixedTopology::default();
        topo.links
            .insert(UavId(me), others.iter().map(|i| UavId(*i)).collect());
        topo
    }

    #[test]
    fn pushes_away_from_a_close_neighbour() {
        let swarm = [
            snapshot(0, Position::new(1000.0, 500.0), 0.0),
            snapshot(1, Position::new(1100.0, 500.0), 0.0),
        ];
        let scent = FlatScent::new(area());
        let topo = topology_linking(0, &[1]);
        let range = UniformRange::new(400.0);
        let ctx = DecisionContext {
            tick: 0,
            base: Position::new(1000.0, 0.0),
            swarm: &swarm,
            scent: &scent,
            topology: &topo,
            reachability: &range,
        };
        let policy = Repulsion::new(200.0, RepulsionFallback::ScentFollowing);
        let force = policy.force(&swarm[0], &ctx).unwrap();
        assert!((force.x + 0.5).abs() < 1e-12);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = policy.decide(&swarm[0], &ctx, &mut rng).destination();
        assert!((p.x - 900.0).abs() < 1e-9 && (p.y - 500.0).abs() < 1e-9);
    }

    #[test]
    fn closer_neighbours_push_harder() {
        let swarm = [
            snapshot(0, Position::new(1000.0, 500.0), 0.0),
            snapshot(1, Position::new(1050.0, 500.0), 0.0),
            snapshot(2, Position::new(1000.0, 350.0), 0.0),
        ];
        let scent = FlatScent::new(area());
        let topo = topology_linking(0, &[1, 2]);
        let range = UniformRange::new(400.0);
        let ctx = DecisionContext {
            tick: 0,
            base: Position::new(1000.0, 0.0),
            swarm: &swarm,
            scent: &scent,
            topology: &topo,
            reachability: &range,
        };
        let f = Repulsion::new(200.0, RepulsionFallback::ScentFollowing)
            .force(&swarm[0], &ctx)
            .unwrap();
        // 0.75 west from uav1, 0.25 north from uav2
        assert!((f.x + 0.75).abs() < 1e-12);
        assert!((f.y - 0.25).abs() < 1e-12);
    }

    #[test]
    fn falls_back_when_nobody_is_close() {
        let swarm = [
            snapshot(0, Position::new(1000.0, 500.0), 0.0),
            snapshot(1, Position::new(1300.0, 500.0), 0.0),
        ];
        let scent = FlatScent::new(area());
        let topo = topology_linking(0, &[1]);
        let range = UniformRange::new(400.0);
        let ctx = DecisionContext {
            tick: 0,
            base: Position::new(1000.0, 0.0),
            swarm: &swarm,
            scent: &scent,
            topology: &topo,
            reachability: &range,
        };
        for fallback in [RepulsionFallback::ScentFollowing, RepulsionFallback::RandomHeading] {
            let policy = Repulsion::new(200.0, fallback);
            assert!(policy.force(&swarm[0], &ctx).is_none());
            let mut a = ChaCha8Rng::seed_from_u64(8);
            let mut b = ChaCha8Rng::seed_from_u64(8);
            let expected = match fallback {
                RepulsionFallback::ScentFollowing => ScentFollowing.decide(&swarm[0], &ctx, &mut b),
                RepulsionFallback::RandomHeading => RandomHeading.decide(&swarm[0], &ctx, &mut b),
            };
            assert_eq!(policy.decide(&swarm[0], &ctx, &mut a), expected);
        }
    }

    #[test]
    fn coincident_neighbours_do_not_push() {
        let swarm = [
            snapshot(0, Position::new(1000.0, 0.0), 0.0),
            snapshot(1, Position::new(1000.0, 0.0), 0.0),
        ];
        let scent = FlatScent::new(area());
        let topo = topology_linking(0, &[1]);
        let range = UniformRange::new(400.0);
        let ctx = DecisionContext {
            tick: 0,
            base: Position::new(1000.0, 0.0),
            swarm: &swarm,
            scent: &scent,
            topology: &topo,
            reachability: &range,
        };
        assert!(Repulsion::new(200.0, RepulsionFallback::ScentFollowing)
            .force(&swarm[0], &ctx)
            .is_none());
    }
}
