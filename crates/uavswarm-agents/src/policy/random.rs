//! Policies that ignore the scent field.

use rand::{Rng, RngCore};
use uavswarm_core::decision::{Decision, DecisionContext, UavSnapshot};

use super::DecisionPolicy;

/// Probability of turning left. Right has the same weight.
pub const TURN_PROBABILITY: f64 = 0.2;

/// Random turn among left, front and right with weights 0.2 / 0.6 / 0.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomHeading;

impl DecisionPolicy for RandomHeading {
    fn name(&self) -> &'static str {
        "random-heading"
    }

    fn decide(&self, me: &UavSnapshot, _ctx: &DecisionContext<'_>, rng: &mut dyn RngCore) -> Decision {
        let pilot = &me.autopilot;
        let r: f64 = rng.gen();
        let target = if r < TURN_PROBABILITY {
            pilot.left(&me.state)
        } else if r < 1.0 - TURN_PROBABILITY {
            pilot.front(&me.state)
        } else {
            pilot.right(&me.state)
        };
        Decision::Steer(target)
    }
}

/// A fresh uniformly random point of the area at every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomDestination;

impl DecisionPolicy for RandomDestination {
    fn name(&self) -> &'static str {
        "random-destination"
    }

    fn decide(&self, me: &UavSnapshot, _ctx: &DecisionContext<'_>, rng: &mut dyn RngCore) -> Decision {
        Decision::Steer(me.autopilot.area().random_point(rng))
    }
}
