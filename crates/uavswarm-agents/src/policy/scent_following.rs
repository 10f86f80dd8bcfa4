//! Follow the least fresh scent among left, front and right.

use rand::RngCore;
use uavswarm_core::decision::{Decision, DecisionContext, UavSnapshot};

use super::{pick_min_uniform, DecisionPolicy};

/// Steer toward whichever of the left, front and right lookahead points
/// samples lowest on the UAV's own scent layer. Ties are broken uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScentFollowing;

impl DecisionPolicy for ScentFollowing {
    fn name(&self) -> &'static str {
        "scent-following"
    }

    fn decide(&self, me: &UavSnapshot, ctx: &DecisionContext<'_>, rng: &mut dyn RngCore) -> Decision {
        let pilot = &me.autopilot;
        let candidates: Vec<_> = [
            pilot.left(&me.state),
            pilot.front(&me.state),
            pilot.right(&me.state),
        ]
        .into_iter()
        .map(|p| (p, ctx.scent.sample_for(me.id, &p)))
        .collect();

        // three candidates always yield a pick
        let target = pick_min_uniform(&candidates, rng).unwrap_or_else(|| pilot.front(&me.state));
        Decision::Steer(target)
    }
}
