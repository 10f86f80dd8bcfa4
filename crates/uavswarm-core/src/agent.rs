//! The agent trait: the contract every simulated UAV satisfies.
//!
//! An agent is driven through three hooks per tick, always in this order:
//! `before_move` (maybe reconsider the destination), `advance` (one tick of
//! autopilot motion) and `after_move` (internal timer bookkeeping). The
//! orchestrator owns everything shared; an agent only ever mutates itself.

use crate::decision::{Decision, DecisionContext, UavSnapshot};
use crate::status::KinematicState;
use crate::types::{Destination, UavId};

pub trait Agent {
    fn id(&self) -> UavId;

    fn state(&self) -> &KinematicState;

    fn destination(&self) -> &Destination;

    /// Copy of the state other agents are allowed to see.
    fn snapshot(&self) -> UavSnapshot;

    /// Human-readable name of the decision policy.
    fn policy_name(&self) -> &'static str;

    /// Whether the next `before_move` will run the policy.
    fn decision_due(&self) -> bool;

    /// Run the decision policy if the timer is due. Returns what was decided.
    fn before_move(&mut self, ctx: &DecisionContext<'_>) -> Option<Decision>;

    /// Apply one tick of autopilot motion.
    fn advance(&mut self);

    fn after_move(&mut self);
}
