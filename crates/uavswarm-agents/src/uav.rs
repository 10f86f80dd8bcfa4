//! The UAV agent.
//!
//! A UAV owns its autopilot, kinematic state, destination, decision timer
//! and random stream. The timer starts at 1 and cycles through
//! `1..=decision_frequency`; the policy runs on the ticks where it equals
//! the frequency, so the first decision happens on the UAV's
//! `decision_frequency`-th tick.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};
use uavswarm_core::agent::Agent;
use uavswarm_core::autopilot::Autopilot;
use uavswarm_core::decision::{Decision, DecisionContext, UavSnapshot};
use uavswarm_core::status::KinematicState;
use uavswarm_core::types::{Destination, Position, UavId};

use crate::policy::{DecisionPolicy, Policy};

/// Random stream of one UAV: the global seed selects the key, the id
/// selects the stream, so every UAV draws independently and reproducibly.
pub fn uav_rng(seed: u64, id: UavId) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(id.0));
    rng
}

pub struct Uav {
    id: UavId,
    autopilot: Autopilot,
    state: KinematicState,
    destination: Destination,
    timer: u32,
    decision_frequency: u32,
    rng: ChaCha8Rng,
    policy: Policy,
}

impl Uav {
    /// `decision_frequency` is expected to be validated (at least 1).
    pub fn new(
        id: UavId,
        autopilot: Autopilot,
        state: KinematicState,
        destination: Destination,
        decision_frequency: u32,
        seed: u64,
        policy: Policy,
    ) -> Self {
        Self {
            id,
            autopilot,
            state,
            destination,
            timer: 1,
            decision_frequency: decision_frequency.max(1),
            rng: uav_rng(seed, id),
            policy,
        }
    }

    pub fn autopilot(&self) -> &Autopilot {
        &self.autopilot
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn decision_frequency(&self) -> u32 {
        self.decision_frequency
    }

    /// Move the UAV without flying there. Heading and speed are kept.
    pub fn relocate(&mut self, position: Position) {
        self.state.position = position;
    }
}

impl Agent for Uav {
    fn id(&self) -> UavId {
        self.id
    }

    fn state(&self) -> &KinematicState {
        &self.state
    }

    fn destination(&self) -> &Destination {
        &self.destination
    }

    fn snapshot(&self) -> UavSnapshot {
        UavSnapshot {
            id: self.id,
            state: self.state,
            destination: self.destination,
            autopilot: self.autopilot,
        }
    }

    fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    fn decision_due(&self) -> bool {
        self.timer == self.decision_frequency
    }

    fn before_move(&mut self, ctx: &DecisionContext<'_>) -> Option<Decision> {
        if !self.decision_due() {
            return None;
        }
        let me = self.snapshot();
        let decision = self.policy.decide(&me, ctx, &mut self.rng);

        let area = self.autopilot.area();
        let target = area.clamp(decision.destination());
        debug_assert!(area.contains(&target), "{} destination left the area", self.id);
        self.destination.set(target);

        debug!(
            uav = %self.id,
            tick = ctx.tick,
            x = target.x,
            y = target.y,
            fallback = decision.is_fallback(),
            "new destination"
        );
        Some(decision)
    }

    fn advance(&mut self) {
        self.state = self.autopilot.advance(&self.state, &self.destination);
        trace!(
            uav = %self.id,
            x = self.state.position.x,
            y = self.state.position.y,
            heading = self.state.heading.value(),
            "moved"
        );
    }

    fn after_move(&mut self) {
        if self.timer == self.decision_frequency {
            self.timer = 0;
        }
        self.timer += 1;
    }
}
