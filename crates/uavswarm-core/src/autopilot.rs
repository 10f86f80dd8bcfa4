//! Fixed-wing autopilot: one-tick kinematics and trajectory projection.
//!
//! The autopilot is a pure function of `(state, destination)`. Live motion
//! and speculative "what-if" lookahead run the exact same update, so a
//! projection is just `advance` applied to a private copy of the state.
//!
//! Each tick runs, in order:
//! 1. boundary strategy (a transient destination override),
//! 2. speed update,
//! 3. turn rate (inert),
//! 4. heading update toward the effective destination,
//! 5. position update along the new heading.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::area::Area;
use crate::status::{normalize_angle, FlightEnvelope, KinematicState};
use crate::types::{Destination, Position};

/// How speed responds to the autopilot's demand for full speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedProfile {
    /// Reference fixed-wing profile: cruise at max speed from the first tick.
    #[default]
    Instant,
    /// Approach max speed under the envelope's accel/decel limits.
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    area: Area,
    profile: SpeedProfile,
    lookahead: f64,
}

impl Autopilot {
    /// The lookahead radius is the envelope's turning radius.
    pub fn new(area: Area, envelope: &FlightEnvelope, profile: SpeedProfile) -> Self {
        Self {
            area,
            profile,
            lookahead: envelope.turning_radius(),
        }
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn profile(&self) -> SpeedProfile {
        self.profile
    }

    pub fn lookahead_radius(&self) -> f64 {
        self.lookahead
    }

    /// Point at `distance` along `heading + angle_offset`.
    pub fn point_at(&self, state: &KinematicState, angle_offset: f64, distance: f64) -> Position {
        state
            .position
            .offset(state.heading.value() + angle_offset, distance)
    }

    /// Point on the lookahead circle at `heading + angle_offset`.
    pub fn point_ahead(&self, state: &KinematicState, angle_offset: f64) -> Position {
        self.point_at(state, angle_offset, self.lookahead)
    }

    pub fn left(&self, state: &KinematicState) -> Position {
        self.point_ahead(state, FRAC_PI_4)
    }

    pub fn front(&self, state: &KinematicState) -> Position {
        self.point_ahead(state, 0.0)
    }

    pub fn right(&self, state: &KinematicState) -> Position {
        self.point_ahead(state, -FRAC_PI_4)
    }

    /// Transient destination that turns the UAV away from the area edge.
    ///
    /// `None` while the point straight ahead is still inside the area.
    pub fn boundary_override(&self, state: &KinematicState) -> Option<Position> {
        if !self.area.is_outside(&self.front(state)) {
            return None;
        }
        let left = self.point_ahead(state, FRAC_PI_2);
        if !self.area.is_outside(&left) {
            return Some(left);
        }
        let right = self.point_ahead(state, -FRAC_PI_2);
        if !self.area.is_outside(&right) {
            return Some(right);
        }
        Some(left)
    }

    /// Four-quadrant bearing from `from` to `to`; `None` when they coincide.
    pub fn bearing(from: &Position, to: &Position) -> Option<f64> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0.0 && dy == 0.0 {
            None
        } else {
            Some(normalize_angle(dy.atan2(dx)))
        }
    }

    /// One tick of motion toward `destination`.
    pub fn advance(&self, state: &KinematicState, destination: &Destination) -> KinematicState {
        let target = self
            .boundary_override(state)
            .unwrap_or_else(|| destination.position());

        let mut next = *state;
        let cruise = next.speed.max();
        match self.profile {
            SpeedProfile::Instant => next.speed.set_immediate(cruise),
            SpeedProfile::Limited => next.speed.accelerate_towards(cruise),
        }
        if let Some(bearing) = Self::bearing(&next.position, &target) {
            next.heading.steer_towards(bearing);
        }
        next.position = next
            .position
            .offset(next.heading.value(), next.speed.value());
        next
    }

    /// States after each of the next `steps` ticks. The input is untouched.
    pub fn project(
        &self,
        state: &KinematicState,
        destination: &Destination,
        steps: u32,
    ) -> Vec<KinematicState> {
        let mut trajectory = Vec::with_capacity(steps as usize);
        let mut current = *state;
        for _ in 0..steps {
            current = self.advance(&current, destination);
            trajectory.push(current);
        }
        trajectory
    }

    /// Position after `steps` ticks, without keeping the intermediate states.
    pub fn project_endpoint(
        &self,
        state: &KinematicState,
        destination: &Destination,
        steps: u32,
    ) -> Position {
        let mut current = *state;
        for _ in 0..steps {
            current = self.advance(&current, destination);
        }
        current.position
    }
}
