//! Kinematic status of a fixed-wing UAV.
//!
//! Each component carries its own physical limits so that an update can
//! never leave the envelope: headings stay in `[0, 2π)`, speeds stay in
//! `[min, max]` and per-tick changes are clamped.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use crate::types::Position;

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-π, π]`.
pub fn shortest_rotation(from: f64, to: f64) -> f64 {
    let d = normalize_angle(to - from);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// Physical limits shared by every UAV of a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightEnvelope {
    pub min_speed: f64,
    pub max_speed: f64,
    pub max_accel: f64,
    pub max_decel: f64,
    /// Radians per tick.
    pub max_heading_change: f64,
}

impl Default for FlightEnvelope {
    fn default() -> Self {
        Self {
            min_speed: 0.0,
            max_speed: 10.0,
            max_accel: 1.0,
            max_decel: 1.0,
            max_heading_change: 0.1,
        }
    }
}

impl FlightEnvelope {
    /// Radius of the tightest turn at full speed.
    pub fn turning_radius(&self) -> f64 {
        self.max_speed / self.max_heading_change
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    value: f64,
    max_change: f64,
}

impl Heading {
    pub fn new(value: f64, max_change: f64) -> Self {
        Self {
            value: normalize_angle(value),
            max_change,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max_change(&self) -> f64 {
        self.max_change
    }

    /// Turn toward `target` along the shorter arc, at most `max_change`.
    pub fn steer_towards(&mut self, target: f64) {
        let delta = shortest_rotation(self.value, target);
        let step = if delta.abs() > self.max_change {
            self.max_change.copysign(delta)
        } else {
            delta
        };
        self.value = normalize_angle(self.value + step);
        debug_assert!((0.0..TAU).contains(&self.value), "heading {} left [0, 2pi)", self.value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    current: f64,
    min: f64,
    max: f64,
    max_accel: f64,
    max_decel: f64,
}

impl Speed {
    pub fn new(current: f64, envelope: &FlightEnvelope) -> Self {
        Self {
            current: current.clamp(envelope.min_speed, envelope.max_speed),
            min: envelope.min_speed,
            max: envelope.max_speed,
            max_accel: envelope.max_accel,
            max_decel: envelope.max_decel,
        }
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Jump straight to `target`, clamped into `[min, max]`.
    pub fn set_immediate(&mut self, target: f64) {
        self.current = target.clamp(self.min, self.max);
        self.check();
    }

    /// Move toward `target` by at most one tick of acceleration or braking.
    pub fn accelerate_towards(&mut self, target: f64) {
        let target = target.clamp(self.min, self.max);
        let delta = target - self.current;
        let step = if delta > 0.0 {
            delta.min(self.max_accel)
        } else {
            delta.max(-self.max_decel)
        };
        self.current = (self.current + step).clamp(self.min, self.max);
        self.check();
    }

    fn check(&self) {
        debug_assert!(
            self.current >= self.min && self.current <= self.max,
            "speed {} outside [{}, {}]",
            self.current,
            self.min,
            self.max
        );
    }
}

/// Turn rate. Carried with the state for forward compatibility; no
/// autopilot update reads or writes it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TurnRate {
    pub current: f64,
    pub max: f64,
    pub max_change: f64,
}

/// Position, heading, speed and turn rate of one UAV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: Position,
    pub heading: Heading,
    pub speed: Speed,
    pub turn_rate: TurnRate,
}

impl KinematicState {
    /// State of a freshly launched UAV.
    pub fn launch(position: Position, heading: f64, speed: f64, envelope: &FlightEnvelope) -> Self {
        Self {
            position,
            heading: Heading::new(heading, envelope.max_heading_change),
            speed: Speed::new(speed, envelope),
            turn_rate: TurnRate::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_lands_in_range() {
        for a in [-7.0 * PI, -TAU, -1e-18, 0.0, PI, TAU, 3.0 * TAU + 0.5, 1e9] {
            let n = normalize_angle(a);
            assert!((0.0..TAU).contains(&n), "{} -> {}", a, n);
        }
    }

    #[test]
    fn steering_takes_the_short_way_round() {
        let mut h = Heading::new(0.05, 0.1);
        h.steer_towards(TAU - 0.5);
        assert!((h.value() - (TAU - 0.05)).abs() < 1e-12);
    }

    #[test]
    fn steering_is_rate_limited_then_exact() {
        let mut h = Heading::new(0.0, 0.1);
        h.steer_towards(1.0);
        assert!((h.value() - 0.1).abs() < 1e-12);
        h.steer_towards(0.15);
        assert!((h.value() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn acceleration_is_clamped() {
        let env = FlightEnvelope::default();
        let mut s = Speed::new(0.0, &env);
        s.accelerate_towards(10.0);
        assert_eq!(s.value(), 1.0);
        s.accelerate_towards(100.0);
        assert_eq!(s.value(), 2.0);
        s.accelerate_towards(-5.0);
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn immediate_speed_respects_bounds() {
        let env = FlightEnvelope { min_speed: 2.0, ..FlightEnvelope::default() };
        let mut s = Speed::new(0.0, &env);
        assert_eq!(s.value(), 2.0);
        s.set_immediate(50.0);
        assert_eq!(s.value(), 10.0);
    }

    #[test]
    fn turn_rate_is_carried_unused() {
        let state = KinematicState::launch(Position::new(1.0, 2.0), 0.0, 0.0, &FlightEnvelope::default());
        assert_eq!(state.turn_rate, TurnRate::default());
    }
}
