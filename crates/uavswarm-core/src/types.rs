//! Shared types used across all uavswarm crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Stable identifier of a UAV in the swarm.
///
/// Ids are assigned in increasing order at simulation start and double as
/// the tie-break key wherever two agents rank equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UavId(pub u32);

impl UavId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UavId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uav{}", self.0)
    }
}

/// Simulation tick counter.
pub type Tick = u64;

/// A point in the simulated world.
///
/// `z` is carried for completeness; the world is flat and every distance
/// used by decision logic is planar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_altitude(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar Euclidean distance.
    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Planar length of this position taken as a vector.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same planar direction, or `None` for the zero vector.
    pub fn normalized(&self) -> Option<Position> {
        let n = self.norm();
        if n <= f64::EPSILON {
            None
        } else {
            Some(Position::with_altitude(self.x / n, self.y / n, self.z))
        }
    }

    /// Point at `distance` from here in direction `angle` (radians, 0 = east).
    pub fn offset(&self, angle: f64, distance: f64) -> Position {
        Position::with_altitude(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
            self.z,
        )
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::with_altitude(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::with_altitude(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, rhs: f64) -> Position {
        Position::with_altitude(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// The target an agent's autopilot steers toward.
///
/// Owned by exactly one agent. Decision policies overwrite it; the autopilot
/// only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destination(Position);

impl Destination {
    pub fn new(target: Position) -> Self {
        Self(target)
    }

    pub fn position(&self) -> Position {
        self.0
    }

    pub fn set(&mut self, target: Position) {
        self.0 = target;
    }
}

/// Hop distance from an agent to the base station.
///
/// `Unreachable` orders after every finite count, so `min` over candidates
/// behaves like a min over an integer-or-infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HopCount {
    Hops(u32),
    Unreachable,
}

impl HopCount {
    pub const BASE: HopCount = HopCount::Hops(0);

    /// One hop further, saturating at `Unreachable`.
    pub fn next(self) -> HopCount {
        match self {
            HopCount::Hops(n) => HopCount::Hops(n.saturating_add(1)),
            HopCount::Unreachable => HopCount::Unreachable,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, HopCount::Hops(_))
    }

    pub fn hops(&self) -> Option<u32> {
        match self {
            HopCount::Hops(n) => Some(*n),
            HopCount::Unreachable => None,
        }
    }
}

impl Default for HopCount {
    fn default() -> Self {
        HopCount::Unreachable
    }
}

impl fmt::Display for HopCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopCount::Hops(n) => write!(f, "{}", n),
            HopCount::Unreachable => write!(f, "inf"),
        }
    }
}

/// Rank of an agent on its way to base: hop count first, then id.
///
/// Strictly totally ordered, which is what keeps equally distant neighbours
/// from adopting each other as parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BaseRank {
    pub hops: HopCount,
    pub id: UavId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_ignores_altitude() {
        let a = Position::with_altitude(0.0, 0.0, 50.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn hop_count_orders_unreachable_last() {
        assert!(HopCount::Hops(7) < HopCount::Unreachable);
        assert_eq!(HopCount::BASE.next(), HopCount::Hops(1));
        assert_eq!(HopCount::Unreachable.next(), HopCount::Unreachable);
        assert_eq!(HopCount::Hops(u32::MAX).next(), HopCount::Hops(u32::MAX));
    }

    #[test]
    fn rank_breaks_ties_by_id() {
        let a = BaseRank { hops: HopCount::Hops(2), id: UavId(1) };
        let b = BaseRank { hops: HopCount::Hops(2), id: UavId(4) };
        let c = BaseRank { hops: HopCount::Hops(1), id: UavId(9) };
        assert!(a < b);
        assert!(c < a);
    }

    #[test]
    fn altitude_defaults_when_absent() {
        let p: Position = serde_json::from_str(r#"{"x": 1.5, "y": -2.0}"#).unwrap();
        assert_eq!(p, Position::new(1.5, -2.0));
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(Position::new(0.0, 0.0).normalized().is_none());
        let u = Position::new(0.0, -2.0).normalized().unwrap();
        assert!((u.y + 1.0).abs() < 1e-12);
    }
}
