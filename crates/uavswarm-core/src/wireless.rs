//! Wireless reachability between two points.

use crate::types::Position;

/// Decides whether two points can exchange messages.
pub trait ReachabilityModel {
    /// Maximum communication range.
    fn max_range(&self) -> f64;

    /// Distance as the model measures it.
    fn distance(&self, a: &Position, b: &Position) -> f64 {
        a.distance_to(b)
    }

    fn can_communicate(&self, a: &Position, b: &Position) -> bool;
}

/// Every node has the same circular range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformRange {
    max_range: f64,
}

impl UniformRange {
    pub fn new(max_range: f64) -> Self {
        Self { max_range }
    }
}

impl ReachabilityModel for UniformRange {
    fn max_range(&self) -> f64 {
        self.max_range
    }

    fn can_communicate(&self, a: &Position, b: &Position) -> bool {
        // bounding box first; it can only reject pairs the exact test rejects too
        if (a.x - b.x).abs() > self.max_range || (a.y - b.y).abs() > self.max_range {
            return false;
        }
        self.distance(a, b) <= self.max_range
    }
}
