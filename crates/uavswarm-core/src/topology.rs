//! Read side of the communication graph between UAVs and the base station.

use crate::types::{BaseRank, HopCount, UavId};

pub trait SwarmTopology {
    /// UAVs within `max_hops` links of `uav`, ascending by id, excluding
    /// `uav` itself. Paths may pass through the base station.
    fn neighbours(&self, uav: UavId, max_hops: u32) -> Vec<UavId>;

    /// Whether `uav` has a direct link to the base station.
    fn links_to_base(&self, uav: UavId) -> bool;

    fn hop_distance(&self, uav: UavId) -> HopCount;

    fn rank(&self, uav: UavId) -> BaseRank {
        BaseRank {
            hops: self.hop_distance(uav),
            id: uav,
        }
    }
}
