//! Read side of the scent (pheromone) field.
//!
//! Lower samples mean "more attractive": a cell that was just scanned holds
//! freshness 1.0, and a cell nobody has visited for a long time holds a
//! large negative staleness counter. Writes (deposit, decay, merge) belong
//! to the runtime that owns the concrete grid.

use serde::{Deserialize, Serialize};

use crate::area::{Area, Cell};
use crate::types::{Position, UavId};

/// Score contributed by a sampled cell that lies off the grid.
pub const OUTSIDE_SENTINEL: f64 = 1000.0;

/// Names one layer of a scent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScentLayer {
    /// The single layer of a centralized field.
    Shared,
    /// One UAV's private knowledge in a distributed field.
    Agent(UavId),
    /// Per-cell maximum over all agent layers.
    Merged,
}

pub trait ScentField {
    fn area(&self) -> &Area;

    /// Cell value, or `None` if the layer does not exist in this field.
    fn value(&self, layer: ScentLayer, cell: Cell) -> Option<f64>;

    /// The layer a UAV deposits into and reads from.
    fn layer_for(&self, uav: UavId) -> ScentLayer;

    /// Sum over the cell under `position` and its right, upper and
    /// diagonal neighbours. Off-grid cells count as [`OUTSIDE_SENTINEL`].
    fn sample(&self, layer: ScentLayer, position: &Position) -> f64 {
        let area = self.area();
        let (col, row) = area.grid_coords(position);
        [(0, 0), (1, 0), (0, 1), (1, 1)]
            .iter()
            .map(|(dc, dr)| {
                area.cell_at(col + dc, row + dr)
                    .and_then(|cell| self.value(layer, cell))
                    .unwrap_or(OUTSIDE_SENTINEL)
            })
            .sum()
    }

    fn sample_for(&self, uav: UavId, position: &Position) -> f64 {
        self.sample(self.layer_for(uav), position)
    }
}
