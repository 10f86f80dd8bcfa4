//! Dense scent grid backing the [`ScentField`] trait.
//!
//! Each layer is one `f64` per grid cell, row-major. A centralized grid has
//! a single shared layer. A distributed grid has one layer per UAV plus a
//! merged layer holding the per-cell maximum over all UAV layers.
//!
//! Cell values follow the freshness/staleness rule: a deposit sets the cell
//! to exactly 1.0; each decay lowers a positive value by the evaporation
//! speed (floored at 0) and lowers a non-positive value by 1.

use tracing::trace;
use uavswarm_core::area::{Area, Cell};
use uavswarm_core::scent::{ScentField, ScentLayer};
use uavswarm_core::types::{Position, UavId};

/// Value a cell takes when a UAV scans it.
pub const FRESH: f64 = 1.0;

/// One decay step applied to a single cell value.
pub fn decay_value(value: f64, evaporation_speed: f64) -> f64 {
    if value > 0.0 {
        (value - evaporation_speed).max(0.0)
    } else {
        value - 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Centralized,
    Distributed { agents: usize },
}

#[derive(Debug, Clone)]
pub struct ScentGrid {
    area: Area,
    layout: Layout,
    layers: Vec<Vec<f64>>,
    evaporation_speed: f64,
}

impl ScentGrid {
    /// One layer shared by every UAV, every cell at `initial`.
    pub fn centralized(area: Area, initial: f64, evaporation_speed: f64) -> Self {
        Self {
            area,
            layout: Layout::Centralized,
            layers: vec![vec![initial; area.cell_count()]],
            evaporation_speed,
        }
    }

    /// One private layer per UAV plus the merged layer.
    pub fn distributed(area: Area, agents: usize, initial: f64, evaporation_speed: f64) -> Self {
        Self {
            area,
            layout: Layout::Distributed { agents },
            layers: vec![vec![initial; area.cell_count()]; agents + 1],
            evaporation_speed,
        }
    }

    pub fn is_distributed(&self) -> bool {
        matches!(self.layout, Layout::Distributed { .. })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The layer that sums up what the swarm as a whole knows.
    pub fn summary_layer(&self) -> ScentLayer {
        match self.layout {
            Layout::Centralized => ScentLayer::Shared,
            Layout::Distributed { .. } => ScentLayer::Merged,
        }
    }

    fn layer_index(&self, layer: ScentLayer) -> Option<usize> {
        match (self.layout, layer) {
            (Layout::Centralized, _) => Some(0),
            (Layout::Distributed { agents }, ScentLayer::Agent(id)) => {
                (id.index() < agents).then(|| id.index())
            }
            (Layout::Distributed { agents }, ScentLayer::Merged | ScentLayer::Shared) => Some(agents),
        }
    }

    /// Raw row-major values of one layer, for rendering and metrics.
    pub fn layer_values(&self, layer: ScentLayer) -> Option<&[f64]> {
        self.layer_index(layer).map(|i| self.layers[i].as_slice())
    }

    /// Mark the cell under `position` as freshly scanned in `layer`.
    ///
    /// Returns the cell, or `None` when the position is off the grid.
    pub fn deposit(&mut self, position: &Position, layer: ScentLayer) -> Option<Cell> {
        let cell = self.area.cell_of(position)?;
        let li = self.layer_index(layer)?;
        let idx = self.area.index_of(cell);
        self.layers[li][idx] = FRESH;
        if let Layout::Distributed { agents } = self.layout {
            self.layers[agents][idx] = FRESH;
        }
        Some(cell)
    }

    /// One evaporation step over every cell of every layer.
    pub fn decay(&mut self) {
        let speed = self.evaporation_speed;
        match self.layout {
            Layout::Centralized => {
                for v in self.layers[0].iter_mut() {
                    *v = decay_value(*v, speed);
                }
            }
            Layout::Distributed { agents } => {
                for layer in self.layers[..agents].iter_mut() {
                    for v in layer.iter_mut() {
                        *v = decay_value(*v, speed);
                    }
                }
                self.recompute_merged();
            }
        }
        trace!(layers = self.layers.len(), "scent decayed");
    }

    fn recompute_merged(&mut self) {
        let Layout::Distributed { agents } = self.layout else { return };
        if agents == 0 {
            return;
        }
        let (own, merged) = self.layers.split_at_mut(agents);
        let merged = &mut merged[0];
        for (idx, slot) in merged.iter_mut().enumerate() {
            *slot = own
                .iter()
                .map(|layer| layer[idx])
                .fold(f64::NEG_INFINITY, f64::max);
        }
    }

    /// Raise `to` to `max(from, to)` on every cell within `radius_cells`
    /// grid units of the cell under `center`. Returns how many cells rose.
    pub fn merge(&mut self, from: ScentLayer, to: ScentLayer, center: &Position, radius_cells: u32) -> usize {
        let (Some(fi), Some(ti)) = (self.layer_index(from), self.layer_index(to)) else {
            return 0;
        };
        if fi == ti {
            return 0;
        }
        let (cc, cr) = self.area.grid_coords(center);
        let r = i64::from(radius_cells);
        let mut raised = 0;
        for dr in -r..=r {
            for dc in -r..=r {
                if dc * dc + dr * dr > r * r {
                    continue;
                }
                let Some(cell) = self.area.cell_at(cc + dc, cr + dr) else { continue };
                let idx = self.area.index_of(cell);
                let incoming = self.layers[fi][idx];
                let target = &mut self.layers[ti][idx];
                if incoming > *target {
                    *target = incoming;
                    raised += 1;
                }
            }
        }
        raised
    }
}

impl ScentField for ScentGrid {
    fn area(&self) -> &Area {
        &self.area
    }

    fn value(&self, layer: ScentLayer, cell: Cell) -> Option<f64> {
        let li = self.layer_index(layer)?;
        self.layers[li].get(self.area.index_of(cell)).copied()
    }

    fn layer_for(&self, uav: UavId) -> ScentLayer {
        match self.layout {
            Layout::Centralized => ScentLayer::Shared,
            Layout::Distributed { .. } => ScentLayer::Agent(uav),
        }
    }
}
