//! Coverage and connectivity metrics.
//!
//! Two families, both computed on demand from simulation state:
//! - Area metrics: how much of the grid has been scanned, how often, and
//!   how much of it has gone stale
//! - Graph metrics: how fragmented the communication graph is and how many
//!   UAVs can still reach the base station
//!
//! Percentages are rounded to two decimals.

use serde::Serialize;
use uavswarm_core::area::Cell;
use uavswarm_core::scent::ScentField;
use uavswarm_core::types::{Tick, UavId};

use crate::agent_graph::AgentGraph;
use crate::scent_grid::ScentGrid;
use crate::simulation::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastScan {
    uav: UavId,
    tick: Tick,
}

/// Per-cell scan counts.
///
/// A UAV that stays over the same cell on consecutive ticks counts as a
/// single scan; a different UAV, or a gap of more than one tick, starts a
/// new one.
#[derive(Debug, Clone)]
pub struct VisitLog {
    cols: usize,
    scans: Vec<u32>,
    last: Vec<Option<LastScan>>,
}

impl VisitLog {
    pub fn new(cols: usize, cells: usize) -> Self {
        Self {
            cols,
            scans: vec![0; cells],
            last: vec![None; cells],
        }
    }

    /// Record a pass of `uav` over `cell`. Returns whether it counted as a new scan.
    pub fn record(&mut self, cell: Cell, uav: UavId, tick: Tick) -> bool {
        let idx = cell.row * self.cols + cell.col;
        let Some(slot) = self.last.get_mut(idx) else {
            return false;
        };
        let new_scan = match *slot {
            Some(prev) => prev.uav != uav || tick.saturating_sub(prev.tick) > 1,
            None => true,
        };
        if new_scan {
            self.scans[idx] += 1;
        }
        *slot = Some(LastScan { uav, tick });
        new_scan
    }

    pub fn scans(&self) -> &[u32] {
        &self.scans
    }

    pub fn scanned_cells(&self) -> usize {
        self.scans.iter().filter(|n| **n > 0).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaMetrics {
    pub cells: usize,
    pub scanned_cells: usize,
    pub never_scanned_pct: f64,
    /// Cells whose staleness counter reached the too-old threshold.
    pub stale_cells_pct: f64,
    pub avg_scans: f64,
    pub std_scans: f64,
}

impl AreaMetrics {
    pub fn compute(scent: &ScentGrid, visits: &VisitLog, too_old: f64) -> Self {
        let cells = visits.scans().len();
        let scanned = visits.scanned_cells();

        let stale = scent
            .layer_values(scent.summary_layer())
            .map(|values| values.iter().filter(|v| **v <= -too_old).count())
            .unwrap_or(0);

        let (avg, std) = mean_and_std(visits.scans());
        Self {
            cells,
            scanned_cells: scanned,
            never_scanned_pct: percent(cells - scanned, cells),
            stale_cells_pct: percent(stale, cells),
            avg_scans: round2(avg),
            std_scans: round2(std),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphMetrics {
    pub links: usize,
    pub connected_components: usize,
    /// Share of all nodes, base included, in the largest component.
    pub giant_component_pct: f64,
    /// Share of UAVs with any path to the base.
    pub connected_to_base_pct: f64,
}

impl GraphMetrics {
    pub fn compute(graph: &AgentGraph) -> Self {
        Self {
            links: graph.edge_count(),
            connected_components: graph.connected_components(),
            giant_component_pct: percent(graph.giant_component_size(), graph.node_count()),
            connected_to_base_pct: percent(graph.connected_to_base(), graph.uav_count()),
        }
    }
}

/// All metrics at one tick.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageStats {
    pub tick: Tick,
    pub area: AreaMetrics,
    pub graph: GraphMetrics,
    /// Decisions that fell back to the base this run so far.
    pub fallbacks: u64,
}

pub fn compute(sim: &Simulation) -> CoverageStats {
    let too_old = sim.config().scent.too_old;
    CoverageStats {
        tick: sim.current_tick(),
        area: AreaMetrics::compute(sim.scent(), sim.visits(), too_old),
        graph: GraphMetrics::compute(sim.graph()),
        fallbacks: sim.fallbacks(),
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn mean_and_std(values: &[u32]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|v| f64::from(*v)).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|v| (f64::from(*v) - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}
