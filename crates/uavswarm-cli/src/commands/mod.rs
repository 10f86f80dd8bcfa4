//! CLI command implementations.

pub mod init;
pub mod run;
pub mod batch;

use colored::Colorize;
use uavswarm::prelude::*;

/// Print the coverage summary shared by `run` and `batch`.
pub(crate) fn print_stats(stats: &CoverageStats) {
    println!("{}", "Area".blue().bold());
    println!(
        "  Scanned cells:     {} / {}",
        stats.area.scanned_cells.to_string().cyan(),
        stats.area.cells
    );
    println!("  Never scanned:     {:.2}%", stats.area.never_scanned_pct);
    println!("  Stale cells:       {:.2}%", stats.area.stale_cells_pct);
    println!(
        "  Scans per cell:    {:.2} ± {:.2}",
        stats.area.avg_scans, stats.area.std_scans
    );
    println!();
    println!("{}", "Connectivity".blue().bold());
    println!("  Links:             {}", stats.graph.links.to_string().cyan());
    println!(
        "  Components:        {}",
        stats.graph.connected_components.to_string().cyan()
    );
    println!("  Giant component:   {:.2}%", stats.graph.giant_component_pct);
    println!("  Linked to base:    {:.2}%", stats.graph.connected_to_base_pct);
    println!(
        "  Base fallbacks:    {}",
        stats.fallbacks.to_string().yellow()
    );
}
