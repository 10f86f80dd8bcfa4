//! End-to-end scenarios against the public simulation API.
//!
//! Run with: cargo test -p uavswarm-runtime --test scenarios

use uavswarm_runtime::prelude::*;

fn config(agents: u32, policy: PolicyKind) -> SimulationConfig {
    SimulationConfig {
        agent_count: agents,
        warmup_ticks: 0,
        policy: PolicyConfig {
            kind: policy,
            ..PolicyConfig::default()
        },
        ..SimulationConfig::default()
    }
}

fn decisions(events: &[SimulationEvent]) -> Vec<(UavId, Position, bool)> {
    events
        .iter()
        .filter_map(|e| match e {
            SimulationEvent::Decided { uav, destination, fallback, .. } => {
                Some((*uav, *destination, *fallback))
            }
            _ => None,
        })
        .collect()
}

// ============================================================================
// Connectivity
// ============================================================================

#[test]
fn lone_uav_out_of_range_heads_for_the_base() {
    let mut c = config(1, PolicyKind::ConnectedCoverage);
    c.base = Position::new(1000.0, 0.0);
    c.wireless_range = 400.0;
    c.decision_frequency = 1;
    let mut sim = Simulation::configure(c).unwrap();
    assert!(sim.place(UavId(0), Position::new(0.0, 0.0)));

    // 30 ticks at 10 per tick cannot close a 1000 gap to within 400
    for _ in 0..30 {
        let events = sim.tick();
        let decided = decisions(&events);
        assert_eq!(decided.len(), 1);
        let (_, destination, fallback) = decided[0];
        assert!(fallback);
        assert_eq!(destination, Position::new(1000.0, 0.0));
    }
    assert_eq!(sim.fallbacks(), 30);
    assert_eq!(sim.stats().fallbacks, 30);
}

#[test]
fn hop_counts_through_a_relay() {
    // A is within range of the base, B only within range of A
    let mut c = config(2, PolicyKind::ConnectedCoverage);
    c.base = Position::new(0.0, 0.0);
    c.wireless_range = 400.0;
    let mut sim = Simulation::configure(c).unwrap();
    sim.place(UavId(0), Position::new(300.0, 0.0));
    sim.place(UavId(1), Position::new(600.0, 0.0));

    let graph = sim.graph();
    assert!(graph.links_to_base(UavId(0)));
    assert!(!graph.links_to_base(UavId(1)));
    assert_eq!(graph.hop_distance(UavId(0)), HopCount::Hops(1));
    assert_eq!(graph.hop_distance(UavId(1)), HopCount::Hops(2));
    assert_eq!(graph.neighbours(UavId(1), 1), vec![UavId(0)]);
}

#[test]
fn swarm_launched_from_the_base_is_fully_connected() {
    let sim = Simulation::configure(config(6, PolicyKind::ConnectedCoverage)).unwrap();
    let stats = sim.stats();
    assert_eq!(stats.graph.connected_components, 1);
    assert_eq!(stats.graph.giant_component_pct, 100.0);
    assert_eq!(stats.graph.connected_to_base_pct, 100.0);
}

// ============================================================================
// Reproducibility
// ============================================================================

fn trajectory(seed: u64, policy: PolicyKind) -> String {
    let mut c = config(5, policy);
    c.seed = seed;
    c.decision_frequency = 3;
    let mut sim = Simulation::configure(c).unwrap();
    sim.run(300);
    serde_json::to_string(&sim.snapshot()).unwrap()
}

#[test]
fn same_seed_same_flight() {
    for policy in [PolicyKind::ScentFollowing, PolicyKind::RandomHeading, PolicyKind::ConnectedCoverage] {
        assert_eq!(trajectory(42, policy), trajectory(42, policy), "{policy}");
    }
}

#[test]
fn different_seed_different_flight() {
    assert_ne!(
        trajectory(42, PolicyKind::RandomHeading),
        trajectory(43, PolicyKind::RandomHeading)
    );
}

// ============================================================================
// Area and boundary
// ============================================================================

#[test]
fn destinations_stay_inside_the_area() {
    for policy in PolicyKind::ALL {
        let mut c = config(4, policy);
        c.decision_frequency = 2;
        let mut sim = Simulation::configure(c).unwrap();
        let area = *sim.area();
        for _ in 0..600 {
            for (uav, destination, _) in decisions(&sim.tick()) {
                assert!(area.contains(&destination), "{policy} {uav} {destination:?}");
            }
        }
    }
}

#[test]
fn uavs_turn_back_at_the_edges() {
    let mut c = config(4, PolicyKind::RandomHeading);
    c.decision_frequency = 1;
    let mut sim = Simulation::configure(c).unwrap();
    let area = *sim.area();
    let margin = 3.0 * sim.agents()[0].autopilot().lookahead_radius();
    for _ in 0..2000 {
        sim.tick();
        for uav in sim.agents() {
            let p = uav.state().position;
            assert!(p.x > area.min_x() - margin && p.x < area.max_x() + margin, "{p:?}");
            assert!(p.y > area.min_y() - margin && p.y < area.max_y() + margin, "{p:?}");
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn invalid_configs_are_rejected() {
    let mut c = SimulationConfig::default();
    c.area.granularity = 0.0;
    assert!(matches!(
        Simulation::configure(c),
        Err(ConfigError::NonPositiveGranularity(_))
    ));

    let mut c = SimulationConfig::default();
    c.policy.angular_granularity = 7;
    assert!(matches!(Simulation::configure(c), Err(ConfigError::AngularGranularity(7))));

    let mut c = SimulationConfig::default();
    c.decision_frequency = 0;
    assert!(matches!(Simulation::configure(c), Err(ConfigError::ZeroDecisionFrequency)));

    let mut c = SimulationConfig::default();
    c.agent_count = 0;
    assert!(matches!(Simulation::configure(c), Err(ConfigError::NoAgents)));
}

// ============================================================================
// Scent
// ============================================================================

#[test]
fn nothing_is_scanned_during_warmup() {
    let mut c = config(3, PolicyKind::ScentFollowing);
    c.warmup_ticks = 50;
    let mut sim = Simulation::configure(c).unwrap();
    sim.run(50);
    assert_eq!(sim.visits().scanned_cells(), 0);
    let values = sim.scent().layer_values(ScentLayer::Shared).unwrap();
    assert!(values.iter().all(|v| *v == -20.0));

    let events = sim.tick();
    assert!(events.contains(&SimulationEvent::WarmupEnded { tick: 51 }));
    assert!(sim.visits().scanned_cells() > 0);
}

#[test]
fn private_layers_are_exchanged_between_neighbours() {
    let mut c = config(2, PolicyKind::DistributedScent);
    c.scent.exchange_frequency = 5;
    let mut sim = Simulation::configure(c).unwrap();
    assert!(sim.scent().is_distributed());
    sim.place(UavId(0), Position::new(900.0, 100.0));
    sim.place(UavId(1), Position::new(1100.0, 100.0));

    let mut exchanged = Vec::new();
    for _ in 0..5 {
        for e in sim.tick() {
            if let SimulationEvent::Exchanged { from, to, cells, .. } = e {
                exchanged.push((from, to, cells));
            }
        }
    }
    assert!(exchanged.iter().any(|(f, t, n)| *f == UavId(0) && *t == UavId(1) && *n > 0));
    assert!(exchanged.iter().any(|(f, t, n)| *f == UavId(1) && *t == UavId(0) && *n > 0));

    // UAV 1 never flew west of x = 1000, yet now knows fresh cells there
    let area = *sim.area();
    let learned = (0..area.rows())
        .flat_map(|row| (0..area.cols() / 2).map(move |col| Cell::new(col, row)))
        .filter(|cell| {
            sim.scent()
                .value(ScentLayer::Agent(UavId(1)), *cell)
                .map_or(false, |v| v > 0.0)
        })
        .count();
    assert!(learned > 0);
}

#[test]
fn shared_field_never_exchanges() {
    let mut sim = Simulation::configure(config(3, PolicyKind::ScentFollowing)).unwrap();
    assert!(!sim.scent().is_distributed());
    for _ in 0..300 {
        assert!(!sim
            .tick()
            .iter()
            .any(|e| matches!(e, SimulationEvent::Exchanged { .. })));
    }
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn run_samples_after_warmup() {
    let mut c = config(3, PolicyKind::ScentFollowing);
    c.warmup_ticks = 100;
    c.stats_every = 100;
    let mut sim = Simulation::configure(c).unwrap();
    let report = sim.run(500);
    assert_eq!(report.ticks, 500);
    let ticks: Vec<u64> = report.samples.iter().map(|s| s.tick).collect();
    assert_eq!(ticks, vec![200, 300, 400, 500]);
    assert_eq!(report.last.tick, 500);
    assert!(report.last.area.scanned_cells > 0);
}

#[test]
fn snapshot_serializes() {
    let mut sim = Simulation::configure(config(3, PolicyKind::Repulsion)).unwrap();
    sim.run(20);
    let json = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(json["tick"], 20);
    assert_eq!(json["uavs"].as_array().unwrap().len(), 3);
    assert_eq!(json["uavs"][0]["policy"], "repulsion");
    assert!(json["links"].is_array());
    assert_eq!(json["stats"]["area"]["cells"], 5000);
}
