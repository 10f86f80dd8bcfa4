//! The simulation: the swarm, the scent grid and the communication graph.
//!
//! Time advances in ticks. Within a tick every UAV, in ascending id order,
//! decides (if its timer is due), moves and refreshes its hop count. Only
//! then does the orchestrator touch shared state: it rebuilds the graph,
//! deposits scent, decays and exchanges knowledge. Decisions therefore read
//! a scent field and link set that are consistent for the whole tick.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};
use uavswarm_agents::uav::Uav;
use uavswarm_agents::policy::Policy;
use uavswarm_core::agent::Agent;
use uavswarm_core::area::Area;
use uavswarm_core::autopilot::Autopilot;
use uavswarm_core::decision::{DecisionContext, UavSnapshot};
use uavswarm_core::error::Result;
use uavswarm_core::scent::ScentField;
use uavswarm_core::status::KinematicState;
use uavswarm_core::topology::SwarmTopology;
use uavswarm_core::types::{Destination, HopCount, Position, Tick, UavId};
use uavswarm_core::wireless::UniformRange;

use crate::agent_graph::{AgentGraph, Link};
use crate::config::SimulationConfig;
use crate::metrics::{self, CoverageStats, VisitLog};
use crate::scent_grid::ScentGrid;

/// Stream of the simulation-level random source, kept apart from every UAV stream.
const SETUP_STREAM: u64 = u64::MAX;

/// Events emitted during a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    /// A UAV ran its policy and picked a new destination.
    Decided {
        tick: Tick,
        uav: UavId,
        destination: Position,
        fallback: bool,
    },
    /// A UAV started a new scan of a cell.
    Scanned { tick: Tick, uav: UavId, col: usize, row: usize },
    /// Scent knowledge flowed from one private layer into another.
    Exchanged { tick: Tick, from: UavId, to: UavId, cells: usize },
    /// First tick with scent deposits.
    WarmupEnded { tick: Tick },
    TickComplete {
        tick: Tick,
        links: usize,
        connected_to_base: usize,
    },
}

/// A UAV as seen from outside the simulation.
#[derive(Debug, Clone, Serialize)]
pub struct UavView {
    pub id: UavId,
    pub policy: String,
    pub position: Position,
    pub heading: f64,
    pub speed: f64,
    pub destination: Position,
    pub hops: HopCount,
}

/// A serializable snapshot of the whole simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    pub tick: Tick,
    pub base: Position,
    pub uavs: Vec<UavView>,
    pub links: Vec<Link>,
    pub stats: CoverageStats,
}

/// Outcome of [`Simulation::run`].
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub ticks: Tick,
    /// One sample every `stats_every` ticks after warm-up.
    pub samples: Vec<CoverageStats>,
    pub last: CoverageStats,
}

pub struct Simulation {
    config: SimulationConfig,
    area: Area,
    agents: Vec<Uav>,
    scent: ScentGrid,
    graph: AgentGraph,
    reachability: UniformRange,
    visits: VisitLog,
    tick: Tick,
    fallbacks: u64,
}

impl Simulation {
    /// Validate `config` and build the swarm on the base station.
    ///
    /// Every UAV starts at the base with the configured heading and speed and
    /// a random destination inside the area.
    pub fn configure(config: SimulationConfig) -> Result<Self> {
        let area = config.validate()?;
        let envelope = config.flight.envelope();
        let autopilot = Autopilot::new(area, &envelope, config.flight.speed_profile);

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        rng.set_stream(SETUP_STREAM);

        let agents: Vec<Uav> = (0..config.agent_count)
            .map(|i| {
                let state = KinematicState::launch(
                    config.base,
                    config.flight.initial_heading,
                    config.flight.initial_speed,
                    &envelope,
                );
                Uav::new(
                    UavId(i),
                    autopilot,
                    state,
                    Destination::new(area.random_point(&mut rng)),
                    config.decision_frequency,
                    config.seed,
                    Policy::from_config(&config.policy),
                )
            })
            .collect();

        let initial = -config.scent.too_old;
        let speed = config.scent.evaporation_speed;
        let scent = if config.policy.kind.uses_private_layers() {
            ScentGrid::distributed(area, agents.len(), initial, speed)
        } else {
            ScentGrid::centralized(area, initial, speed)
        };

        let reachability = UniformRange::new(config.wireless_range);
        let mut graph = AgentGraph::new(config.base, agents.len());
        let visits = VisitLog::new(area.cols(), area.cell_count());

        let positions: Vec<Position> = agents.iter().map(|a| a.state().position).collect();
        graph.refresh(&positions, &reachability);
        graph.recompute_hops();

        info!(
            agents = agents.len(),
            policy = %config.policy.kind,
            seed = config.seed,
            cells = area.cell_count(),
            "simulation configured"
        );

        Ok(Self {
            config,
            area,
            agents,
            scent,
            graph,
            reachability,
            visits,
            tick: 0,
            fallbacks: 0,
        })
    }

    /// Put a UAV somewhere without flying it there, then refresh links and hops.
    ///
    /// Returns `false` for an unknown id. Meant for setting up scenarios
    /// before the first tick.
    pub fn place(&mut self, uav: UavId, position: Position) -> bool {
        let Some(agent) = self.agents.get_mut(uav.index()) else {
            return false;
        };
        agent.relocate(position);
        self.refresh_graph();
        self.graph.recompute_hops();
        true
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> Vec<SimulationEvent> {
        self.tick += 1;
        let tick = self.tick;
        let mut events = Vec::new();

        let swarm: Vec<UavSnapshot> = self.agents.iter().map(|a| a.snapshot()).collect();

        for i in 0..self.agents.len() {
            let ctx = DecisionContext {
                tick,
                base: self.config.base,
                swarm: &swarm,
                scent: &self.scent,
                topology: &self.graph,
                reachability: &self.reachability,
            };
            let agent = &mut self.agents[i];
            if let Some(decision) = agent.before_move(&ctx) {
                if decision.is_fallback() {
                    self.fallbacks += 1;
                }
                events.push(SimulationEvent::Decided {
                    tick,
                    uav: agent.id(),
                    destination: agent.destination().position(),
                    fallback: decision.is_fallback(),
                });
            }
            agent.advance();
            let id = agent.id();
            self.graph.update_hop_distance(id);
            self.agents[i].after_move();
        }

        self.refresh_graph();

        if tick > self.config.warmup_ticks {
            if tick == self.config.warmup_ticks + 1 {
                info!(tick, "warm-up over, scanning");
                events.push(SimulationEvent::WarmupEnded { tick });
            }
            self.deposit(tick, &mut events);
            if tick % self.config.scent.evaporation_frequency == 0 {
                self.scent.decay();
            }
            if self.scent.is_distributed() && tick % self.config.scent.exchange_frequency == 0 {
                self.exchange(tick, &mut events);
            }
        }

        events.push(SimulationEvent::TickComplete {
            tick,
            links: self.graph.edge_count(),
            connected_to_base: self.graph.connected_to_base(),
        });
        events
    }

    fn refresh_graph(&mut self) {
        let positions: Vec<Position> = self.agents.iter().map(|a| a.state().position).collect();
        self.graph.refresh(&positions, &self.reachability);
    }

    fn deposit(&mut self, tick: Tick, events: &mut Vec<SimulationEvent>) {
        for agent in &self.agents {
            let id = agent.id();
            let layer = self.scent.layer_for(id);
            let Some(cell) = self.scent.deposit(&agent.state().position, layer) else {
                continue;
            };
            if self.visits.record(cell, id, tick) {
                events.push(SimulationEvent::Scanned {
                    tick,
                    uav: id,
                    col: cell.col,
                    row: cell.row,
                });
            }
        }
    }

    /// Each UAV shares its layer with its one-hop neighbours, in a disc
    /// around its own position.
    fn exchange(&mut self, tick: Tick, events: &mut Vec<SimulationEvent>) {
        let radius = self.config.scent.merge_radius_cells;
        for agent in &self.agents {
            let from = agent.id();
            let center = agent.state().position;
            let source = self.scent.layer_for(from);
            for to in self.graph.neighbours(from, 1) {
                let target = self.scent.layer_for(to);
                let cells = self.scent.merge(source, target, &center, radius);
                if cells > 0 {
                    debug!(tick, %from, %to, cells, "scent exchanged");
                    events.push(SimulationEvent::Exchanged { tick, from, to, cells });
                }
            }
        }
    }

    /// Whether the current tick is one where `run` samples metrics.
    pub fn sample_due(&self) -> bool {
        self.tick > self.config.warmup_ticks && self.tick % self.config.stats_every.max(1) == 0
    }

    /// Run `max_ticks` more ticks, sampling metrics along the way.
    pub fn run(&mut self, max_ticks: u64) -> RunReport {
        let mut samples = Vec::new();
        for _ in 0..max_ticks {
            self.tick();
            if self.sample_due() {
                let stats = self.stats();
                debug!(
                    tick = stats.tick,
                    never_scanned = stats.area.never_scanned_pct,
                    connected = stats.graph.connected_to_base_pct,
                    "coverage sample"
                );
                samples.push(stats);
            }
        }
        let last = self.stats();
        info!(
            ticks = self.tick,
            never_scanned = last.area.never_scanned_pct,
            stale = last.area.stale_cells_pct,
            components = last.graph.connected_components,
            fallbacks = last.fallbacks,
            "run complete"
        );
        RunReport {
            ticks: self.tick,
            samples,
            last,
        }
    }

    pub fn stats(&self) -> CoverageStats {
        metrics::compute(self)
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        let uavs = self
            .agents
            .iter()
            .map(|a| {
                let state = a.state();
                UavView {
                    id: a.id(),
                    policy: a.policy_name().to_string(),
                    position: state.position,
                    heading: state.heading.value(),
                    speed: state.speed.value(),
                    destination: a.destination().position(),
                    hops: self.graph.hop_distance(a.id()),
                }
            })
            .collect();
        SimulationSnapshot {
            tick: self.tick,
            base: self.config.base,
            uavs,
            links: self.graph.links(),
            stats: self.stats(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn agents(&self) -> &[Uav] {
        &self.agents
    }

    pub fn scent(&self) -> &ScentGrid {
        &self.scent
    }

    pub fn graph(&self) -> &AgentGraph {
        &self.graph
    }

    pub fn visits(&self) -> &VisitLog {
        &self.visits
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn base(&self) -> Position {
        self.config.base
    }

    /// Decisions that fell back to the base so far.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }
}
