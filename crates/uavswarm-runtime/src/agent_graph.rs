//! Communication graph backing the [`SwarmTopology`] trait, on petgraph.
//!
//! Nodes are the base station plus one node per UAV and never change after
//! construction. Edges are the reachability relation and are rebuilt from
//! scratch by [`AgentGraph::refresh`]; they are never authoritative across
//! a position change. Hop counts to the base are kept alongside and
//! refreshed one UAV at a time.

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{Bfs, EdgeRef};
use serde::Serialize;
use std::collections::VecDeque;
use uavswarm_core::topology::SwarmTopology;
use uavswarm_core::types::{HopCount, Position, UavId};
use uavswarm_core::wireless::ReachabilityModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GraphNode {
    Base,
    Uav(UavId),
}

/// An undirected reachability link and its length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Link {
    pub a: GraphNode,
    pub b: GraphNode,
    pub distance: f64,
}

pub struct AgentGraph {
    graph: UnGraph<GraphNode, f64>,
    base: NodeIndex,
    base_position: Position,
    /// Indexed by UAV id.
    uav_nodes: Vec<NodeIndex>,
    hops: Vec<HopCount>,
}

impl AgentGraph {
    /// Graph for UAVs `0..uav_count` with no links yet.
    pub fn new(base_position: Position, uav_count: usize) -> Self {
        let mut graph = UnGraph::with_capacity(uav_count + 1, uav_count * 2);
        let base = graph.add_node(GraphNode::Base);
        let uav_nodes = (0..uav_count)
            .map(|i| graph.add_node(GraphNode::Uav(UavId(i as u32))))
            .collect();
        Self {
            graph,
            base,
            base_position,
            uav_nodes,
            hops: vec![HopCount::Unreachable; uav_count],
        }
    }

    pub fn base_position(&self) -> Position {
        self.base_position
    }

    pub fn uav_count(&self) -> usize {
        self.uav_nodes.len()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node(&self, uav: UavId) -> Option<NodeIndex> {
        self.uav_nodes.get(uav.index()).copied()
    }

    /// Rebuild every link from current positions, indexed by UAV id.
    pub fn refresh(&mut self, positions: &[Position], model: &dyn ReachabilityModel) {
        self.graph.clear_edges();
        let n = positions.len().min(self.uav_nodes.len());
        for i in 0..n {
            let pi = positions[i];
            if model.can_communicate(&pi, &self.base_position) {
                let d = model.distance(&pi, &self.base_position);
                self.graph.add_edge(self.base, self.uav_nodes[i], d);
            }
            for j in (i + 1)..n {
                if model.can_communicate(&pi, &positions[j]) {
                    let d = model.distance(&pi, &positions[j]);
                    self.graph.add_edge(self.uav_nodes[i], self.uav_nodes[j], d);
                }
            }
        }
    }

    /// Recompute one UAV's hop count from its current links: one more than
    /// the best strictly better ranked neighbour, `Unreachable` if none.
    pub fn update_hop_distance(&mut self, uav: UavId) -> HopCount {
        let Some(node) = self.node(uav) else {
            return HopCount::Unreachable;
        };
        let own = self.rank(uav);
        let mut best = HopCount::Unreachable;
        for neighbour in self.graph.neighbors(node) {
            let via = match self.graph[neighbour] {
                GraphNode::Base => HopCount::BASE,
                GraphNode::Uav(other) if self.rank(other) < own => self.hop_distance(other),
                GraphNode::Uav(_) => continue,
            };
            best = best.min(via.next());
        }
        self.hops[uav.index()] = best;
        best
    }

    /// Sweep hop updates in id order until nothing changes.
    pub fn recompute_hops(&mut self) {
        // each sweep settles at least one more level of the tree
        for _ in 0..=self.uav_nodes.len() {
            let mut changed = false;
            for i in 0..self.uav_nodes.len() {
                let id = UavId(i as u32);
                let before = self.hops[i];
                if self.update_hop_distance(id) != before {
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    pub fn links(&self) -> Vec<Link> {
        self.graph
            .edge_references()
            .map(|e| Link {
                a: self.graph[e.source()],
                b: self.graph[e.target()],
                distance: *e.weight(),
            })
            .collect()
    }

    pub fn hop_counts(&self) -> &[HopCount] {
        &self.hops
    }

    pub fn connected_components(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Node count of the largest connected component, base included.
    pub fn giant_component_size(&self) -> usize {
        let mut sets = UnionFind::new(self.graph.node_count());
        for e in self.graph.edge_references() {
            sets.union(e.source().index(), e.target().index());
        }
        let mut sizes = vec![0usize; self.graph.node_count()];
        for label in sets.into_labeling() {
            sizes[label] += 1;
        }
        sizes.into_iter().max().unwrap_or(0)
    }

    /// UAVs with a path of any length to the base station.
    pub fn connected_to_base(&self) -> usize {
        let mut bfs = Bfs::new(&self.graph, self.base);
        let mut count = 0;
        while let Some(n) = bfs.next(&self.graph) {
            if matches!(self.graph[n], GraphNode::Uav(_)) {
                count += 1;
            }
        }
        count
    }
}

impl SwarmTopology for AgentGraph {
    fn neighbours(&self, uav: UavId, max_hops: u32) -> Vec<UavId> {
        let Some(start) = self.node(uav) else {
            return Vec::new();
        };
        let mut seen = vec![false; self.graph.node_count()];
        seen[start.index()] = true;
        let mut queue = VecDeque::from([(start, 0u32)]);
        let mut found = Vec::new();
        while let Some((node, depth)) = queue.pop_front() {
            if depth >= max_hops {
                continue;
            }
            for next in self.graph.neighbors(node) {
                if seen[next.index()] {
                    continue;
                }
                seen[next.index()] = true;
                if let GraphNode::Uav(id) = self.graph[next] {
                    found.push(id);
                }
                queue.push_back((next, depth + 1));
            }
        }
        found.sort();
        found
    }

    fn links_to_base(&self, uav: UavId) -> bool {
        self.node(uav)
            .map_or(false, |n| self.graph.find_edge(self.base, n).is_some())
    }

    fn hop_distance(&self, uav: UavId) -> HopCount {
        self.hops
            .get(uav.index())
            .copied()
            .unwrap_or(HopCount::Unreachable)
    }
}
