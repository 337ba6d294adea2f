//! Graph data types: nodes, canonical edges, and the owning `Graph`.

use std::collections::{HashMap, HashSet};

use egui::{Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LayoutError, LayoutResult};

/// A node's identity plus the mutable state the layout engine owns:
/// current position and the per-step displacement accumulator. Mass is
/// implicitly 1.0 for every node.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub id: u32,
    pub position: Pos2,
    pub displacement: Vec2,
}

impl Node {
    pub fn new(id: u32, position: Pos2) -> Self {
        Self {
            id,
            position,
            displacement: Vec2::ZERO,
        }
    }
}

/// An unordered pair of distinct node ids, always stored in canonical form
/// `(min(u, v), max(u, v))` so equality and hashing agree regardless of
/// insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: u32,
    target: u32,
}

impl Edge {
    pub fn new(u: u32, v: u32) -> LayoutResult<Self> {
        if u == v {
            return Err(LayoutError::SelfLoop(u));
        }
        let (source, target) = if u < v { (u, v) } else { (v, u) };
        Ok(Self { source, target })
    }

    pub fn source(&self) -> u32 {
        self.source
    }

    pub fn target(&self) -> u32 {
        self.target
    }
}

/// Node sequence plus canonical edge set plus a symmetric adjacency index.
/// Topology is frozen once built: the layout core only ever mutates node
/// positions and displacements.
pub struct Graph {
    nodes: Vec<Node>,
    id_to_index: HashMap<u32, usize>,
    edges: HashSet<Edge>,
    adjacency: HashMap<u32, Vec<u32>>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            id_to_index: HashMap::new(),
            edges: HashSet::new(),
            adjacency: HashMap::new(),
        }
    }

    /// Appends a node at `position`. Ids must be unique within the graph.
    pub fn add_node(&mut self, id: u32, position: Pos2) -> LayoutResult<()> {
        if self.id_to_index.contains_key(&id) {
            return Err(LayoutError::DuplicateNodeId(id));
        }
        let idx = self.nodes.len();
        self.nodes.push(Node::new(id, position));
        self.id_to_index.insert(id, idx);
        self.adjacency.entry(id).or_default();
        Ok(())
    }

    /// Adds the canonical edge between `u` and `v`. A duplicate insertion is
    /// a no-op (multigraphs are not supported).
    pub fn add_edge(&mut self, u: u32, v: u32) -> LayoutResult<()> {
        let edge = Edge::new(u, v)?;
        if !self.id_to_index.contains_key(&u) {
            return Err(LayoutError::UnknownNodeId(u));
        }
        if !self.id_to_index.contains_key(&v) {
            return Err(LayoutError::UnknownNodeId(v));
        }
        if self.edges.insert(edge) {
            self.adjacency.get_mut(&u).unwrap().push(v);
            self.adjacency.get_mut(&v).unwrap().push(u);
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in stable insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Canonical edges; iteration order follows the backing set and is not
    /// guaranteed. The attractive-force update applied per edge is
    /// commutative, so this is fine.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn neighbors(&self, id: u32) -> &[u32] {
        self.adjacency
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn node_index_of(&self, id: u32) -> LayoutResult<usize> {
        self.id_to_index
            .get(&id)
            .copied()
            .ok_or(LayoutError::UnknownNodeId(id))
    }

    pub fn node_by_id(&self, id: u32) -> LayoutResult<&Node> {
        let idx = self.node_index_of(id)?;
        Ok(&self.nodes[idx])
    }

    pub fn node_by_id_mut(&mut self, id: u32) -> LayoutResult<&mut Node> {
        let idx = self.node_index_of(id)?;
        Ok(&mut self.nodes[idx])
    }

    /// Read-only view produced for the CSV exporter: `(id, x, y)` per node.
    pub fn node_positions(&self) -> Vec<(u32, f32, f32)> {
        self.nodes
            .iter()
            .map(|n| (n.id, n.position.x, n.position.y))
            .collect()
    }

    /// Read-only view produced for the CSV exporter: `(source, target)`
    /// with `source <= target`.
    pub fn canonical_edges(&self) -> Vec<(u32, u32)> {
        self.edges.iter().map(|e| (e.source(), e.target())).collect()
    }

    /// Deterministic Erdős–Rényi G(n, p) factory. Ids are `0..n`; for each
    /// unordered pair `(i, j)` with `i < j` in ascending order, the edge is
    /// added with probability `p` via a seeded Bernoulli draw.
    pub fn erdos_renyi(n: u32, p: f64, seed: u64) -> LayoutResult<Graph> {
        if !(0.0..=1.0).contains(&p) {
            return Err(LayoutError::InvalidProbability { p });
        }
        let mut graph = Graph::new();
        for id in 0..n {
            graph.add_node(id, Pos2::ZERO)?;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen::<f64>() < p {
                    graph.add_edge(i, j)?;
                }
            }
        }
        Ok(graph)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
