//! Fruchterman-Reingold layout engine.
//!
//! Owns the simulation state (frame size, scaling constant, optimal
//! distance, temperature and cooling schedule) and the swappable repulsive
//! strategy. `initialize` seeds random positions; `step` runs one FR
//! iteration: reset displacements, delegate repulsion to the strategy,
//! accumulate attraction along edges, then apply and clamp displacements
//! before cooling. The ordering in `step` is load-bearing: reusing a
//! displacement before it has accumulated every contributing force would
//! bias later terms toward whatever ran first.

use egui::{Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{EPS_COINCIDENT, EPS_DISPLACEMENT, T_MIN_DEFAULT};
use crate::error::{LayoutError, LayoutResult};
use crate::graph::repulsive::{BruteForce, RepulsiveStrategy};
use crate::graph::types::Graph;

/// Force-directed simulation state and cooling schedule.
pub struct LayoutEngine {
    w: f32,
    h: f32,
    c: f32,
    k: f32,
    temperature: f32,
    cooling_rate: f32,
    t_min: f32,
    last_kinetic_energy: f32,
    strategy: Box<dyn RepulsiveStrategy>,
    convergence_history: Vec<f32>,
}

impl LayoutEngine {
    /// Frame extents must be positive and finite; `c` (scaling constant)
    /// must be positive and finite. Default repulsive strategy is
    /// `BruteForce`.
    pub fn new(w: f32, h: f32, c: f32) -> LayoutResult<Self> {
        if !(w.is_finite() && w > 0.0) || !(h.is_finite() && h > 0.0) {
            return Err(LayoutError::InvalidFrameExtents {
                w: w as f64,
                h: h as f64,
            });
        }
        if !(c.is_finite() && c > 0.0) {
            return Err(LayoutError::InvalidScalingConstant { c: c as f64 });
        }
        Ok(Self {
            w,
            h,
            c,
            k: 1.0,
            temperature: 10.0,
            cooling_rate: 0.95,
            t_min: T_MIN_DEFAULT,
            last_kinetic_energy: 0.0,
            strategy: Box::new(BruteForce),
            convergence_history: Vec::new(),
        })
    }

    /// Derives `k = C * sqrt(W*H / |V|)`, seeds a deterministic PRNG (a
    /// nondeterministic seed is drawn from `rand::thread_rng()` if `seed` is
    /// `None`), and samples each node's position uniformly in `[0,W]x[0,H]`
    /// following the graph's node sequence.
    pub fn initialize(&mut self, graph: &mut Graph, seed: Option<u64>) -> LayoutResult<()> {
        let n = graph.vertex_count();
        if n == 0 {
            return Err(LayoutError::EmptyGraph);
        }
        self.k = self.c * (self.w * self.h / n as f32).sqrt();

        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        for node in graph.nodes_mut() {
            let x = rng.gen_range(0.0..self.w);
            let y = rng.gen_range(0.0..self.h);
            node.position = Pos2::new(x, y);
            node.displacement = Vec2::ZERO;
        }

        self.last_kinetic_energy = 0.0;
        self.convergence_history.clear();
        Ok(())
    }

    /// One FR iteration. On failure (a non-finite intermediate), the
    /// graph's node positions are left exactly as they were before the
    /// call: new positions are buffered and only committed once every one
    /// of them checks out finite.
    pub fn step(&mut self, graph: &mut Graph) -> LayoutResult<()> {
        let n = graph.vertex_count();
        if n == 0 {
            return Err(LayoutError::EmptyGraph);
        }

        for node in graph.nodes_mut() {
            node.displacement = Vec2::ZERO;
        }

        self.strategy.compute_repulsive(graph.nodes_mut(), self.k)?;

        let edge_pairs: Vec<(u32, u32)> = graph.edges().map(|e| (e.source(), e.target())).collect();
        for (u, v) in edge_pairs {
            let pu = graph.node_by_id(u)?.position;
            let pv = graph.node_by_id(v)?.position;
            let delta = pu - pv;
            let d = delta.length();
            if d < EPS_COINCIDENT {
                continue;
            }
            let magnitude = (d * d) / self.k;
            let force = (delta / d) * magnitude;
            graph.node_by_id_mut(u)?.displacement -= force;
            graph.node_by_id_mut(v)?.displacement += force;
        }

        let mut buffered_positions = Vec::with_capacity(n);
        let mut energy = 0.0f32;
        for node in graph.nodes() {
            let l = node.displacement.length();
            let mut pos = node.position;
            if l > EPS_DISPLACEMENT {
                let clamped = l.min(self.temperature);
                pos += (node.displacement / l) * clamped;
                energy += clamped;
            }
            pos.x = pos.x.clamp(0.0, self.w);
            pos.y = pos.y.clamp(0.0, self.h);
            if !pos.x.is_finite() || !pos.y.is_finite() {
                return Err(LayoutError::NonFiniteCoordinate);
            }
            buffered_positions.push(pos);
        }

        for (node, pos) in graph.nodes_mut().iter_mut().zip(buffered_positions) {
            node.position = pos;
        }

        self.last_kinetic_energy = energy;
        self.convergence_history.push(energy);
        self.temperature = (self.temperature * self.cooling_rate).max(self.t_min);
        Ok(())
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.last_kinetic_energy
    }

    pub fn optimal_distance(&self) -> f32 {
        self.k
    }

    pub fn set_temperature(&mut self, t: f32) {
        self.temperature = t;
    }

    pub fn set_cooling_rate(&mut self, alpha: f32) {
        self.cooling_rate = alpha;
    }

    pub fn set_t_min(&mut self, t_min: f32) {
        self.t_min = t_min;
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn RepulsiveStrategy>) {
        tracing::debug!("repulsive strategy swapped");
        self.strategy = strategy;
    }

    /// Per-step convergence series (one nonnegative float per completed
    /// step, in step order) — the read-only view produced for the exporter.
    pub fn convergence_history(&self) -> &[f32] {
        &self.convergence_history
    }
}
