//! Pluggable repulsive-force strategy: exact pairwise reference vs.
//! Barnes-Hut multipole approximation. Both apply the same ε-guard and must
//! agree in the limit θ → 0.

use egui::{Pos2, Vec2};

use crate::constants::{BOUNDS_MARGIN, DEFAULT_THETA, EPS_COINCIDENT};
use crate::error::LayoutResult;
use crate::graph::quadtree::{BoundingBox, QuadTree};
use crate::graph::types::Node;

/// Capability required of a repulsive-force implementation: given a mutable
/// node slice and the optimal distance `k`, accumulate repulsive
/// displacement into each node's `displacement` field.
pub trait RepulsiveStrategy {
    fn compute_repulsive(&mut self, nodes: &mut [Node], k: f32) -> LayoutResult<()>;
}

/// Exact O(|V|²) pairwise reference implementation. Pair enumeration is in
/// canonical ascending-index order for determinism.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl RepulsiveStrategy for BruteForce {
    fn compute_repulsive(&mut self, nodes: &mut [Node], k: f32) -> LayoutResult<()> {
        let n = nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let mut delta = nodes[i].position - nodes[j].position;
                let mut d = delta.length();
                if d < EPS_COINCIDENT {
                    d = EPS_COINCIDENT;
                    delta = Vec2::new(EPS_COINCIDENT, 0.0);
                }
                let force = delta * (k * k / (d * d));
                nodes[i].displacement += force;
                nodes[j].displacement -= force;
            }
        }
        Ok(())
    }
}

/// O(|V| log |V|) Barnes-Hut approximation, backed by a pool-allocated
/// quadtree that is reset and rebuilt on every invocation but keeps its
/// underlying storage across calls.
pub struct BarnesHut {
    theta: f32,
    tree: QuadTree,
}

impl BarnesHut {
    pub fn new(theta: f32) -> Self {
        Self::with_capacity(theta, None)
    }

    pub fn with_capacity(theta: f32, expected_nodes: Option<usize>) -> Self {
        let placeholder = BoundingBox::new(Pos2::ZERO, 1.0, 1.0);
        Self {
            theta,
            tree: QuadTree::new(placeholder, expected_nodes),
        }
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn set_theta(&mut self, theta: f32) {
        self.theta = theta;
    }
}

impl Default for BarnesHut {
    fn default() -> Self {
        Self::new(DEFAULT_THETA)
    }
}

impl RepulsiveStrategy for BarnesHut {
    fn compute_repulsive(&mut self, nodes: &mut [Node], k: f32) -> LayoutResult<()> {
        if nodes.is_empty() {
            return Ok(());
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for node in nodes.iter() {
            min_x = min_x.min(node.position.x);
            max_x = max_x.max(node.position.x);
            min_y = min_y.min(node.position.y);
            max_y = max_y.max(node.position.y);
        }
        min_x -= BOUNDS_MARGIN;
        min_y -= BOUNDS_MARGIN;
        max_x += BOUNDS_MARGIN;
        max_y += BOUNDS_MARGIN;

        let half_w = (max_x - min_x) / 2.0;
        let half_h = (max_y - min_y) / 2.0;
        let center = Pos2::new(min_x + half_w, min_y + half_h);
        let bounds = BoundingBox::new(center, half_w, half_h);

        self.tree.reset(bounds);
        for node in nodes.iter() {
            self.tree.insert(node.position, node.id)?;
        }

        for node in nodes.iter_mut() {
            let force = self.tree.compute_force(node.position, node.id, k, self.theta);
            node.displacement += force;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::new(0, Pos2::new(0.0, 0.0)),
            Node::new(1, Pos2::new(40.0, 0.0)),
            Node::new(2, Pos2::new(0.0, 40.0)),
            Node::new(3, Pos2::new(40.0, 40.0)),
            Node::new(4, Pos2::new(20.0, 20.0)),
        ]
    }

    #[test]
    fn brute_force_newtons_third_law() {
        let mut nodes = sample_nodes();
        BruteForce.compute_repulsive(&mut nodes, 10.0).unwrap();
        let sum: Vec2 = nodes.iter().map(|n| n.displacement).fold(Vec2::ZERO, |a, b| a + b);
        assert!(sum.length() < 1e-2, "net force should cancel: {sum:?}");
    }

    #[test]
    fn brute_force_and_barnes_hut_agree_at_theta_zero() {
        let mut brute = sample_nodes();
        let mut bh = sample_nodes();
        BruteForce.compute_repulsive(&mut brute, 10.0).unwrap();
        BarnesHut::new(0.0).compute_repulsive(&mut bh, 10.0).unwrap();
        for (a, b) in brute.iter().zip(bh.iter()) {
            let diff = (a.displacement - b.displacement).length();
            assert!(diff < 1e-2, "node {} diverged: {:?} vs {:?}", a.id, a.displacement, b.displacement);
        }
    }

    #[test]
    fn coincident_points_produce_finite_opposite_forces() {
        let mut nodes = vec![
            Node::new(0, Pos2::new(10.0, 10.0)),
            Node::new(1, Pos2::new(10.0, 10.0)),
        ];
        BruteForce.compute_repulsive(&mut nodes, 5.0).unwrap();
        assert!(nodes[0].displacement.x.is_finite());
        assert!(nodes[1].displacement.x.is_finite());
        assert!((nodes[0].displacement + nodes[1].displacement).length() < 1e-6);
    }

    #[test]
    fn barnes_hut_reuses_tree_storage_across_calls() {
        let mut strategy = BarnesHut::new(0.5);
        let mut nodes = sample_nodes();
        strategy.compute_repulsive(&mut nodes, 10.0).unwrap();
        let cells_after_first = strategy.tree.cell_count();
        strategy.compute_repulsive(&mut nodes, 10.0).unwrap();
        // Same topology reinserted should produce the same cell count, not
        // an ever-growing pool.
        assert_eq!(strategy.tree.cell_count(), cells_after_first);
    }
}
