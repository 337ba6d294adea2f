//! Pool-allocated Barnes-Hut quadtree.
//!
//! Cells live in a single flat `Vec`, addressed by index rather than by
//! pointer. `reset` clears the pool back to a single root cell and reuses
//! its storage across iterations — subdivision is the only operation that
//! grows the pool. No persistent pointers into the pool may be held across
//! a `reset`; indices taken before a subdivision that triggers a `Vec`
//! reallocation are invalidated the same way any `Vec` index into a grown
//! buffer would be (the index itself stays valid, a reference would not).

use egui::{Pos2, Vec2};

use crate::constants::{EPS_COINCIDENT, MAX_QUADTREE_DEPTH};
use crate::error::{LayoutError, LayoutResult};

/// Axis-aligned rectangle described by center and half-extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub center: Pos2,
    pub half_w: f32,
    pub half_h: f32,
}

impl BoundingBox {
    pub fn new(center: Pos2, half_w: f32, half_h: f32) -> Self {
        Self {
            center,
            half_w,
            half_h,
        }
    }

    /// Closed-interval containment on both axes.
    pub fn contains(&self, p: Pos2) -> bool {
        p.x >= self.center.x - self.half_w
            && p.x <= self.center.x + self.half_w
            && p.y >= self.center.y - self.half_h
            && p.y <= self.center.y + self.half_h
    }

    /// 0=NE, 1=NW, 2=SW, 3=SE, selected by (x >= cx, y >= cy).
    pub fn quadrant(&self, p: Pos2) -> usize {
        let east = p.x >= self.center.x;
        let north = p.y >= self.center.y;
        match (east, north) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        }
    }

    /// Bounds of the given quadrant, halved about a center offset by
    /// (±half_w/2, ±half_h/2).
    pub fn child(&self, quadrant: usize) -> BoundingBox {
        let hw = self.half_w / 2.0;
        let hh = self.half_h / 2.0;
        let offset = match quadrant {
            0 => Vec2::new(hw, hh),
            1 => Vec2::new(-hw, hh),
            2 => Vec2::new(-hw, -hh),
            3 => Vec2::new(hw, -hh),
            _ => unreachable!("quadrant index must be in 0..4, got {quadrant}"),
        };
        BoundingBox::new(self.center + offset, hw, hh)
    }

    /// Longest side — the "s" in the Barnes-Hut s/d acceptance test.
    pub fn size(&self) -> f32 {
        2.0 * self.half_w.max(self.half_h)
    }
}

/// What a leaf cell is currently holding.
#[derive(Debug, Clone)]
enum LeafPayload {
    Empty,
    Single(Pos2, u32),
    /// Reached only past `MAX_QUADTREE_DEPTH`: points that couldn't be
    /// separated by further subdivision share this cell instead.
    Bucket(Vec<(Pos2, u32)>),
}

#[derive(Debug, Clone)]
struct Cell {
    bounds: BoundingBox,
    center_of_mass: Pos2,
    total_mass: f32,
    payload: LeafPayload,
    children: Option<[usize; 4]>,
    depth: u32,
}

impl Cell {
    fn empty(bounds: BoundingBox, depth: u32) -> Self {
        Self {
            center_of_mass: bounds.center,
            total_mass: 0.0,
            payload: LeafPayload::Empty,
            children: None,
            bounds,
            depth,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Point-region quadtree with unit-capacity leaves, arena-backed so that
/// per-iteration rebuilds don't churn the allocator.
pub struct QuadTree {
    cells: Vec<Cell>,
}

impl QuadTree {
    /// Allocate storage (optionally pre-sized to `expected` cells) and push
    /// a root cell covering `bounds`.
    pub fn new(bounds: BoundingBox, expected: Option<usize>) -> Self {
        let mut cells = Vec::with_capacity(expected.unwrap_or(64));
        cells.push(Cell::empty(bounds, 0));
        Self { cells }
    }

    /// Clear the pool to a single fresh root cell, reusing its storage.
    pub fn reset(&mut self, bounds: BoundingBox) {
        self.cells.clear();
        self.cells.push(Cell::empty(bounds, 0));
    }

    pub fn bounds(&self) -> BoundingBox {
        self.cells[0].bounds
    }

    pub fn root_total_mass(&self) -> f32 {
        self.cells[0].total_mass
    }

    pub fn root_center_of_mass(&self) -> Pos2 {
        self.cells[0].center_of_mass
    }

    /// Number of cells currently live in the pool.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Insert `(position, node_id)`. Precondition: `bounds.contains(pos)`.
    pub fn insert(&mut self, position: Pos2, node_id: u32) -> LayoutResult<()> {
        if !self.cells[0].bounds.contains(position) {
            return Err(LayoutError::PointOutsideBounds(position));
        }
        self.insert_at(0, position, node_id, 0);
        Ok(())
    }

    fn insert_at(&mut self, idx: usize, pos: Pos2, id: u32, depth: u32) {
        let n = self.cells[idx].total_mass;
        let com = self.cells[idx].center_of_mass;
        let new_com = (com.to_vec2() * n + pos.to_vec2()) / (n + 1.0);
        self.cells[idx].center_of_mass = Pos2::new(new_com.x, new_com.y);
        self.cells[idx].total_mass = n + 1.0;

        if let Some(children) = self.cells[idx].children {
            let bounds = self.cells[idx].bounds;
            let target = self.route_child(bounds, &children, pos);
            self.insert_at(children[target], pos, id, depth + 1);
            return;
        }

        match std::mem::replace(&mut self.cells[idx].payload, LeafPayload::Empty) {
            LeafPayload::Empty => {
                self.cells[idx].payload = LeafPayload::Single(pos, id);
            }
            LeafPayload::Single(existing_pos, existing_id) => {
                if depth >= MAX_QUADTREE_DEPTH {
                    tracing::debug!(depth, existing_id, id, "max quadtree depth reached, bucketing");
                    self.cells[idx].payload =
                        LeafPayload::Bucket(vec![(existing_pos, existing_id), (pos, id)]);
                    return;
                }
                self.subdivide(idx);
                let bounds = self.cells[idx].bounds;
                let children = self.cells[idx].children.unwrap();
                let q1 = self.route_child(bounds, &children, existing_pos);
                self.insert_at(children[q1], existing_pos, existing_id, depth + 1);
                let q2 = self.route_child(bounds, &children, pos);
                self.insert_at(children[q2], pos, id, depth + 1);
            }
            LeafPayload::Bucket(mut points) => {
                points.push((pos, id));
                self.cells[idx].payload = LeafPayload::Bucket(points);
            }
        }
    }

    fn subdivide(&mut self, idx: usize) {
        let bounds = self.cells[idx].bounds;
        let depth = self.cells[idx].depth;
        let mut child_indices = [0usize; 4];
        for (q, slot) in child_indices.iter_mut().enumerate() {
            let child_bounds = bounds.child(q);
            *slot = self.cells.len();
            self.cells.push(Cell::empty(child_bounds, depth + 1));
        }
        self.cells[idx].children = Some(child_indices);
        self.cells[idx].payload = LeafPayload::Empty;
    }

    /// Route `pos` to the quadrant its center falls in; if rounding put it
    /// just outside that child's bounds, scan the remaining siblings.
    fn route_child(&self, bounds: BoundingBox, children: &[usize; 4], pos: Pos2) -> usize {
        let primary = bounds.quadrant(pos);
        if self.cells[children[primary]].bounds.contains(pos) {
            return primary;
        }
        for (q, &child_idx) in children.iter().enumerate() {
            if q != primary && self.cells[child_idx].bounds.contains(pos) {
                return q;
            }
        }
        primary
    }

    /// Net repulsive force on a query point with id `query_id`, walking the
    /// tree per the s/d < θ acceptance criterion.
    pub fn compute_force(&self, query_pos: Pos2, query_id: u32, k: f32, theta: f32) -> Vec2 {
        self.force_at(0, query_pos, query_id, k, theta)
    }

    fn force_at(&self, idx: usize, query_pos: Pos2, query_id: u32, k: f32, theta: f32) -> Vec2 {
        let cell = &self.cells[idx];
        if cell.total_mass < 0.5 {
            return Vec2::ZERO;
        }

        let mut delta = query_pos - cell.center_of_mass;
        let mut d = delta.length();
        if d < EPS_COINCIDENT {
            d = EPS_COINCIDENT;
            delta = Vec2::new(EPS_COINCIDENT, 0.0);
        }

        if cell.is_leaf() {
            match &cell.payload {
                LeafPayload::Single(_, id) if *id == query_id => return Vec2::ZERO,
                LeafPayload::Bucket(points) if points.len() == 1 && points[0].1 == query_id => {
                    return Vec2::ZERO;
                }
                _ => {}
            }
        }

        let accept = cell.is_leaf() || (cell.bounds.size() / d) < theta;
        if accept {
            let mut mass = cell.total_mass;
            if let LeafPayload::Bucket(points) = &cell.payload {
                if points.iter().any(|(_, id)| *id == query_id) {
                    mass -= 1.0;
                }
            }
            if mass <= 0.0 {
                return Vec2::ZERO;
            }
            let magnitude = mass * k * k / (d * d);
            return (delta / d) * magnitude;
        }

        let mut total = Vec2::ZERO;
        for &child_idx in cell.children.as_ref().unwrap() {
            total += self.force_at(child_idx, query_pos, query_id, k, theta);
        }
        total
    }
}
