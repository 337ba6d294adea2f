//! Numerical constants shared by the layout engine, the repulsive strategies,
//! and the quadtree. Kept centralized so the ε-guard is applied identically
//! everywhere it's needed.

/// Minimum pairwise distance before the ε-guard kicks in. Below this, `d` is
/// clamped to this value and `delta` is forced to `(EPS_COINCIDENT, 0.0)`.
pub const EPS_COINCIDENT: f32 = 1e-4;

/// Below this displacement magnitude, a node's position is left untouched
/// for the step (avoids normalizing a near-zero vector).
pub const EPS_DISPLACEMENT: f32 = 1e-6;

/// Default temperature floor.
pub const T_MIN_DEFAULT: f32 = 1e-3;

/// Fixed margin added to each side of the Barnes-Hut bounding box so that
/// boundary points land strictly interior to the root cell.
pub const BOUNDS_MARGIN: f32 = 1.0;

/// Standard Barnes-Hut acceptance threshold.
pub const DEFAULT_THETA: f32 = 0.5;

/// Maximum quadtree recursion depth before coincident (or near-coincident)
/// points are bucketed into a shared leaf instead of triggering further
/// subdivision.
pub const MAX_QUADTREE_DEPTH: u32 = 48;
