//! Error types surfaced at the core's boundary.
//!
//! Domain failures (bad construction parameters) and precondition
//! violations (caller bugs: unknown ids, out-of-bounds insertions) are
//! distinct kinds. The propagation policy is to fail fast, never swallow,
//! and leave the engine/graph unmodified on error.

use egui::Pos2;
use thiserror::Error;

/// Result alias used throughout the core.
pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// `erdos_renyi`'s edge probability was outside `[0, 1]`.
    #[error("edge probability must lie in [0, 1], got {p}")]
    InvalidProbability { p: f64 },

    /// `LayoutEngine::new` was given a non-positive or non-finite frame
    /// extent.
    #[error("frame extents must be positive and finite, got w={w}, h={h}")]
    InvalidFrameExtents { w: f64, h: f64 },

    /// `LayoutEngine::new` was given a non-positive scaling constant.
    #[error("scaling constant C must be positive and finite, got {c}")]
    InvalidScalingConstant { c: f64 },

    /// `initialize`/`step` was called against a graph with no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// `Edge::new`/`Graph::add_edge` was asked to connect a node to itself.
    #[error("self-loop edges are not supported (node {0})")]
    SelfLoop(u32),

    /// `Graph::add_node` was called with an id already present.
    #[error("node id {0} already exists in this graph")]
    DuplicateNodeId(u32),

    /// A node id was referenced that doesn't exist in the graph.
    #[error("unknown node id {0}")]
    UnknownNodeId(u32),

    /// `QuadTree::insert` was asked to place a point outside the root cell's
    /// bounds.
    #[error("point {0:?} lies outside the quadtree's root bounds")]
    PointOutsideBounds(Pos2),

    /// A step produced a non-finite coordinate; the graph's positions are
    /// left at their pre-step values (the step buffers new positions and
    /// only commits them once every one of them is checked finite).
    #[error("layout step produced a non-finite coordinate")]
    NonFiniteCoordinate,
}
