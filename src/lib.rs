//! Force-directed graph layout: Fruchterman-Reingold attraction/cooling with
//! a pluggable repulsive-force strategy (exact pairwise or Barnes-Hut
//! quadtree approximation).

pub mod config;
pub mod constants;
pub mod error;
pub mod graph;

pub use config::LayoutConfig;
pub use error::{LayoutError, LayoutResult};
pub use graph::{BarnesHut, BoundingBox, BruteForce, Edge, Graph, LayoutEngine, Node, QuadTree, RepulsiveStrategy};
