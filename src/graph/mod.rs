//! Graph data structures and layout algorithms.

pub mod layout;
pub mod quadtree;
pub mod repulsive;
pub mod types;

pub use layout::LayoutEngine;
pub use quadtree::{BoundingBox, QuadTree};
pub use repulsive::{BarnesHut, BruteForce, RepulsiveStrategy};
pub use types::{Edge, Graph, Node};
