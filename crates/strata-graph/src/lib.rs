//! Grid graph, priority queues, and pathfinding for Strata terrains.
//!
//! The [`Graph`] is a row-major arena of [`Vertex`] values joined by
//! weighted [`Edge`]s to their 8 (or 4, see [`Connectivity`]) grid
//! neighbours. Agents mutate vertex heights through the graph, which keeps
//! edge weights in step with positions.
//!
//! # Searches
//!
//! - [`bfs`]: fewest edges
//! - [`dfs`]: any path
//! - [`dijkstra`]: lowest accumulated edge weight
//! - [`astar`] / [`astar_with`]: Dijkstra guided by Euclidean distance
//!
//! All four return a [`Path`]; an empty path means the goal is unreachable.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod graph;
pub mod heap;
pub mod path;
pub mod search;
pub mod vertex;

#[cfg(test)]
pub(crate) mod compliance;

pub use connectivity::Connectivity;
pub use graph::Graph;
pub use heap::{Heap, HeapOrder, MaxFirst, MaxHeap, MinFirst, MinHeap, PriorityQueue};
pub use path::Path;
pub use search::{astar, astar_with, bfs, dfs, dijkstra, PathAlgorithm};
pub use vertex::{Edge, Vertex};
