//! Graph searches over the vertex annotation protocol.
//!
//! Every search starts with [`Graph::initialize_vertices`], then records
//! `visited`, `parent`, and (for the weighted searches) `g`/`h` on the
//! vertices it touches. The annotations stay on the graph afterwards and can
//! be inspected until the next search.
//!
//! All searches take an optional step cap counting vertex expansions. When
//! the cap is hit before the goal is popped, the result is the partial path
//! to the vertex being expanded. An unreachable goal, or an id that does not
//! belong to the graph, yields an empty [`Path`].

mod astar;
mod bfs;
mod dfs;
mod dijkstra;

pub use astar::{astar, astar_with};
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::dijkstra;

use crate::graph::Graph;
use crate::path::Path;
use serde::{Deserialize, Serialize};
use strata_core::VertexId;

/// One of the four searches, selectable by value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathAlgorithm {
    /// Breadth-first; fewest edges.
    Bfs,
    /// Depth-first; any path.
    Dfs,
    /// Lowest accumulated edge weight.
    Dijkstra,
    /// Dijkstra guided by the Euclidean distance to the goal.
    #[default]
    AStar,
}

impl PathAlgorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [PathAlgorithm; 4] = [
        PathAlgorithm::Bfs,
        PathAlgorithm::Dfs,
        PathAlgorithm::Dijkstra,
        PathAlgorithm::AStar,
    ];

    /// Run this search.
    pub fn find(
        self,
        graph: &mut Graph,
        start: VertexId,
        goal: VertexId,
        max_steps: Option<usize>,
    ) -> Path {
        match self {
            PathAlgorithm::Bfs => bfs(graph, start, goal, max_steps),
            PathAlgorithm::Dfs => dfs(graph, start, goal, max_steps),
            PathAlgorithm::Dijkstra => dijkstra(graph, start, goal, max_steps),
            PathAlgorithm::AStar => astar(graph, start, goal, max_steps),
        }
    }

    /// Whether the result minimises total edge weight.
    pub fn is_weighted(self) -> bool {
        matches!(self, PathAlgorithm::Dijkstra | PathAlgorithm::AStar)
    }
}

/// Reset annotations and check both ends belong to the graph.
fn prepare(graph: &mut Graph, start: VertexId, goal: VertexId) -> bool {
    graph.initialize_vertices();
    graph.get(start).is_some() && graph.get(goal).is_some()
}

/// Expansion counter against an optional cap.
struct StepBudget {
    taken: usize,
    cap: Option<usize>,
}

impl StepBudget {
    fn new(cap: Option<usize>) -> Self {
        Self { taken: 0, cap }
    }

    /// Count one expansion; `false` once the cap is already spent.
    fn try_spend(&mut self) -> bool {
        match self.cap {
            Some(cap) if self.taken >= cap => false,
            _ => {
                self.taken += 1;
                true
            }
        }
    }
}
