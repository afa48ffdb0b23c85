//! Search results.

use crate::graph::Graph;
use strata_core::VertexId;

/// A vertex sequence from a search's start towards its goal.
///
/// An empty path means the goal was unreachable. A non-empty path with
/// `reached_goal == false` is a partial path cut short by a step cap; it
/// ends at the vertex the search was expanding when the cap was hit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    vertices: Vec<VertexId>,
    reached_goal: bool,
}

impl Path {
    /// The unreachable result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild the path ending at `end` by walking parent links back to the
    /// search root, then reversing.
    pub(crate) fn reconstruct(graph: &Graph, end: VertexId, reached_goal: bool) -> Self {
        let mut vertices = Vec::new();
        let mut cursor = Some(end);
        while let Some(id) = cursor {
            vertices.push(id);
            // Parent links form a tree; the bound only matters for corrupted
            // annotations.
            if vertices.len() > graph.len() {
                break;
            }
            cursor = graph.vertex(id).parent();
        }
        vertices.reverse();
        Self {
            vertices,
            reached_goal,
        }
    }

    /// Whether the goal was unreachable.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices, including both ends.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges traversed.
    pub fn steps(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Whether the path ends at the requested goal.
    pub fn reached_goal(&self) -> bool {
        self.reached_goal
    }

    /// First vertex.
    pub fn first(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    /// Last vertex.
    pub fn last(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    /// Vertices in start-to-end order.
    pub fn as_slice(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Iterate vertices in start-to-end order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = VertexId> + '_ {
        self.vertices.iter().copied()
    }

    /// Consume into the vertex list.
    pub fn into_vec(self) -> Vec<VertexId> {
        self.vertices
    }

    /// Sum of the current edge weights along the path.
    ///
    /// Consecutive vertices that are not adjacent contribute their straight
    /// line distance.
    pub fn cost(&self, graph: &Graph) -> f32 {
        self.vertices
            .windows(2)
            .map(|w| {
                graph
                    .vertex(w[0])
                    .edges()
                    .iter()
                    .find(|e| e.to() == w[1])
                    .map_or_else(|| graph.diagonal_distance(w[0], w[1]), |e| e.weight())
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a VertexId;
    type IntoIter = std::slice::Iter<'a, VertexId>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
