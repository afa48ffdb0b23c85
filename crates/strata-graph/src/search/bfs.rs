use super::{prepare, StepBudget};
use crate::graph::Graph;
use crate::path::Path;
use std::collections::VecDeque;
use strata_core::VertexId;

/// Breadth-first search: the path with the fewest edges.
///
/// Vertices are marked visited when enqueued, so each vertex enters the
/// queue at most once and neighbours are explored in edge order.
pub fn bfs(graph: &mut Graph, start: VertexId, goal: VertexId, max_steps: Option<usize>) -> Path {
    if !prepare(graph, start, goal) {
        return Path::empty();
    }
    let mut budget = StepBudget::new(max_steps);
    let mut queue = VecDeque::new();
    graph.vertex_mut(start).visited = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Path::reconstruct(graph, current, true);
        }
        if !budget.try_spend() {
            return Path::reconstruct(graph, current, false);
        }
        let neighbours = graph.vertex(current).neighbours.clone();
        for nb in neighbours {
            let v = graph.vertex_mut(nb);
            if !v.visited {
                v.visited = true;
                v.parent = Some(current);
                queue.push_back(nb);
            }
        }
    }
    Path::empty()
}
