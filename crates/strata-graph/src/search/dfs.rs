use super::{prepare, StepBudget};
use crate::graph::Graph;
use crate::path::Path;
use strata_core::VertexId;

/// Depth-first search. Reaches the goal whenever it is connected, but the
/// path is not guaranteed to be short.
///
/// Same protocol as [`bfs`](super::bfs) with a LIFO stack: visited at push
/// time, the most recently pushed neighbour is expanded next.
pub fn dfs(graph: &mut Graph, start: VertexId, goal: VertexId, max_steps: Option<usize>) -> Path {
    if !prepare(graph, start, goal) {
        return Path::empty();
    }
    let mut budget = StepBudget::new(max_steps);
    let mut stack = vec![start];
    graph.vertex_mut(start).visited = true;

    while let Some(current) = stack.pop() {
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
                stack.push(nb);
            }
        }
    }
    Path::empty()
}
