use super::{prepare, StepBudget};
use crate::graph::Graph;
use crate::heap::{MinHeap, PriorityQueue};
use crate::path::Path;
use strata_core::VertexId;

/// A* with the Euclidean distance to the goal as heuristic.
///
/// See [`astar_with`] to supply the open-set queue.
pub fn astar(graph: &mut Graph, start: VertexId, goal: VertexId, max_steps: Option<usize>) -> Path {
    let mut open = MinHeap::with_capacity(graph.len());
    astar_with(graph, start, goal, max_steps, &mut open)
}

/// A* over a caller-supplied open set.
///
/// `open` must extract the lowest priority first; it is cleared before the
/// search starts and may be reused across calls to avoid reallocating.
/// Keys are `f = g + h` where `h` is the straight-line 3D distance to the
/// goal, which never overestimates the remaining edge weight.
pub fn astar_with<Q>(
    graph: &mut Graph,
    start: VertexId,
    goal: VertexId,
    max_steps: Option<usize>,
    open: &mut Q,
) -> Path
where
    Q: PriorityQueue<VertexId> + ?Sized,
{
    open.clear();
    if !prepare(graph, start, goal) {
        return Path::empty();
    }
    let mut budget = StepBudget::new(max_steps);
    let target = graph.vertex(goal).position;
    {
        let s = graph.vertex_mut(start);
        s.g = 0.0;
        s.h = s.position.distance(target);
    }
    open.enqueue(start, graph.vertex(start).f());

    while let Some(current) = open.dequeue() {
        if graph.vertex(current).visited {
            continue;
        }
        graph.vertex_mut(current).visited = true;
        if current == goal {
            return Path::reconstruct(graph, current, true);
        }
        if !budget.try_spend() {
            return Path::reconstruct(graph, current, false);
        }
        let g = graph.vertex(current).g;
        let edges = graph.vertex(current).edges.clone();
        for edge in edges {
            let nb = graph.vertex_mut(edge.to);
            if nb.visited {
                continue;
            }
            let candidate = g + edge.weight;
            if candidate < nb.g {
                nb.g = candidate;
                nb.h = nb.position.distance(target);
                nb.parent = Some(current);
                open.enqueue(edge.to, nb.f());
            }
        }
    }
    Path::empty()
}
