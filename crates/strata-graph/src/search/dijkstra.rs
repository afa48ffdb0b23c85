use super::{prepare, StepBudget};
use crate::graph::Graph;
use crate::heap::{MinHeap, PriorityQueue};
use crate::path::Path;
use strata_core::VertexId;

/// Lowest-cost path by accumulated edge weight.
///
/// A vertex is pushed every time its `g` strictly improves; stale queue
/// entries are skipped at pop time through the `visited` flag.
pub fn dijkstra(
    graph: &mut Graph,
    start: VertexId,
    goal: VertexId,
    max_steps: Option<usize>,
) -> Path {
    if !prepare(graph, start, goal) {
        return Path::empty();
    }
    let mut budget = StepBudget::new(max_steps);
    let mut open = MinHeap::with_capacity(graph.len());
    graph.vertex_mut(start).g = 0.0;
    open.enqueue(start, 0.0);

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
                nb.parent = Some(current);
                open.enqueue(edge.to, candidate);
            }
        }
    }
    Path::empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::Connectivity;

    #[test]
    fn flat_8x8_corner_to_corner_is_pure_diagonal() {
        let mut g = Graph::new(8, 8, Connectivity::Eight).unwrap();
        g.generate();
        let start = g.id_at(0, 0).unwrap();
        let goal = g.id_at(7, 7).unwrap();
        let path = dijkstra(&mut g, start, goal, None);
        assert_eq!(path.len(), 8);
        assert_eq!(path.steps(), 7);
        for (i, id) in path.iter().enumerate() {
            let c = g.vertex(id).cell();
            assert_eq!((c.x, c.z), (i as i32, i as i32));
        }
        let expected = 7.0 * std::f32::consts::SQRT_2;
        assert!((path.cost(&g) - expected).abs() < 1e-4);
        assert!((g.vertex(goal).g() - expected).abs() < 1e-4);
    }

    #[test]
    fn routes_around_a_ridge() {
        // A tall wall across x = 2 with a gap at z = 4.
        let (w, h) = (5u32, 5u32);
        let mut heights = vec![0.0f32; (w * h) as usize];
        for z in 0..4 {
            heights[2 + z * w as usize] = 50.0;
        }
        let mut g = Graph::new(w, h, Connectivity::Eight).unwrap();
        g.set_heights(&heights).unwrap();
        let start = g.id_at(0, 0).unwrap();
        let goal = g.id_at(4, 0).unwrap();
        let path = dijkstra(&mut g, start, goal, None);
        assert!(path.reached_goal());
        assert!(path.iter().all(|id| g.vertex(id).height() == 0.0));
        assert!(path.iter().any(|id| g.vertex(id).cell() == strata_core::GridPos::new(2, 4)));
    }

    #[test]
    fn capped_search_returns_partial_from_start() {
        let mut g = Graph::new(8, 8, Connectivity::Eight).unwrap();
        g.generate();
        let start = g.id_at(0, 0).unwrap();
        let goal = g.id_at(7, 7).unwrap();
        let path = dijkstra(&mut g, start, goal, Some(5));
        assert!(!path.is_empty());
        assert!(!path.reached_goal());
        assert_eq!(path.first(), Some(start));
        assert_ne!(path.last(), Some(goal));
    }
}
