//! Graph invariant test helpers.
//!
//! Reused by the graph and search test modules to check the adjacency
//! contract after construction and after height mutation.

use crate::graph::Graph;

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)` with the
/// same edge weight.
pub fn assert_edges_symmetric(graph: &Graph) {
    for v in graph.vertices() {
        for e in v.edges() {
            let back = graph
                .vertex(e.to())
                .edges()
                .iter()
                .find(|b| b.to() == v.id());
            let Some(back) = back else {
                panic!("edge {} -> {} has no reverse edge", v.id(), e.to());
            };
            assert_eq!(
                e.weight(),
                back.weight(),
                "weight mismatch on {} <-> {}",
                v.id(),
                e.to()
            );
        }
    }
}

/// Assert that every edge weight equals the current distance between its
/// endpoints.
pub fn assert_weights_current(graph: &Graph) {
    for v in graph.vertices() {
        for e in v.edges() {
            let expected = v.position().distance(graph.vertex(e.to()).position());
            assert!(
                (e.weight() - expected).abs() < 1e-5,
                "stale weight on {} -> {}: {} vs {}",
                e.from(),
                e.to(),
                e.weight(),
                expected
            );
        }
    }
}

/// Assert that neighbours and edges are parallel lists with no self loops
/// and no duplicates, within the connectivity's degree bound.
pub fn assert_adjacency_well_formed(graph: &Graph) {
    let max = graph.connectivity().max_degree();
    for v in graph.vertices() {
        assert_eq!(v.neighbours().len(), v.edges().len());
        assert!(v.neighbours().len() <= max);
        for (nb, e) in v.neighbours().iter().zip(v.edges()) {
            assert_eq!(*nb, e.to());
            assert_eq!(e.from(), v.id());
            assert_ne!(*nb, v.id(), "self loop at {}", v.id());
        }
        for (i, a) in v.neighbours().iter().enumerate() {
            assert!(
                !v.neighbours()[i + 1..].contains(a),
                "duplicate neighbour {a} at {}",
                v.id()
            );
        }
    }
}

/// Assert that every neighbour lies on the board and within one cell on
/// each axis.
pub fn assert_neighbours_adjacent(graph: &Graph) {
    for v in graph.vertices() {
        let c = v.cell();
        for nb in v.neighbours() {
            let n = graph.vertex(*nb).cell();
            assert!(graph.within_board(n.x, n.z));
            assert!((n.x - c.x).abs() <= 1 && (n.z - c.z).abs() <= 1);
        }
    }
}

/// Assert that vertex ids follow row-major cell order.
pub fn assert_row_major(graph: &Graph) {
    assert_eq!(graph.len(), graph.cell_count());
    for (i, v) in graph.vertices().iter().enumerate() {
        assert_eq!(v.id().index(), i);
        let c = v.cell();
        assert_eq!(c.x as usize + c.z as usize * graph.width() as usize, i);
    }
}

/// Run every compliance check.
pub fn run_full_compliance(graph: &Graph) {
    assert_row_major(graph);
    assert_adjacency_well_formed(graph);
    assert_neighbours_adjacent(graph);
    assert_edges_symmetric(graph);
    assert_weights_current(graph);
}
