//! The terrain graph: a fixed-size grid of vertices in a flat arena.
//!
//! Vertices live in a `Vec` indexed row-major (`x + z * width`); adjacency
//! is stored as [`VertexId`] lists on each vertex, so the structure has no
//! reference cycles and agents mutate heights through the graph's
//! accessors only.

use crate::connectivity::Connectivity;
use crate::vertex::{Edge, Vertex};
use strata_core::{GraphError, GridPos, Position, VertexId};

/// A weighted grid graph over a heightmap.
///
/// Built in two steps: [`Graph::new`] fixes the dimensions and reserves the
/// arena, then [`generate`](Self::generate), [`set_heights`](Self::set_heights)
/// or [`set_positions`](Self::set_positions) populates vertices and derives
/// edges. Before population every lookup returns `None`.
#[derive(Clone, Debug)]
pub struct Graph {
    width: u32,
    height: u32,
    connectivity: Connectivity,
    vertices: Vec<Vertex>,
}

impl Graph {
    /// Largest accepted dimension: grid coordinates are `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Largest accepted `width * height`: vertex ids are `u32`.
    pub const MAX_CELLS: u64 = u32::MAX as u64;

    /// Create an unpopulated graph of `width * height` cells.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] if either dimension is 0,
    /// [`GraphError::DimensionTooLarge`] if either exceeds [`Self::MAX_DIM`],
    /// [`GraphError::TooManyCells`] if the product exceeds
    /// [`Self::MAX_CELLS`], and [`GraphError::AllocationFailed`] if the
    /// arena cannot be reserved.
    pub fn new(width: u32, height: u32, connectivity: Connectivity) -> Result<Self, GraphError> {
        if width == 0 || height == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if width > Self::MAX_DIM {
            return Err(GraphError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(GraphError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        let cells = u64::from(width) * u64::from(height);
        if cells > Self::MAX_CELLS {
            return Err(GraphError::TooManyCells {
                cells,
                max: Self::MAX_CELLS,
            });
        }
        let cells = width as usize * height as usize;
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(cells)
            .map_err(|_| GraphError::AllocationFailed { cells })?;
        Ok(Self {
            width,
            height,
            connectivity,
            vertices,
        })
    }

    /// Number of cells along `x`.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells along `z`.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Neighbourhood rule used for edges.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Number of populated vertices (0 before population).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has not been populated yet.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of cells the populated graph holds.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// All vertices in row-major order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    // ── Construction ────────────────────────────────────────────

    /// Populate a flat, zero-height grid and derive adjacency.
    pub fn generate(&mut self) {
        self.populate(|x, z, _| Position::new(x as f32, 0.0, z as f32));
    }

    /// Populate from row-major per-cell heights and derive adjacency.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::LengthMismatch`] or
    /// [`GraphError::NonFiniteHeight`]; the graph is untouched on error.
    pub fn set_heights(&mut self, heights: &[f32]) -> Result<(), GraphError> {
        self.check_len(heights.len())?;
        if let Some(index) = heights.iter().position(|h| !h.is_finite()) {
            return Err(GraphError::NonFiniteHeight { index });
        }
        self.populate(|x, z, i| Position::new(x as f32, heights[i], z as f32));
        Ok(())
    }

    /// Populate from row-major caller-supplied positions and derive adjacency.
    ///
    /// Vertex identity still comes from the cell index; the supplied `x`/`z`
    /// only affect distances.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::LengthMismatch`] or
    /// [`GraphError::NonFiniteHeight`]; the graph is untouched on error.
    pub fn set_positions(&mut self, positions: &[Position]) -> Result<(), GraphError> {
        self.check_len(positions.len())?;
        if let Some(index) = positions
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(GraphError::NonFiniteHeight { index });
        }
        self.populate(|_, _, i| positions[i]);
        Ok(())
    }

    fn check_len(&self, got: usize) -> Result<(), GraphError> {
        let expected = self.cell_count();
        if got != expected {
            return Err(GraphError::LengthMismatch { expected, got });
        }
        Ok(())
    }

    fn populate(&mut self, position_of: impl Fn(i32, i32, usize) -> Position) {
        self.vertices.clear();
        for z in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                // `new` caps the cell count at `MAX_CELLS`, so ids fit.
                let i = self.vertices.len();
                self.vertices.push(Vertex::new(
                    VertexId(i as u32),
                    GridPos::new(x, z),
                    position_of(x, z, i),
                ));
            }
        }
        self.add_edges();
    }

    fn add_edges(&mut self) {
        let offsets = self.connectivity.offsets();
        for i in 0..self.vertices.len() {
            let cell = self.vertices[i].cell;
            for &(dx, dz) in offsets {
                let Some(j) = self.index_of(cell.x + dx, cell.z + dz) else {
                    continue;
                };
                let weight = self.vertices[i]
                    .position
                    .distance(self.vertices[j].position);
                let to = VertexId(j as u32);
                let v = &mut self.vertices[i];
                v.neighbours.push(to);
                v.edges.push(Edge {
                    from: v.id,
                    to,
                    weight,
                });
            }
        }
    }

    // ── Height mutation ─────────────────────────────────────────

    /// Set the height of the cell under `position`'s `x`/`z` (floored).
    ///
    /// Off-board positions are ignored.
    pub fn set_vertex(&mut self, position: Position) {
        if let Some(id) = self.id_at(position.x.floor() as i32, position.z.floor() as i32) {
            self.set_height(id, position.y);
        }
    }

    /// Set a vertex's height and refresh the weights of its incident edges
    /// in both directions. Unknown ids and non-finite heights are ignored.
    pub fn set_height(&mut self, id: VertexId, height: f32) {
        if !height.is_finite() || id.index() >= self.vertices.len() {
            return;
        }
        self.vertices[id.index()].position.y = height;
        self.refresh_weights(id);
    }

    /// Add `delta` to a vertex's height. See [`set_height`](Self::set_height).
    pub fn adjust_height(&mut self, id: VertexId, delta: f32) {
        if let Some(v) = self.vertices.get(id.index()) {
            let h = v.position.y + delta;
            self.set_height(id, h);
        }
    }

    fn refresh_weights(&mut self, id: VertexId) {
        let pos = self.vertices[id.index()].position;
        let neighbours = self.vertices[id.index()].neighbours.clone();
        for (k, nb) in neighbours.iter().enumerate() {
            let weight = pos.distance(self.vertices[nb.index()].position);
            self.vertices[id.index()].edges[k].weight = weight;
            if let Some(back) = self.vertices[nb.index()]
                .edges
                .iter_mut()
                .find(|e| e.to == id)
            {
                back.weight = weight;
            }
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Reset every vertex's search annotations: not visited, infinite
    /// `g`/`h`, no parent. Heights and adjacency are untouched.
    pub fn initialize_vertices(&mut self) {
        for v in &mut self.vertices {
            v.visited = false;
            v.g = f32::INFINITY;
            v.h = f32::INFINITY;
            v.parent = None;
        }
    }

    /// Whether `(x, z)` lies in `[0, width) x [0, height)`.
    pub fn within_board(&self, x: i32, z: i32) -> bool {
        !(x < 0 || z < 0 || x >= self.width as i32 || z >= self.height as i32)
    }

    fn index_of(&self, x: i32, z: i32) -> Option<usize> {
        if !self.within_board(x, z) {
            return None;
        }
        let i = x as usize + z as usize * self.width as usize;
        (i < self.vertices.len()).then_some(i)
    }

    /// Id of the vertex at `(x, z)`, or `None` off the board or before
    /// population.
    pub fn id_at(&self, x: i32, z: i32) -> Option<VertexId> {
        self.index_of(x, z).map(|i| VertexId(i as u32))
    }

    /// Vertex at `(x, z)`, or `None` off the board or before population.
    pub fn at_pos(&self, x: i32, z: i32) -> Option<&Vertex> {
        self.index_of(x, z).map(|i| &self.vertices[i])
    }

    /// Vertex at a grid cell.
    pub fn at_cell(&self, cell: GridPos) -> Option<&Vertex> {
        self.at_pos(cell.x, cell.z)
    }

    /// Vertex by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this (populated) graph.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Vertex by id, or `None` for a foreign id.
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    /// Height of the vertex at `(x, z)`.
    pub fn height_at(&self, x: i32, z: i32) -> Option<f32> {
        self.at_pos(x, z).map(Vertex::height)
    }

    /// Snapshot of all heights in row-major order.
    pub fn heights(&self) -> Vec<f32> {
        self.vertices.iter().map(Vertex::height).collect()
    }

    /// Euclidean 3D distance between two vertices.
    pub fn diagonal_distance(&self, from: VertexId, to: VertexId) -> f32 {
        self.vertex(from).position.distance(self.vertex(to).position)
    }

    /// L1 distance between two vertices.
    pub fn manhattan_distance(&self, from: VertexId, to: VertexId) -> f32 {
        self.vertex(from).position.manhattan(self.vertex(to).position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn flat(w: u32, h: u32) -> Graph {
        let mut g = Graph::new(w, h, Connectivity::Eight).unwrap();
        g.generate();
        g
    }

    #[test]
    fn new_does_not_populate() {
        let g = Graph::new(4, 4, Connectivity::Eight).unwrap();
        assert!(g.is_empty());
        assert!(g.at_pos(0, 0).is_none());
        assert!(g.within_board(0, 0));
    }

    #[test]
    fn new_rejects_zero_dims() {
        assert_eq!(
            Graph::new(0, 4, Connectivity::Eight).unwrap_err(),
            GraphError::EmptyGraph
        );
        assert_eq!(
            Graph::new(4, 0, Connectivity::Four).unwrap_err(),
            GraphError::EmptyGraph
        );
    }

    #[test]
    fn new_rejects_dims_exceeding_i32_max() {
        let big = i32::MAX as u32 + 1;
        assert!(matches!(
            Graph::new(big, 2, Connectivity::Eight),
            Err(GraphError::DimensionTooLarge { name: "width", .. })
        ));
        assert!(matches!(
            Graph::new(2, big, Connectivity::Eight),
            Err(GraphError::DimensionTooLarge { name: "height", .. })
        ));
    }

    #[test]
    fn new_rejects_cell_counts_beyond_vertex_ids() {
        assert_eq!(
            Graph::new(70_000, 70_000, Connectivity::Eight).unwrap_err(),
            GraphError::TooManyCells {
                cells: 4_900_000_000,
                max: Graph::MAX_CELLS,
            }
        );
        assert!(matches!(
            Graph::new(Graph::MAX_DIM, 3, Connectivity::Four),
            Err(GraphError::TooManyCells { .. })
        ));
    }

    #[test]
    fn generate_is_row_major() {
        let g = flat(5, 3);
        assert_eq!(g.len(), 15);
        let v = g.at_pos(3, 2).unwrap();
        assert_eq!(v.id(), VertexId(3 + 2 * 5));
        assert_eq!(v.cell(), GridPos::new(3, 2));
        assert_eq!(v.position(), Position::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn degrees_eight_connected() {
        let g = flat(5, 5);
        assert_eq!(g.at_pos(0, 0).unwrap().neighbours().len(), 3);
        assert_eq!(g.at_pos(2, 0).unwrap().neighbours().len(), 5);
        assert_eq!(g.at_pos(2, 2).unwrap().neighbours().len(), 8);
    }

    #[test]
    fn degrees_four_connected() {
        let mut g = Graph::new(5, 5, Connectivity::Four).unwrap();
        g.generate();
        assert_eq!(g.at_pos(0, 0).unwrap().neighbours().len(), 2);
        assert_eq!(g.at_pos(2, 0).unwrap().neighbours().len(), 3);
        assert_eq!(g.at_pos(2, 2).unwrap().neighbours().len(), 4);
    }

    #[test]
    fn flat_weights_are_planar_distances() {
        let g = flat(3, 3);
        let centre = g.at_pos(1, 1).unwrap();
        for e in centre.edges() {
            let to = g.vertex(e.to()).cell();
            let expected = if to.x != 1 && to.z != 1 {
                std::f32::consts::SQRT_2
            } else {
                1.0
            };
            assert!((e.weight() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn set_heights_validates_length() {
        let mut g = Graph::new(3, 3, Connectivity::Eight).unwrap();
        assert_eq!(
            g.set_heights(&[0.0; 4]).unwrap_err(),
            GraphError::LengthMismatch {
                expected: 9,
                got: 4
            }
        );
        assert!(g.is_empty());
    }

    #[test]
    fn set_heights_rejects_nan() {
        let mut g = Graph::new(2, 2, Connectivity::Eight).unwrap();
        let err = g.set_heights(&[0.0, 1.0, f32::NAN, 0.0]).unwrap_err();
        assert_eq!(err, GraphError::NonFiniteHeight { index: 2 });
    }

    #[test]
    fn set_positions_uses_supplied_points() {
        let mut g = Graph::new(2, 1, Connectivity::Eight).unwrap();
        g.set_positions(&[Position::new(0.0, 0.0, 0.0), Position::new(3.0, 4.0, 0.0)])
            .unwrap();
        let a = g.id_at(0, 0).unwrap();
        let b = g.id_at(1, 0).unwrap();
        assert_eq!(g.vertex(a).edges()[0].weight(), 5.0);
        assert_eq!(g.diagonal_distance(a, b), 5.0);
        assert_eq!(g.manhattan_distance(a, b), 7.0);
    }

    #[test]
    fn set_height_refreshes_both_edge_directions() {
        let mut g = flat(3, 3);
        let centre = g.id_at(1, 1).unwrap();
        g.set_height(centre, 2.0);
        compliance::assert_edges_symmetric(&g);
        compliance::assert_weights_current(&g);
        let east = g.id_at(2, 1).unwrap();
        let w = g
            .vertex(east)
            .edges()
            .iter()
            .find(|e| e.to() == centre)
            .unwrap()
            .weight();
        assert!((w - 5.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn set_vertex_floors_and_ignores_off_board() {
        let mut g = flat(3, 3);
        g.set_vertex(Position::new(1.7, 4.0, 2.2));
        assert_eq!(g.height_at(1, 2), Some(4.0));
        let before = g.heights();
        g.set_vertex(Position::new(-0.5, 9.0, 0.0));
        g.set_vertex(Position::new(3.0, 9.0, 0.0));
        assert_eq!(g.heights(), before);
    }

    #[test]
    fn at_pos_out_of_bounds_is_none() {
        let g = flat(4, 4);
        assert!(g.at_pos(-1, 0).is_none());
        assert!(g.at_pos(0, 4).is_none());
        assert!(g.at_pos(4, 0).is_none());
        assert!(g.height_at(100, -100).is_none());
    }

    #[test]
    fn initialize_vertices_resets_annotations_only() {
        let mut g = flat(2, 2);
        let id = g.id_at(1, 1).unwrap();
        g.set_height(id, 3.0);
        {
            let v = g.vertex_mut(id);
            v.visited = true;
            v.g = 1.0;
            v.h = 2.0;
            v.parent = Some(VertexId(0));
        }
        g.initialize_vertices();
        let v = g.vertex(id);
        assert!(!v.is_visited());
        assert_eq!(v.g(), f32::INFINITY);
        assert_eq!(v.h(), f32::INFINITY);
        assert_eq!(v.parent(), None);
        assert_eq!(v.height(), 3.0);
        assert_eq!(v.neighbours().len(), 3);
    }

    #[test]
    fn compliance_eight() {
        compliance::run_full_compliance(&flat(6, 5));
    }

    #[test]
    fn compliance_four() {
        let mut g = Graph::new(5, 6, Connectivity::Four).unwrap();
        g.generate();
        compliance::run_full_compliance(&g);
    }

    proptest! {
        #[test]
        fn within_board_matches_bounds(w in 1u32..20, h in 1u32..20, x in -30i32..30, z in -30i32..30) {
            let g = Graph::new(w, h, Connectivity::Eight).unwrap();
            let expected = 0 <= x && x < w as i32 && 0 <= z && z < h as i32;
            prop_assert_eq!(g.within_board(x, z), expected);
        }

        #[test]
        fn random_heights_keep_invariants(
            w in 1u32..8,
            h in 1u32..8,
            seed in proptest::collection::vec(-50.0f32..50.0, 64),
        ) {
            let n = (w * h) as usize;
            let mut g = Graph::new(w, h, Connectivity::Eight).unwrap();
            g.set_heights(&seed[..n]).unwrap();
            compliance::run_full_compliance(&g);
            // Mutate a vertex and re-check.
            g.adjust_height(VertexId(0), 7.5);
            compliance::run_full_compliance(&g);
        }
    }
}
