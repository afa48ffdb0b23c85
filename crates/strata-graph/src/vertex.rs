//! Graph vertices and weighted edges.

use smallvec::SmallVec;
use strata_core::{GridPos, Position, VertexId};

/// A directed weighted relation between two vertices.
///
/// The weight is the Euclidean distance between the endpoint positions and
/// is kept current by the owning graph whenever either endpoint's height
/// changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub(crate) from: VertexId,
    pub(crate) to: VertexId,
    pub(crate) weight: f32,
}

impl Edge {
    /// Source vertex.
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// Destination vertex.
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Current edge weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }
}

/// A terrain sample point in the graph arena.
///
/// Identity is the integer grid cell; the 3D position is mutable in its
/// height component only. The `visited`/`g`/`h`/`parent` annotations are
/// scratch state for the search algorithms and are reset by
/// [`Graph::initialize_vertices`](crate::Graph::initialize_vertices).
#[derive(Clone, Debug)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) cell: GridPos,
    pub(crate) position: Position,
    pub(crate) neighbours: SmallVec<[VertexId; 8]>,
    pub(crate) edges: SmallVec<[Edge; 8]>,
    pub(crate) visited: bool,
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) parent: Option<VertexId>,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, cell: GridPos, position: Position) -> Self {
        Self {
            id,
            cell,
            position,
            neighbours: SmallVec::new(),
            edges: SmallVec::new(),
            visited: false,
            g: f32::INFINITY,
            h: f32::INFINITY,
            parent: None,
        }
    }

    /// Arena id.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Integer grid cell.
    pub fn cell(&self) -> GridPos {
        self.cell
    }

    /// 3D position (`y` is height).
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current height.
    pub fn height(&self) -> f32 {
        self.position.y
    }

    /// Adjacent vertices in edge-creation order.
    pub fn neighbours(&self) -> &[VertexId] {
        &self.neighbours
    }

    /// Outgoing edges, parallel to [`neighbours`](Self::neighbours).
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of outgoing edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the last search finalised this vertex.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Accumulated cost from the last search's start.
    pub fn g(&self) -> f32 {
        self.g
    }

    /// Heuristic estimate to the last search's goal.
    pub fn h(&self) -> f32 {
        self.h
    }

    /// Total estimated cost `g + h`.
    pub fn f(&self) -> f32 {
        self.g + self.h
    }

    /// Predecessor on the last search's tree.
    pub fn parent(&self) -> Option<VertexId> {
        self.parent
    }
}
