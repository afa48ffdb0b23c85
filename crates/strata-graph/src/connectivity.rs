//! Neighbourhood rule used when deriving graph edges.

use serde::{Deserialize, Serialize};

/// All 8 offsets in scan order: `dx` outer, `dz` inner, centre skipped.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Cardinal offsets in the same scan order.
const OFFSETS_4: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Which grid cells count as adjacent.
///
/// Edge cells simply have fewer neighbours: there is no wrap-around, a
/// terrain is a bounded sheet.
///
/// # Examples
///
/// ```
/// use strata_graph::{Connectivity, Graph};
///
/// let mut eight = Graph::new(4, 4, Connectivity::Eight).unwrap();
/// eight.generate();
/// let corner = eight.id_at(0, 0).unwrap();
/// let interior = eight.id_at(1, 1).unwrap();
/// assert_eq!(eight.vertex(corner).neighbours().len(), 3);
/// assert_eq!(eight.vertex(interior).neighbours().len(), 8);
///
/// let mut four = Graph::new(4, 4, Connectivity::Four).unwrap();
/// four.generate();
/// assert_eq!(four.vertex(corner).neighbours().len(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connectivity {
    /// Cardinal and diagonal neighbours.
    #[default]
    Eight,
    /// Cardinal neighbours only.
    Four,
}

impl Connectivity {
    /// Neighbour offsets `(dx, dz)` in edge-creation order.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Eight => &OFFSETS_8,
            Connectivity::Four => &OFFSETS_4,
        }
    }

    /// Upper bound on the neighbour count of any vertex.
    pub fn max_degree(self) -> usize {
        self.offsets().len()
    }
}
