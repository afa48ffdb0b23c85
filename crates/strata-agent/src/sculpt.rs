//! Local terrain geometry shared by the agent implementations.

use strata_core::{GridPos, Position, VertexId};
use strata_graph::Graph;

/// Every on-board cell within Euclidean `radius` of `centre`, with its
/// distance, in `dx`-outer / `dz`-inner order. Includes the centre.
pub fn footprint(graph: &Graph, centre: GridPos, radius: f32) -> Vec<(VertexId, f32)> {
    if radius.is_nan() || radius < 0.0 {
        return Vec::new();
    }
    let reach = radius.floor() as i32;
    let mut cells = Vec::with_capacity(((2 * reach + 1) * (2 * reach + 1)) as usize);
    for dx in -reach..=reach {
        for dz in -reach..=reach {
            let d = ((dx * dx + dz * dz) as f32).sqrt();
            if d > radius {
                continue;
            }
            let cell = centre.offset(dx, dz);
            if let Some(id) = graph.id_at(cell.x, cell.z) {
                cells.push((id, d));
            }
        }
    }
    cells
}

/// Unit surface normal at `cell` from central height differences,
/// falling back to one-sided differences at the grid edge.
///
/// Returns [`Position::UP`] off the board.
pub fn surface_normal(graph: &Graph, cell: GridPos) -> Position {
    let Some(here) = graph.height_at(cell.x, cell.z) else {
        return Position::UP;
    };
    let slope = |minus: Option<f32>, plus: Option<f32>| match (minus, plus) {
        (Some(m), Some(p)) => (p - m) * 0.5,
        (Some(m), None) => here - m,
        (None, Some(p)) => p - here,
        (None, None) => 0.0,
    };
    let dx = slope(
        graph.height_at(cell.x - 1, cell.z),
        graph.height_at(cell.x + 1, cell.z),
    );
    let dz = slope(
        graph.height_at(cell.x, cell.z - 1),
        graph.height_at(cell.x, cell.z + 1),
    );
    Position::new(-dx, 1.0, -dz).normalized()
}

/// Descent angle in degrees from `from` to `to`: positive going downhill,
/// in `(-90, 90)`, zero on flat ground.
pub fn descent_angle(from: Position, to: Position) -> f32 {
    let drop = from.y - to.y;
    let run = (to - from).planar_length();
    drop.atan2(run).to_degrees()
}

/// Mean height of the cells in `cells`, or `None` if empty.
pub fn mean_height(graph: &Graph, cells: &[(VertexId, f32)]) -> Option<f32> {
    if cells.is_empty() {
        return None;
    }
    let sum: f32 = cells.iter().map(|(id, _)| graph.vertex(*id).height()).sum();
    Some(sum / cells.len() as f32)
}
