//! Execution context passed to agents on every step.

use rand_chacha::ChaCha8Rng;
use strata_core::TerrainSurface;
use strata_graph::Graph;

/// What an agent may touch during a step.
///
/// The graph is the only mutable shared state. The terrain is read-only
/// during a run: it supplies band membership and random starting cells
/// for the seed heightmap. All randomness comes from the run's RNG.
pub struct AgentContext<'a> {
    graph: &'a mut Graph,
    terrain: &'a dyn TerrainSurface,
    rng: &'a mut ChaCha8Rng,
}

impl<'a> AgentContext<'a> {
    /// Construct a context.
    ///
    /// Typically called by the scheduler; tests build one directly.
    pub fn new(
        graph: &'a mut Graph,
        terrain: &'a dyn TerrainSurface,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            graph,
            terrain,
            rng,
        }
    }

    /// The terrain graph.
    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Mutable terrain graph.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.graph
    }

    /// The terrain surface the graph was built from.
    pub fn terrain(&self) -> &dyn TerrainSurface {
        self.terrain
    }

    /// The run's random number generator.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.rng
    }

    /// Split into graph, terrain, and RNG for steps that need all three at
    /// once.
    pub fn parts(&mut self) -> (&mut Graph, &dyn TerrainSurface, &mut ChaCha8Rng) {
        (&mut *self.graph, self.terrain, &mut *self.rng)
    }
}
