//! Erosion agents: downhill walkers that wear the terrain away.
//!
//! An erosion agent starts on a mountain cell. Each step it squashes every
//! cell in its area of effect, then picks an unvisited downhill neighbour
//! by weighted chance, favouring the steepest descents. It stops when it
//! runs out of tokens, has nowhere left to go, or walks onto the beach.

use std::collections::HashSet;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strata_agent::params::check_range;
use strata_agent::sculpt::{descent_angle, footprint, surface_normal};
use strata_agent::{
    Agent, AgentContext, AgentKind, AgentParams, AgentStatus, DiminishCurve, Termination,
};
use strata_core::{GridPos, TerrainBand, VertexId};
use strata_graph::{MaxHeap, PriorityQueue};

/// Full circular passes over the candidate heap before selection gives up
/// on the weighted draw and takes the heap root (the steepest candidate).
///
/// Every viable candidate has a priority above zero, so a pass almost
/// always accepts something. The cap bounds the loop when priorities are
/// vanishingly small.
const SELECTION_PASSES: usize = 64;

/// Tuning for [`ErosionAgent`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionParams {
    /// Steps per agent. Default: 60.
    pub tokens: u32,
    /// Minimum descent angle in degrees a neighbour needs to be a
    /// candidate. Negative values allow slightly uphill moves.
    /// Default: -5.
    pub leniency: f32,
    /// Height removed at the centre of a flat footprint per step.
    /// Default: 0.15.
    pub strength: f32,
    /// Squash radius in cells. Default: 6.
    pub area_of_effect: f32,
    /// Falloff across the footprint. Default: [`DiminishCurve::Smooth`].
    pub diminish: DiminishCurve,
}

impl Default for ErosionParams {
    fn default() -> Self {
        Self {
            tokens: 60,
            leniency: -5.0,
            strength: 0.15,
            area_of_effect: 6.0,
            diminish: DiminishCurve::Smooth,
        }
    }
}

impl AgentParams for ErosionParams {
    fn tokens(&self) -> u32 {
        self.tokens
    }

    fn area_of_effect(&self) -> f32 {
        self.area_of_effect
    }

    fn validate(&self) -> Result<(), String> {
        check_range("leniency", self.leniency, -90.0, 90.0)?;
        check_range("strength", self.strength, 0.0, f32::MAX)?;
        check_range("area_of_effect", self.area_of_effect, 0.0, 1024.0)
    }

    fn randomize(&mut self, rng: &mut dyn RngCore) {
        self.tokens = rng.random_range(30..100);
        self.leniency = rng.random_range(-15.0..40.0);
        self.strength = rng.random_range(0.05..1.5);
        self.area_of_effect = rng.random_range(1..7) as f32;
    }
}

/// A downhill walker that lowers the ground around it.
#[derive(Clone, Debug)]
pub struct ErosionAgent {
    params: ErosionParams,
    tokens: u32,
    current: Option<VertexId>,
    cell: Option<GridPos>,
    visited: HashSet<VertexId>,
}

impl ErosionAgent {
    /// A fresh agent with its own copy of `params`.
    pub fn new(params: ErosionParams) -> Self {
        Self {
            tokens: params.tokens,
            params,
            current: None,
            cell: None,
            visited: HashSet::new(),
        }
    }

    /// Place the agent on `cell` without drawing a random mountain cell.
    /// Off-board cells leave it unplaced.
    pub fn place(&mut self, ctx: &AgentContext<'_>, cell: GridPos) {
        self.current = ctx.graph().id_at(cell.x, cell.z);
        self.cell = self.current.map(|_| cell);
    }

    /// The agent's params.
    pub fn params(&self) -> &ErosionParams {
        &self.params
    }

    /// Vertices this agent has stood on.
    pub fn visited(&self) -> &HashSet<VertexId> {
        &self.visited
    }

    /// Lower every footprint cell by `strength * diminish * normal.y`.
    ///
    /// Weights are computed against the pre-step surface and then applied,
    /// so the result does not depend on scan order.
    fn squash(&self, ctx: &mut AgentContext<'_>, centre: GridPos) {
        let graph = ctx.graph();
        let radius = self.params.area_of_effect;
        let deltas: Vec<(VertexId, f32)> = footprint(graph, centre, radius)
            .into_iter()
            .map(|(id, d)| {
                let normal = surface_normal(graph, graph.vertex(id).cell());
                let weight = self.params.diminish.at_distance(d, radius);
                (id, self.params.strength * weight * normal.y)
            })
            .collect();
        let graph = ctx.graph_mut();
        for (id, delta) in deltas {
            graph.adjust_height(id, -delta);
        }
    }

    /// Unvisited neighbours steeper than the leniency, keyed by
    /// `angle + 90` so every key lies in `(0, 180)`.
    fn candidates(&self, ctx: &AgentContext<'_>, from: VertexId) -> MaxHeap<VertexId> {
        let graph = ctx.graph();
        let here = graph.vertex(from).position();
        let mut heap = MaxHeap::with_capacity(graph.connectivity().max_degree());
        for &nb in graph.vertex(from).neighbours() {
            if self.visited.contains(&nb) {
                continue;
            }
            let angle = descent_angle(here, graph.vertex(nb).position());
            if angle > self.params.leniency {
                heap.enqueue(nb, angle + 90.0);
            }
        }
        heap
    }

    /// Walk the heap's array order circularly, accepting entry `i` when a
    /// uniform draw falls below `priority(i) / 180`.
    fn select(heap: &MaxHeap<VertexId>, rng: &mut dyn RngCore) -> Option<VertexId> {
        let n = heap.len();
        if n == 0 {
            return None;
        }
        for attempt in 0..n * SELECTION_PASSES {
            let i = attempt % n;
            let chance = heap.priority_at(i).unwrap_or(0.0) / 180.0;
            if rng.random::<f32>() < chance {
                return heap.get(i).copied();
            }
        }
        heap.peek().copied()
    }
}

impl Agent for ErosionAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Erosion
    }

    fn initialize(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus {
        let start = {
            let (_, terrain, rng) = ctx.parts();
            terrain.random_in_band(TerrainBand::Mountain, rng)
        };
        let Some(cell) = start else {
            return AgentStatus::Finished(Termination::NoStart);
        };
        self.place(ctx, cell);
        if self.current.is_none() {
            return AgentStatus::Finished(Termination::NoStart);
        }
        AgentStatus::Active
    }

    fn update(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus {
        let (Some(current), Some(cell)) = (self.current, self.cell) else {
            return AgentStatus::Finished(Termination::NoStart);
        };
        if self.tokens == 0 {
            return AgentStatus::Finished(Termination::TokensExhausted);
        }
        self.tokens -= 1;
        self.visited.insert(current);

        self.squash(ctx, cell);

        let heap = self.candidates(ctx, current);
        let Some(next) = Self::select(&heap, ctx.rng()) else {
            return AgentStatus::Finished(Termination::Stuck);
        };
        let next_vertex = ctx.graph().vertex(next);
        let next_cell = next_vertex.cell();
        let band = ctx.terrain().classify(next_vertex.height());
        self.current = Some(next);
        self.cell = Some(next_cell);

        if band <= TerrainBand::Beach {
            return AgentStatus::Finished(Termination::ReachedBand(band));
        }
        if self.tokens == 0 {
            return AgentStatus::Finished(Termination::TokensExhausted);
        }
        AgentStatus::Active
    }

    fn position(&self) -> Option<GridPos> {
        self.cell
    }

    fn tokens(&self) -> u32 {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_test_utils::{cone_heights, graph_from_heights, test_rng, MockTerrain};
    use strata_core::TerrainSurface;

    fn footprint_sum(graph: &strata_graph::Graph, centre: GridPos, radius: f32) -> f32 {
        footprint(graph, centre, radius)
            .iter()
            .map(|(id, _)| graph.vertex(*id).height())
            .sum()
    }

    #[test]
    fn zero_tokens_finishes_without_mutation() {
        let heights = cone_heights(9, 9, 10.0);
        let terrain = MockTerrain::new(9, 9, heights.clone());
        let mut graph = graph_from_heights(9, 9, &heights);
        let mut rng = test_rng(1);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = ErosionAgent::new(ErosionParams {
            tokens: 0,
            ..ErosionParams::default()
        });
        assert_eq!(agent.initialize(&mut ctx), AgentStatus::Active);
        assert_eq!(
            agent.update(&mut ctx),
            AgentStatus::Finished(Termination::TokensExhausted)
        );
        assert_eq!(graph.heights(), heights);
    }

    #[test]
    fn starts_on_a_mountain_cell() {
        let heights = cone_heights(11, 11, 10.0);
        let terrain = MockTerrain::new(11, 11, heights.clone());
        let mut graph = graph_from_heights(11, 11, &heights);
        let mut rng = test_rng(2);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = ErosionAgent::new(ErosionParams::default());
        agent.initialize(&mut ctx);
        let cell = agent.position().unwrap();
        assert!(terrain.band_cells(TerrainBand::Mountain).contains(&cell));
    }

    #[test]
    fn no_mountains_means_no_start() {
        let heights = cone_heights(5, 5, 1.0);
        let terrain = MockTerrain::new(5, 5, heights.clone()).with_band(TerrainBand::Mountain, vec![]);
        let mut graph = graph_from_heights(5, 5, &heights);
        let mut rng = test_rng(3);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = ErosionAgent::new(ErosionParams::default());
        assert_eq!(
            agent.initialize(&mut ctx),
            AgentStatus::Finished(Termination::NoStart)
        );
        assert_eq!(agent.position(), None);
    }

    #[test]
    fn one_step_lowers_footprint_sum() {
        let heights = cone_heights(15, 15, 20.0);
        let terrain = MockTerrain::new(15, 15, heights.clone());
        let mut graph = graph_from_heights(15, 15, &heights);
        let baseline = graph.clone();
        let mut rng = test_rng(4);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = ErosionAgent::new(ErosionParams::default());
        let centre = GridPos::new(7, 7);
        agent.place(&ctx, centre);
        agent.update(&mut ctx);
        let radius = agent.params().area_of_effect;
        assert!(footprint_sum(&graph, centre, radius) < footprint_sum(&baseline, centre, radius));
        assert!(graph.height_at(7, 7).unwrap() < baseline.height_at(7, 7).unwrap());
    }

    #[test]
    fn never_revisits_a_vertex() {
        let heights = cone_heights(21, 21, 30.0);
        let terrain = MockTerrain::new(21, 21, heights.clone());
        let mut graph = graph_from_heights(21, 21, &heights);
        let mut rng = test_rng(5);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = ErosionAgent::new(ErosionParams {
            tokens: 200,
            leniency: -60.0,
            ..ErosionParams::default()
        });
        agent.place(&ctx, GridPos::new(10, 10));
        let mut path = vec![agent.position().unwrap()];
        while !agent.update(&mut ctx).is_finished() {
            let cell = agent.position().unwrap();
            assert!(!path.contains(&cell), "revisited {cell}");
            path.push(cell);
        }
    }

    #[test]
    fn walks_downhill_until_beach() {
        let heights = cone_heights(21, 21, 30.0);
        let terrain = MockTerrain::new(21, 21, heights.clone());
        let mut graph = graph_from_heights(21, 21, &heights);
        let mut rng = test_rng(6);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = ErosionAgent::new(ErosionParams {
            tokens: 500,
            leniency: 10.0,
            strength: 0.01,
            ..ErosionParams::default()
        });
        agent.place(&ctx, GridPos::new(10, 10));
        let status = loop {
            let s = agent.update(&mut ctx);
            if s.is_finished() {
                break s;
            }
        };
        assert!(matches!(
            status.termination(),
            Some(Termination::ReachedBand(TerrainBand::Beach | TerrainBand::Ocean))
                | Some(Termination::Stuck)
        ));
        assert!(agent.tokens() < 500);
    }

    #[test]
    fn flat_ground_with_positive_leniency_is_stuck() {
        let heights = vec![0.0; 25];
        let terrain = MockTerrain::new(5, 5, heights.clone());
        let mut graph = graph_from_heights(5, 5, &heights);
        let mut rng = test_rng(7);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = ErosionAgent::new(ErosionParams {
            leniency: 5.0,
            area_of_effect: 0.0,
            ..ErosionParams::default()
        });
        agent.place(&ctx, GridPos::new(2, 2));
        assert_eq!(
            agent.update(&mut ctx),
            AgentStatus::Finished(Termination::Stuck)
        );
        assert_eq!(agent.tokens(), 59);
    }

    #[test]
    fn select_prefers_steeper_candidates() {
        let mut heap = MaxHeap::new();
        heap.enqueue(VertexId(1), 170.0);
        heap.enqueue(VertexId(2), 10.0);
        let mut rng = test_rng(8);
        let picks = (0..2000)
            .filter_map(|_| ErosionAgent::select(&heap, &mut rng))
            .filter(|id| *id == VertexId(1))
            .count();
        assert!(picks > 1600, "steep candidate picked {picks} times");
        assert_eq!(ErosionAgent::select(&MaxHeap::new(), &mut rng), None);
    }

    #[test]
    fn select_falls_back_to_root_when_nothing_is_accepted() {
        let mut heap = MaxHeap::new();
        heap.enqueue(VertexId(4), 0.0);
        heap.enqueue(VertexId(9), -1.0);
        let mut rng = test_rng(12);
        assert_eq!(ErosionAgent::select(&heap, &mut rng), Some(VertexId(4)));
    }

    #[test]
    fn randomize_stays_in_ranges() {
        let mut rng = test_rng(9);
        let mut p = ErosionParams::default();
        for _ in 0..100 {
            p.randomize(&mut rng);
            assert!((30..100).contains(&p.tokens));
            assert!((-15.0..40.0).contains(&p.leniency));
            assert!((0.05..1.5).contains(&p.strength));
            assert!((1.0..7.0).contains(&p.area_of_effect));
            assert!(p.validate().is_ok());
        }
    }
}
