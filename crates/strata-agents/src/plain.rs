//! Plain agents: wandering smoothers.
//!
//! A plain agent climbs from a random plain cell to a nearby local peak,
//! then drifts across the terrain pulling every cell in its area of effect
//! toward the local mean. Now and then it turns toward a random point on a
//! circle around where it started, so smoothing stays roughly local.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strata_agent::params::check_range;
use strata_agent::sculpt::{footprint, mean_height};
use strata_agent::{
    Agent, AgentContext, AgentKind, AgentParams, AgentStatus, DiminishCurve, Termination,
};
use strata_core::{GridPos, TerrainBand, VertexId};
use strata_graph::Graph;

/// Tuning for [`PlainAgent`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlainParams {
    /// Steps per agent. Default: 120.
    pub tokens: u32,
    /// Fraction of the gap to the local mean closed per step at the
    /// centre. Default: 0.05.
    pub smoothing: f32,
    /// Per-step chance of picking a new heading. Default: 0.09.
    pub switch_direction_chance: f32,
    /// Distance moved per step, in cells. Default: 5.
    pub move_magnitude: f32,
    /// Smoothing radius in cells; also the radius of the circle new
    /// headings aim at. Default: 10.
    pub area_of_effect: f32,
    /// Uphill moves allowed while looking for a starting peak.
    /// Default: 64.
    pub climb_limit: u32,
    /// Falloff across the footprint. Default: [`DiminishCurve::Smooth`].
    pub diminish: DiminishCurve,
}

impl Default for PlainParams {
    fn default() -> Self {
        Self {
            tokens: 120,
            smoothing: 0.05,
            switch_direction_chance: 0.09,
            move_magnitude: 5.0,
            area_of_effect: 10.0,
            climb_limit: 64,
            diminish: DiminishCurve::Smooth,
        }
    }
}

impl AgentParams for PlainParams {
    fn tokens(&self) -> u32 {
        self.tokens
    }

    fn area_of_effect(&self) -> f32 {
        self.area_of_effect
    }

    fn validate(&self) -> Result<(), String> {
        check_range("smoothing", self.smoothing, 0.0, 1.0)?;
        check_range(
            "switch_direction_chance",
            self.switch_direction_chance,
            0.0,
            1.0,
        )?;
        check_range("move_magnitude", self.move_magnitude, 0.0, 1024.0)?;
        check_range("area_of_effect", self.area_of_effect, 0.0, 1024.0)
    }

    fn randomize(&mut self, rng: &mut dyn RngCore) {
        self.tokens = rng.random_range(50..200);
        self.smoothing = rng.random_range(0.01..1.0);
        self.move_magnitude = rng.random_range(1..3) as f32;
        self.switch_direction_chance = rng.random_range(0.01..0.3);
        self.area_of_effect = rng.random_range(5..15) as f32;
    }
}

/// Continuous 2D point on the grid plane.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Planar {
    x: f32,
    z: f32,
}

impl Planar {
    fn of(cell: GridPos) -> Self {
        Self {
            x: cell.x as f32,
            z: cell.z as f32,
        }
    }

    fn cell(self) -> GridPos {
        GridPos::new(self.x.round() as i32, self.z.round() as i32)
    }

    fn unit(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            z: angle.sin(),
        }
    }
}

/// A wandering smoother.
#[derive(Clone, Debug)]
pub struct PlainAgent {
    params: PlainParams,
    tokens: u32,
    origin: Option<Planar>,
    position: Option<Planar>,
    direction: Planar,
}

impl PlainAgent {
    /// A fresh agent with its own copy of `params`.
    pub fn new(params: PlainParams) -> Self {
        Self {
            tokens: params.tokens,
            params,
            origin: None,
            position: None,
            direction: Planar { x: 1.0, z: 0.0 },
        }
    }

    /// The agent's params.
    pub fn params(&self) -> &PlainParams {
        &self.params
    }

    /// Start at `cell` heading along `angle` (radians from +x toward +z),
    /// skipping the random start and peak climb.
    pub fn place(&mut self, cell: GridPos, angle: f32) {
        self.origin = Some(Planar::of(cell));
        self.position = Some(Planar::of(cell));
        self.direction = Planar::unit(angle);
    }

    /// Greedy ascent from `start`: step to the highest neighbour while it
    /// is strictly higher, at most `limit` times.
    pub fn climb(graph: &Graph, start: VertexId, limit: u32) -> VertexId {
        let mut current = start;
        for _ in 0..limit {
            let here = graph.vertex(current).height();
            let best = graph
                .vertex(current)
                .neighbours()
                .iter()
                .copied()
                .fold(None::<(VertexId, f32)>, |best, nb| {
                    let h = graph.vertex(nb).height();
                    match best {
                        Some((_, bh)) if bh >= h => best,
                        _ => Some((nb, h)),
                    }
                });
            match best {
                Some((nb, h)) if h > here => current = nb,
                _ => break,
            }
        }
        current
    }

    /// Pull each footprint cell toward the footprint mean.
    ///
    /// All new heights are computed from the pre-step surface before any
    /// is written.
    fn smooth(&self, graph: &mut Graph, centre: GridPos) {
        let radius = self.params.area_of_effect;
        let cells = footprint(graph, centre, radius);
        let Some(mean) = mean_height(graph, &cells) else {
            return;
        };
        let updates: Vec<(VertexId, f32)> = cells
            .iter()
            .map(|&(id, d)| {
                let h = graph.vertex(id).height();
                let weight = self.params.diminish.at_distance(d, radius);
                (id, h + (mean - h) * self.params.smoothing * weight)
            })
            .collect();
        for (id, h) in updates {
            graph.set_height(id, h);
        }
    }

    fn maybe_turn(&mut self, rng: &mut dyn RngCore, position: Planar, origin: Planar) {
        let chance = self.params.switch_direction_chance.clamp(0.0, 1.0) as f64;
        if !rng.random_bool(chance) {
            return;
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let aim = Planar::unit(angle);
        let radius = self.params.area_of_effect;
        let target = Planar {
            x: origin.x + aim.x * radius,
            z: origin.z + aim.z * radius,
        };
        let (dx, dz) = (target.x - position.x, target.z - position.z);
        let len = (dx * dx + dz * dz).sqrt();
        if len > f32::EPSILON {
            self.direction = Planar {
                x: dx / len,
                z: dz / len,
            };
        }
    }
}

impl Agent for PlainAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Plain
    }

    fn initialize(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus {
        let (graph, terrain, rng) = ctx.parts();
        let Some(start) = terrain.random_in_band(TerrainBand::Plain, rng) else {
            return AgentStatus::Finished(Termination::NoStart);
        };
        let Some(id) = graph.id_at(start.x, start.z) else {
            return AgentStatus::Finished(Termination::NoStart);
        };
        let peak = Self::climb(graph, id, self.params.climb_limit);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.place(graph.vertex(peak).cell(), angle);
        AgentStatus::Active
    }

    fn update(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus {
        let (Some(position), Some(origin)) = (self.position, self.origin) else {
            return AgentStatus::Finished(Termination::NoStart);
        };
        if self.tokens == 0 {
            return AgentStatus::Finished(Termination::TokensExhausted);
        }
        let cell = position.cell();
        if !ctx.graph().within_board(cell.x, cell.z) {
            return AgentStatus::Finished(Termination::LeftBoard);
        }
        self.tokens -= 1;

        let (graph, _, rng) = ctx.parts();
        self.smooth(graph, cell);
        self.maybe_turn(rng, position, origin);

        let step = self.params.move_magnitude;
        let next = Planar {
            x: position.x + self.direction.x * step,
            z: position.z + self.direction.z * step,
        };
        self.position = Some(next);
        let next_cell = next.cell();
        if !graph.within_board(next_cell.x, next_cell.z) {
            return AgentStatus::Finished(Termination::LeftBoard);
        }
        if self.tokens == 0 {
            return AgentStatus::Finished(Termination::TokensExhausted);
        }
        AgentStatus::Active
    }

    fn position(&self) -> Option<GridPos> {
        self.position.map(Planar::cell)
    }

    fn tokens(&self) -> u32 {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_test_utils::{
        bumpy_heights, cone_heights, flat_graph, graph_from_heights, ramp_heights, test_rng,
        MockTerrain,
    };

    fn variance(values: &[f32]) -> f32 {
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
    }

    #[test]
    fn climb_reaches_cone_peak() {
        let g = graph_from_heights(9, 9, &cone_heights(9, 9, 10.0));
        let start = g.id_at(0, 0).unwrap();
        let peak = PlainAgent::climb(&g, start, 64);
        assert_eq!(g.vertex(peak).cell(), GridPos::new(4, 4));
    }

    #[test]
    fn climb_respects_limit() {
        let g = graph_from_heights(9, 1, &ramp_heights(9, 1, 1.0));
        let start = g.id_at(0, 0).unwrap();
        let peak = PlainAgent::climb(&g, start, 3);
        assert_eq!(g.vertex(peak).cell(), GridPos::new(3, 0));
    }

    #[test]
    fn climb_stays_on_flat_ground() {
        let g = flat_graph(4, 4);
        let start = g.id_at(1, 2).unwrap();
        assert_eq!(PlainAgent::climb(&g, start, 10), start);
    }

    #[test]
    fn zero_tokens_finishes_without_mutation() {
        let heights = bumpy_heights(8, 8, 5.0, 1);
        let terrain = MockTerrain::new(8, 8, heights.clone());
        let mut graph = graph_from_heights(8, 8, &heights);
        let mut rng = test_rng(1);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = PlainAgent::new(PlainParams {
            tokens: 0,
            ..PlainParams::default()
        });
        agent.initialize(&mut ctx);
        assert_eq!(
            agent.update(&mut ctx),
            AgentStatus::Finished(Termination::TokensExhausted)
        );
        assert_eq!(graph.heights(), heights);
    }

    #[test]
    fn smoothing_reduces_local_variance() {
        let heights = bumpy_heights(11, 11, 8.0, 2);
        let terrain = MockTerrain::new(11, 11, heights.clone());
        let mut graph = graph_from_heights(11, 11, &heights);
        let mut rng = test_rng(2);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = PlainAgent::new(PlainParams {
            smoothing: 0.8,
            move_magnitude: 0.0,
            switch_direction_chance: 0.0,
            area_of_effect: 3.0,
            ..PlainParams::default()
        });
        agent.place(GridPos::new(5, 5), 0.0);
        agent.update(&mut ctx);
        let cells = footprint(&graph, GridPos::new(5, 5), 3.0);
        let before: Vec<f32> = cells.iter().map(|(id, _)| heights[id.index()]).collect();
        let after: Vec<f32> = cells
            .iter()
            .map(|(id, _)| graph.vertex(*id).height())
            .collect();
        assert!(variance(&after) < variance(&before));
    }

    #[test]
    fn walks_off_the_board() {
        let heights = vec![0.0; 100];
        let terrain = MockTerrain::new(10, 10, heights.clone());
        let mut graph = graph_from_heights(10, 10, &heights);
        let mut rng = test_rng(3);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = PlainAgent::new(PlainParams {
            tokens: 100,
            move_magnitude: 2.0,
            switch_direction_chance: 0.0,
            ..PlainParams::default()
        });
        // Heading +x from (5, 5): (7, 5), (9, 5), then (11, 5) is off-board.
        agent.place(GridPos::new(5, 5), 0.0);
        assert_eq!(agent.update(&mut ctx), AgentStatus::Active);
        assert_eq!(agent.update(&mut ctx), AgentStatus::Active);
        assert_eq!(
            agent.update(&mut ctx),
            AgentStatus::Finished(Termination::LeftBoard)
        );
        assert_eq!(agent.tokens(), 97);
    }

    #[test]
    fn initialize_starts_at_a_local_peak() {
        let heights = cone_heights(15, 15, 10.0);
        let terrain = MockTerrain::new(15, 15, heights.clone());
        let mut graph = graph_from_heights(15, 15, &heights);
        let mut rng = test_rng(4);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = PlainAgent::new(PlainParams::default());
        assert_eq!(agent.initialize(&mut ctx), AgentStatus::Active);
        assert_eq!(agent.position(), Some(GridPos::new(7, 7)));
    }

    #[test]
    fn randomize_stays_in_ranges() {
        let mut rng = test_rng(5);
        let mut p = PlainParams::default();
        for _ in 0..100 {
            p.randomize(&mut rng);
            assert!((50..200).contains(&p.tokens));
            assert!((0.01..1.0).contains(&p.smoothing));
            assert!((1.0..3.0).contains(&p.move_magnitude));
            assert!((0.01..0.3).contains(&p.switch_direction_chance));
            assert!((5.0..15.0).contains(&p.area_of_effect));
            assert!(p.validate().is_ok());
        }
    }
}
