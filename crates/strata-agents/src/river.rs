//! River agents: channel carvers.
//!
//! A river agent picks a beach cell and a mountain cell, searches a route
//! between them, then walks it from the mountain end down to the beach,
//! one vertex per step. Each step cuts the route cell by `depth`, never
//! leaving it higher than the cell carved before it, and lowers the banks
//! within the area of effect by a diminishing amount. Carved route cells
//! are never touched again, so the finished channel descends monotonically.

use std::collections::HashSet;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strata_agent::params::check_range;
use strata_agent::sculpt::footprint;
use strata_agent::{
    Agent, AgentContext, AgentKind, AgentParams, AgentStatus, DiminishCurve, Termination,
};
use strata_core::{GridPos, TerrainBand, VertexId};
use strata_graph::PathAlgorithm;

/// Tuning for [`RiverAgent`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverParams {
    /// Steps per agent; a route longer than this is carved only partway.
    /// Default: 400.
    pub tokens: u32,
    /// Height cut from each route cell. Default: 0.05.
    pub depth: f32,
    /// Bank radius in cells. Default: 2.
    pub area_of_effect: f32,
    /// Bank falloff. Default: [`DiminishCurve::Linear`].
    pub diminish: DiminishCurve,
    /// Route search. Default: [`PathAlgorithm::AStar`].
    pub algorithm: PathAlgorithm,
    /// Expansion cap for the route search; `None` searches the whole
    /// graph. Default: 100 000.
    pub max_search_steps: Option<usize>,
}

impl Default for RiverParams {
    fn default() -> Self {
        Self {
            tokens: 400,
            depth: 0.05,
            area_of_effect: 2.0,
            diminish: DiminishCurve::Linear,
            algorithm: PathAlgorithm::AStar,
            max_search_steps: Some(100_000),
        }
    }
}

impl AgentParams for RiverParams {
    fn tokens(&self) -> u32 {
        self.tokens
    }

    fn area_of_effect(&self) -> f32 {
        self.area_of_effect
    }

    fn validate(&self) -> Result<(), String> {
        check_range("depth", self.depth, 0.0, f32::MAX)?;
        check_range("area_of_effect", self.area_of_effect, 0.0, 1024.0)
    }

    fn randomize(&mut self, rng: &mut dyn RngCore) {
        self.tokens = rng.random_range(100..600);
        self.depth = rng.random_range(0.01..0.2);
        self.area_of_effect = rng.random_range(1..4) as f32;
    }
}

/// A mountain-to-beach channel carver.
#[derive(Clone, Debug)]
pub struct RiverAgent {
    params: RiverParams,
    tokens: u32,
    /// Route from the mountain end to the beach end.
    route: Vec<VertexId>,
    cursor: usize,
    carved: HashSet<VertexId>,
    last_carved: Option<f32>,
    cell: Option<GridPos>,
}

impl RiverAgent {
    /// A fresh agent with its own copy of `params`.
    pub fn new(params: RiverParams) -> Self {
        Self {
            tokens: params.tokens,
            params,
            route: Vec::new(),
            cursor: 0,
            carved: HashSet::new(),
            last_carved: None,
            cell: None,
        }
    }

    /// The agent's params.
    pub fn params(&self) -> &RiverParams {
        &self.params
    }

    /// The route being carved, mountain end first.
    pub fn route(&self) -> &[VertexId] {
        &self.route
    }

    /// Search a route from `beach` to `mountain` and store it reversed.
    /// Returns `false` when the search did not reach the mountain.
    pub fn plan(&mut self, ctx: &mut AgentContext<'_>, beach: GridPos, mountain: GridPos) -> bool {
        let graph = ctx.graph_mut();
        let (Some(start), Some(goal)) = (
            graph.id_at(beach.x, beach.z),
            graph.id_at(mountain.x, mountain.z),
        ) else {
            return false;
        };
        let path = self
            .params
            .algorithm
            .find(graph, start, goal, self.params.max_search_steps);
        if !path.reached_goal() {
            return false;
        }
        self.route = path.into_vec();
        self.route.reverse();
        self.cursor = 0;
        self.carved.clear();
        self.last_carved = None;
        self.cell = Some(mountain);
        true
    }
}

impl Agent for RiverAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::River
    }

    fn initialize(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus {
        let ends = {
            let (_, terrain, rng) = ctx.parts();
            let beach = terrain.random_in_band(TerrainBand::Beach, rng);
            let mountain = terrain.random_in_band(TerrainBand::Mountain, rng);
            beach.zip(mountain)
        };
        match ends {
            Some((beach, mountain)) if self.plan(ctx, beach, mountain) => AgentStatus::Active,
            _ => AgentStatus::Finished(Termination::NoStart),
        }
    }

    fn update(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus {
        let Some(&id) = self.route.get(self.cursor) else {
            return if self.route.is_empty() {
                AgentStatus::Finished(Termination::NoStart)
            } else {
                AgentStatus::Finished(Termination::PathComplete)
            };
        };
        if self.tokens == 0 {
            return AgentStatus::Finished(Termination::TokensExhausted);
        }
        self.tokens -= 1;

        let graph = ctx.graph_mut();
        let cell = graph.vertex(id).cell();
        let mut bed = graph.vertex(id).height() - self.params.depth;
        if let Some(prev) = self.last_carved {
            bed = bed.min(prev);
        }
        graph.set_height(id, bed);
        self.carved.insert(id);

        let radius = self.params.area_of_effect;
        for (bank, d) in footprint(graph, cell, radius) {
            if self.carved.contains(&bank) {
                continue;
            }
            let cut = self.params.depth * self.params.diminish.at_distance(d, radius);
            graph.adjust_height(bank, -cut);
        }

        self.last_carved = Some(bed);
        self.cell = Some(cell);
        self.cursor += 1;

        if self.cursor == self.route.len() {
            return AgentStatus::Finished(Termination::PathComplete);
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
