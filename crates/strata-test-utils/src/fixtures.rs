//! Reusable agent test fixtures.
//!
//! - [`ScriptedAgent`]: runs a fixed number of steps, optionally lowering
//!   its cell, and records how often it was stepped.
//! - [`NoStartAgent`]: fails to initialize.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use strata_agent::{Agent, AgentContext, AgentKind, AgentStatus, Termination};
use strata_core::GridPos;

/// Steps `steps` times, then finishes with `TokensExhausted`.
///
/// Each step lowers the vertex at `cell` by `dig` (0 leaves the graph
/// untouched). Every `update` call increments the shared counter, so a test
/// can observe scheduler behaviour after the agent has been dropped.
pub struct ScriptedAgent {
    pub kind: AgentKind,
    pub cell: GridPos,
    pub dig: f32,
    remaining: u32,
    updates: Arc<AtomicUsize>,
}

impl ScriptedAgent {
    pub fn new(kind: AgentKind, steps: u32, updates: Arc<AtomicUsize>) -> Self {
        Self {
            kind,
            cell: GridPos::new(0, 0),
            dig: 0.0,
            remaining: steps,
            updates,
        }
    }

    /// Lower `cell` by `dig` each step.
    pub fn digging(mut self, cell: GridPos, dig: f32) -> Self {
        self.cell = cell;
        self.dig = dig;
        self
    }

    /// A fresh shared update counter.
    pub fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    /// Read a shared counter.
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::Relaxed)
    }
}

impl Agent for ScriptedAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    fn initialize(&mut self, _ctx: &mut AgentContext<'_>) -> AgentStatus {
        AgentStatus::Active
    }

    fn update(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus {
        self.updates.fetch_add(1, Ordering::Relaxed);
        if self.remaining == 0 {
            return AgentStatus::Finished(Termination::TokensExhausted);
        }
        self.remaining -= 1;
        if self.dig != 0.0 {
            if let Some(id) = ctx.graph().id_at(self.cell.x, self.cell.z) {
                ctx.graph_mut().adjust_height(id, -self.dig);
            }
        }
        if self.remaining == 0 {
            AgentStatus::Finished(Termination::TokensExhausted)
        } else {
            AgentStatus::Active
        }
    }

    fn position(&self) -> Option<GridPos> {
        Some(self.cell)
    }

    fn tokens(&self) -> u32 {
        self.remaining
    }
}

/// Always finishes with `NoStart` at initialization.
pub struct NoStartAgent {
    pub kind: AgentKind,
}

impl Agent for NoStartAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    fn initialize(&mut self, _ctx: &mut AgentContext<'_>) -> AgentStatus {
        AgentStatus::Finished(Termination::NoStart)
    }

    fn update(&mut self, _ctx: &mut AgentContext<'_>) -> AgentStatus {
        AgentStatus::Finished(Termination::NoStart)
    }

    fn position(&self) -> Option<GridPos> {
        None
    }

    fn tokens(&self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flat_graph, flat_heights, test_rng, MockTerrain};

    #[test]
    fn scripted_agent_digs_and_finishes() {
        let mut graph = flat_graph(3, 3);
        let terrain = MockTerrain::new(3, 3, flat_heights(3, 3, 0.0));
        let mut rng = test_rng(0);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let counter = ScriptedAgent::counter();
        let mut agent =
            ScriptedAgent::new(AgentKind::Erosion, 2, counter.clone()).digging(GridPos::new(1, 1), 0.5);
        assert_eq!(agent.initialize(&mut ctx), AgentStatus::Active);
        assert_eq!(agent.update(&mut ctx), AgentStatus::Active);
        assert!(agent.update(&mut ctx).is_finished());
        assert_eq!(ScriptedAgent::count(&counter), 2);
        assert_eq!(graph.height_at(1, 1), Some(-1.0));
    }
}
