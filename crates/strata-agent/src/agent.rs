//! The [`Agent`] trait and its step outcome types.

use crate::context::AgentContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use strata_core::{GridPos, TerrainBand};

/// Agent category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// Downhill walker that wears terrain away.
    Erosion,
    /// Smoother that flattens towards the local mean.
    Plain,
    /// Carver that cuts a descending channel from mountain to beach.
    River,
}

impl AgentKind {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Erosion => "erosion",
            AgentKind::Plain => "plain",
            AgentKind::River => "river",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an agent stopped.
///
/// None of these is an error: a stuck or unplaceable agent is an ordinary
/// outcome the scheduler counts and moves past.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The token budget reached zero.
    TokensExhausted,
    /// The agent moved onto a terminal band.
    ReachedBand(TerrainBand),
    /// No viable next vertex.
    Stuck,
    /// The agent walked off the grid.
    LeftBoard,
    /// No valid starting position (empty band, no path).
    NoStart,
    /// A precomputed route was fully processed.
    PathComplete,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokensExhausted => f.write_str("tokens exhausted"),
            Self::ReachedBand(band) => write!(f, "reached {band}"),
            Self::Stuck => f.write_str("stuck"),
            Self::LeftBoard => f.write_str("left board"),
            Self::NoStart => f.write_str("no start"),
            Self::PathComplete => f.write_str("path complete"),
        }
    }
}

/// Result of [`Agent::initialize`] or [`Agent::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentStatus {
    /// The agent wants more steps.
    Active,
    /// The agent is done and should be removed.
    Finished(Termination),
}

impl AgentStatus {
    /// Whether the agent is done.
    pub fn is_finished(self) -> bool {
        matches!(self, AgentStatus::Finished(_))
    }

    /// The termination reason, if finished.
    pub fn termination(self) -> Option<Termination> {
        match self {
            AgentStatus::Active => None,
            AgentStatus::Finished(t) => Some(t),
        }
    }
}

/// A stateful walker that locally reshapes the terrain graph.
///
/// # Contract
///
/// - `initialize()` is called exactly once, before any `update()`. It picks
///   the starting position and may finish the agent immediately (for
///   instance [`Termination::NoStart`]).
/// - `update()` performs one step. An agent with no tokens left returns
///   [`Termination::TokensExhausted`] without touching the graph.
/// - Every random draw goes through [`AgentContext::rng`].
///
/// # Object safety
///
/// This trait is object-safe; the scheduler holds `Vec<Box<dyn Agent>>`.
pub trait Agent {
    /// Category of this agent.
    fn kind(&self) -> AgentKind;

    /// Choose a starting position.
    fn initialize(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus;

    /// Perform one step.
    fn update(&mut self, ctx: &mut AgentContext<'_>) -> AgentStatus;

    /// Current grid cell, or `None` before initialization.
    fn position(&self) -> Option<GridPos>;

    /// Remaining token budget.
    fn tokens(&self) -> u32;
}
