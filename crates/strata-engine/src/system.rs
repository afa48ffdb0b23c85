//! The phase scheduler.
//!
//! [`AgentSystem`] copies a terrain's heights into a [`Graph`], then runs
//! each configured phase to completion in order. A phase spawns its whole
//! population up front and initializes every agent, then ticks: each tick
//! visits the live agents from the back of the population toward the
//! front and steps at most `concurrency` of them, dropping any that
//! finish. The phase ends when no agent is left.
//!
//! # State machine
//!
//! ```text
//! Idle ──build_graph──▶ GraphBuilt ──run_phase──▶ PhaseRunning(i) ──▶ … ──▶ Done
//!   ▲                                                                          │
//!   └──────────────────────────────── reset ◀──────────────────────────────────┘
//! ```
//!
//! Everything runs on the calling thread. Agents step one at a time, and
//! each step finishes before the next begins.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strata_agent::{Agent, AgentContext, AgentKind, AgentStatus};
use strata_core::{GraphError, TerrainError, TerrainSurface};
use strata_graph::Graph;
use tracing::{debug, info, trace};

use crate::config::{ConfigError, PhaseConfig, ResyncPolicy, SystemConfig};
use crate::metrics::{PhaseReport, RunReport};

// ── SystemState ────────────────────────────────────────────────

/// Where an [`AgentSystem`] is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemState {
    /// No graph yet.
    Idle,
    /// Graph built, no phase run.
    GraphBuilt,
    /// Phase `i` is the most recent phase run.
    PhaseRunning(usize),
    /// Every phase has run.
    Done,
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::GraphBuilt => f.write_str("graph built"),
            Self::PhaseRunning(i) => write!(f, "running phase {i}"),
            Self::Done => f.write_str("done"),
        }
    }
}

// ── SystemError ────────────────────────────────────────────────

/// Errors from driving an [`AgentSystem`].
#[derive(Debug, PartialEq)]
pub enum SystemError {
    /// The operation is not allowed in the current state.
    InvalidState {
        /// Operation attempted.
        operation: &'static str,
        /// State at the time.
        state: SystemState,
    },
    /// The terrain does not match the graph the system built.
    TerrainMismatch {
        /// Graph dimensions.
        graph: (u32, u32),
        /// Terrain dimensions.
        terrain: (u32, u32),
    },
    /// Configuration failed validation.
    Config(ConfigError),
    /// Graph construction failed.
    Graph(GraphError),
    /// The terrain rejected the write-back.
    Terrain(TerrainError),
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState { operation, state } => {
                write!(f, "cannot {operation} while {state}")
            }
            Self::TerrainMismatch { graph, terrain } => write!(
                f,
                "terrain is {}x{} but the graph is {}x{}",
                terrain.0, terrain.1, graph.0, graph.1
            ),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Graph(e) => write!(f, "graph: {e}"),
            Self::Terrain(e) => write!(f, "terrain: {e}"),
        }
    }
}

impl Error for SystemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Graph(e) => Some(e),
            Self::Terrain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SystemError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GraphError> for SystemError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl From<TerrainError> for SystemError {
    fn from(e: TerrainError) -> Self {
        Self::Terrain(e)
    }
}

// ── AgentSystem ────────────────────────────────────────────────

/// Runs agent phases over a graph built from a terrain.
///
/// One `ChaCha8Rng`, seeded from [`SystemConfig::seed`], drives every
/// random decision: param randomization, agent start cells, and each
/// agent's choices. Equal configs over equal terrains give bit-identical
/// results.
///
/// # Example
///
/// ```
/// use strata_engine::{AgentSystem, SystemConfig, TerrainConfig, TerrainMap};
/// use strata_engine::PhaseConfig;
/// use strata_agent::AgentKind;
///
/// let mut terrain = TerrainMap::from_noise(&TerrainConfig::new(32, 32)).unwrap();
/// let config = SystemConfig::seeded(7).with_phases(vec![
///     PhaseConfig::of_kind(AgentKind::Erosion, 8, 4),
/// ]);
/// let mut system = AgentSystem::new(config).unwrap();
/// let report = system.execute(&mut terrain).unwrap();
/// assert_eq!(report.phases.len(), 1);
/// ```
pub struct AgentSystem {
    config: SystemConfig,
    rng: ChaCha8Rng,
    graph: Option<Graph>,
    state: SystemState,
    next_phase: usize,
}

impl AgentSystem {
    /// Validate `config` and create an idle system.
    pub fn new(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            graph: None,
            state: SystemState::Idle,
            next_phase: 0,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// The current seed.
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Current state.
    pub fn state(&self) -> SystemState {
        self.state
    }

    /// The graph, once built.
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    /// Index of the next phase [`run_phase`](Self::run_phase) will run.
    pub fn next_phase(&self) -> usize {
        self.next_phase
    }

    /// Return to `Idle` with a new seed, dropping the graph.
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.graph = None;
        self.state = SystemState::Idle;
        self.next_phase = 0;
    }

    /// Copy `terrain`'s heights into a fresh graph.
    ///
    /// # Errors
    ///
    /// [`SystemError::InvalidState`] unless idle; [`SystemError::Graph`]
    /// if the terrain's dimensions or heights are unusable.
    pub fn build_graph(&mut self, terrain: &dyn TerrainSurface) -> Result<(), SystemError> {
        self.expect_state("build the graph", |s| s == SystemState::Idle)?;
        let mut graph = Graph::new(terrain.width(), terrain.height(), self.config.connectivity)?;
        graph.set_heights(terrain.heights())?;
        info!(
            width = graph.width(),
            height = graph.height(),
            connectivity = ?self.config.connectivity,
            "graph built"
        );
        self.graph = Some(graph);
        self.state = SystemState::GraphBuilt;
        Ok(())
    }

    /// Run the next configured phase to completion.
    ///
    /// After the last phase the system moves to `Done`.
    ///
    /// # Errors
    ///
    /// [`SystemError::InvalidState`] before the graph is built or after
    /// every phase has run.
    pub fn run_phase(&mut self, terrain: &dyn TerrainSurface) -> Result<PhaseReport, SystemError> {
        self.expect_state("run a phase", |s| {
            matches!(s, SystemState::GraphBuilt | SystemState::PhaseRunning(_))
        })?;
        let index = self.next_phase;
        let Some(phase) = self.config.phases.get(index).copied() else {
            return Err(SystemError::InvalidState {
                operation: "run a phase",
                state: SystemState::Done,
            });
        };
        self.state = SystemState::PhaseRunning(index);

        let report = if phase.is_skipped() {
            debug!(
                phase = index,
                kind = %phase.kind(),
                population = phase.population,
                concurrency = phase.concurrency,
                "phase skipped"
            );
            PhaseReport::skipped(phase.kind())
        } else {
            info!(phase = index, kind = %phase.kind(), population = phase.population, "phase started");
            let agents = self.spawn(&phase);
            let report = self.run_agents(terrain, phase.kind(), agents, phase.concurrency)?;
            info!(
                phase = index,
                kind = %report.kind,
                ticks = report.ticks,
                steps = report.agent_steps,
                failed_to_start = report.failed_to_start,
                elapsed_us = report.elapsed_us,
                "phase finished"
            );
            report
        };

        self.next_phase += 1;
        if self.next_phase == self.config.phases.len() {
            self.state = SystemState::Done;
        }
        Ok(report)
    }

    /// Initialize `agents` and tick them until every one has finished.
    ///
    /// This is the loop behind [`run_phase`](Self::run_phase), exposed so
    /// hosts can schedule their own [`Agent`] implementations. It does not
    /// advance the phase index. A zero `concurrency` or an empty
    /// population returns a zero-tick report without touching the graph.
    ///
    /// # Errors
    ///
    /// [`SystemError::InvalidState`] when no graph is built or the system
    /// is done; [`SystemError::TerrainMismatch`] when `terrain` is not the
    /// size of the graph.
    pub fn run_agents(
        &mut self,
        terrain: &dyn TerrainSurface,
        kind: AgentKind,
        mut agents: Vec<Box<dyn Agent>>,
        concurrency: u32,
    ) -> Result<PhaseReport, SystemError> {
        self.expect_state("run agents", |s| {
            matches!(s, SystemState::GraphBuilt | SystemState::PhaseRunning(_))
        })?;
        let Some(graph) = self.graph.as_mut() else {
            return Err(SystemError::InvalidState {
                operation: "run agents",
                state: self.state,
            });
        };
        if (graph.width(), graph.height()) != (terrain.width(), terrain.height()) {
            return Err(SystemError::TerrainMismatch {
                graph: (graph.width(), graph.height()),
                terrain: (terrain.width(), terrain.height()),
            });
        }

        let spawned = u32::try_from(agents.len()).unwrap_or(u32::MAX);
        if agents.is_empty() || concurrency == 0 {
            return Ok(PhaseReport {
                spawned,
                ..PhaseReport::skipped(kind)
            });
        }

        let started_at = Instant::now();
        let mut ctx = AgentContext::new(graph, terrain, &mut self.rng);

        let mut failed_to_start = 0;
        agents.retain_mut(|agent| match agent.initialize(&mut ctx) {
            AgentStatus::Active => true,
            AgentStatus::Finished(why) => {
                debug!(kind = %kind, reason = %why, "agent failed to start");
                failed_to_start += 1;
                false
            }
        });

        let mut ticks = 0u64;
        let mut agent_steps = 0u64;
        while !agents.is_empty() {
            ticks += 1;
            let mut slots = concurrency;
            for i in (0..agents.len()).rev() {
                if slots == 0 {
                    break;
                }
                slots -= 1;
                agent_steps += 1;
                if let AgentStatus::Finished(why) = agents[i].update(&mut ctx) {
                    trace!(kind = %kind, reason = %why, tokens_left = agents[i].tokens(), "agent finished");
                    agents.remove(i);
                }
            }
        }

        Ok(PhaseReport {
            kind,
            spawned,
            failed_to_start,
            ticks,
            agent_steps,
            elapsed_us: u64::try_from(started_at.elapsed().as_micros()).unwrap_or(u64::MAX),
        })
    }

    /// Build the graph from `terrain`, run every phase, and write the
    /// sculpted heights back according to [`SystemConfig::resync`].
    ///
    /// With [`ResyncPolicy::EveryPhase`] the terrain is written after each
    /// phase, skipped phases included; with [`ResyncPolicy::AtEnd`] it is
    /// written once.
    ///
    /// # Errors
    ///
    /// [`SystemError::InvalidState`] unless idle; graph and write-back
    /// failures otherwise. Call [`reset`](Self::reset) to run again.
    pub fn execute(&mut self, terrain: &mut dyn TerrainSurface) -> Result<RunReport, SystemError> {
        self.build_graph(&*terrain)?;
        info!(
            seed = self.config.seed,
            phases = self.config.phases.len(),
            "run started"
        );
        let mut run = RunReport::default();
        while self.next_phase < self.config.phases.len() {
            run.phases.push(self.run_phase(&*terrain)?);
            if self.config.resync == ResyncPolicy::EveryPhase {
                self.write_back(terrain)?;
            }
        }
        if self.config.resync == ResyncPolicy::AtEnd {
            self.write_back(terrain)?;
        }
        self.state = SystemState::Done;
        info!(
            ticks = run.total_ticks(),
            steps = run.total_steps(),
            elapsed_us = run.elapsed_us(),
            "run finished"
        );
        Ok(run)
    }

    /// Copy the graph's heights into `terrain`.
    ///
    /// # Errors
    ///
    /// [`SystemError::InvalidState`] when no graph is built;
    /// [`SystemError::Terrain`] when the terrain rejects the heights.
    pub fn write_back(&self, terrain: &mut dyn TerrainSurface) -> Result<(), SystemError> {
        let Some(graph) = self.graph.as_ref() else {
            return Err(SystemError::InvalidState {
                operation: "write back",
                state: self.state,
            });
        };
        terrain.write_back(&graph.heights())?;
        Ok(())
    }

    fn spawn(&mut self, phase: &PhaseConfig) -> Vec<Box<dyn Agent>> {
        (0..phase.population)
            .map(|_| {
                let mut params = phase.params;
                if phase.randomize_params {
                    params.randomize(&mut self.rng);
                }
                params.spawn()
            })
            .collect()
    }

    fn expect_state(
        &self,
        operation: &'static str,
        allowed: impl Fn(SystemState) -> bool,
    ) -> Result<(), SystemError> {
        if allowed(self.state) {
            Ok(())
        } else {
            Err(SystemError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

impl fmt::Debug for AgentSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentSystem")
            .field("seed", &self.config.seed)
            .field("state", &self.state)
            .field("next_phase", &self.next_phase)
            .field("phases", &self.config.phases.len())
            .finish()
    }
}
