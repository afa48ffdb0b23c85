//! Engine configuration: terrain generation, phases, and the run itself.
//!
//! Every struct here is plain data with tuned defaults and a `validate()`
//! pass. Validation is cheap and runs again at construction, so a config
//! loaded from disk can be checked before anything is allocated.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use strata_agent::AgentKind;
use strata_agents::CategoryParams;
use strata_core::{BandThresholds, GraphError};
use strata_graph::Connectivity;
use strata_noise::{NoiseConfig, NoiseError};

// ── ConfigError ────────────────────────────────────────────────

/// Errors detected while validating engine configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Terrain has a zero dimension.
    EmptyTerrain {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Band thresholds are out of order or non-finite.
    InvalidThresholds {
        /// Description of the violation.
        reason: String,
    },
    /// A phase's agent params failed validation.
    InvalidParams {
        /// Index of the phase in [`SystemConfig::phases`].
        phase: usize,
        /// Description of the violation.
        reason: String,
    },
    /// Survey histogram resolution is zero or too fine to allocate.
    HistogramBins {
        /// Configured bins per axis.
        bins: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// Graph construction rejected the terrain.
    Graph(GraphError),
    /// Noise configuration is invalid.
    Noise(NoiseError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTerrain { width, height } => {
                write!(f, "terrain has no cells ({width}x{height})")
            }
            Self::InvalidThresholds { reason } => write!(f, "invalid band thresholds: {reason}"),
            Self::InvalidParams { phase, reason } => {
                write!(f, "phase {phase}: invalid agent params: {reason}")
            }
            Self::HistogramBins { bins, max } => {
                write!(f, "histogram bins must be in 1..={max}, got {bins}")
            }
            Self::Graph(e) => write!(f, "graph: {e}"),
            Self::Noise(e) => write!(f, "noise: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            Self::Noise(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for ConfigError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl From<NoiseError> for ConfigError {
    fn from(e: NoiseError) -> Self {
        Self::Noise(e)
    }
}

// ── TerrainConfig ──────────────────────────────────────────────

/// How to generate a [`TerrainMap`](crate::TerrainMap) from noise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells along `x`. Default: 128.
    pub width: u32,
    /// Cells along `z`. Default: 128.
    pub height: u32,
    /// Octave stack sampled at every cell.
    pub noise: NoiseConfig,
    /// Band boundaries as height fractions.
    pub thresholds: BandThresholds,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            noise: NoiseConfig::default(),
            thresholds: BandThresholds::default(),
        }
    }
}

impl TerrainConfig {
    /// A `width * height` terrain with default noise and bands.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Replace the noise config.
    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = noise;
        self
    }

    /// Replace the band thresholds.
    pub fn with_thresholds(mut self, thresholds: BandThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Check dimensions, thresholds, and noise parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyTerrain {
                width: self.width,
                height: self.height,
            });
        }
        self.thresholds
            .validate()
            .map_err(|reason| ConfigError::InvalidThresholds { reason })?;
        self.noise.validate()?;
        Ok(())
    }
}

// ── PhaseConfig ────────────────────────────────────────────────

/// One scheduler phase: a population of agents of a single category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Category params copied into every spawned agent.
    pub params: CategoryParams,
    /// Agents spawned for the phase. Zero skips the phase.
    pub population: u32,
    /// Agents stepped per scheduler tick. Zero skips the phase.
    ///
    /// This slot budget is independent of each agent's own tokens: it
    /// bounds how many agents move per tick, not how far any one moves.
    pub concurrency: u32,
    /// Redraw each spawned agent's params from the category's ranges.
    /// Default: `false`.
    #[serde(default)]
    pub randomize_params: bool,
}

impl PhaseConfig {
    /// A phase with explicit params.
    pub fn new(params: impl Into<CategoryParams>, population: u32, concurrency: u32) -> Self {
        Self {
            params: params.into(),
            population,
            concurrency,
            randomize_params: false,
        }
    }

    /// Default params for `kind` with the given counts.
    pub fn of_kind(kind: AgentKind, population: u32, concurrency: u32) -> Self {
        Self::new(CategoryParams::default_for(kind), population, concurrency)
    }

    /// Turn per-agent param randomization on or off.
    pub fn randomized(mut self, on: bool) -> Self {
        self.randomize_params = on;
        self
    }

    /// The phase's agent category.
    pub fn kind(&self) -> AgentKind {
        self.params.kind()
    }

    /// Whether the scheduler will skip this phase.
    pub fn is_skipped(&self) -> bool {
        self.population == 0 || self.concurrency == 0
    }
}

// ── SystemConfig ───────────────────────────────────────────────

/// When the graph's heights are written back to the terrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResyncPolicy {
    /// After every phase, so later phases pick start cells from the
    /// sculpted terrain's bands.
    #[default]
    EveryPhase,
    /// Once, after the last phase.
    AtEnd,
}

/// Complete configuration for an [`AgentSystem`](crate::AgentSystem).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Seed for the system's RNG. Default: 0.
    pub seed: u64,
    /// Graph adjacency. Default: [`Connectivity::Eight`].
    pub connectivity: Connectivity,
    /// Write-back policy. Default: [`ResyncPolicy::EveryPhase`].
    pub resync: ResyncPolicy,
    /// Phases in run order. Default: plain, erosion, river.
    pub phases: Vec<PhaseConfig>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            connectivity: Connectivity::Eight,
            resync: ResyncPolicy::EveryPhase,
            phases: vec![
                PhaseConfig::of_kind(AgentKind::Plain, 64, 16),
                PhaseConfig::of_kind(AgentKind::Erosion, 256, 32),
                PhaseConfig::of_kind(AgentKind::River, 8, 4),
            ],
        }
    }
}

impl SystemConfig {
    /// Default config with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Replace the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the phase list.
    pub fn with_phases(mut self, phases: Vec<PhaseConfig>) -> Self {
        self.phases = phases;
        self
    }

    /// Replace the write-back policy.
    pub fn with_resync(mut self, resync: ResyncPolicy) -> Self {
        self.resync = resync;
        self
    }

    /// Replace the graph adjacency.
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Validate every phase's params.
    ///
    /// Zero population and zero concurrency are valid; those phases are
    /// skipped at run time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (phase, p) in self.phases.iter().enumerate() {
            p.params
                .validate()
                .map_err(|reason| ConfigError::InvalidParams { phase, reason })?;
        }
        Ok(())
    }
}
