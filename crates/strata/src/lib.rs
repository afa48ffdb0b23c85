//! Strata: agent-based procedural terrain sculpting.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Strata sub-crates. For most users, adding `strata` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // A seeded 48×48 noise terrain.
//! let config = TerrainConfig::new(48, 48).with_noise(NoiseConfig::seeded(3));
//! let mut terrain = TerrainMap::from_noise(&config).unwrap();
//!
//! // Smooth the plains, then wear the mountains down.
//! let system_config = SystemConfig::seeded(42).with_phases(vec![
//!     PhaseConfig::of_kind(AgentKind::Plain, 8, 4),
//!     PhaseConfig::of_kind(AgentKind::Erosion, 16, 4),
//! ]);
//! let mut system = AgentSystem::new(system_config).unwrap();
//! let report = system.execute(&mut terrain).unwrap();
//! assert_eq!(report.phases.len(), 2);
//! assert_eq!(system.state(), SystemState::Done);
//!
//! // The sculpted graph is still available for routing.
//! let mut graph = system.graph().unwrap().clone();
//! let start = graph.id_at(0, 0).unwrap();
//! let goal = graph.id_at(47, 47).unwrap();
//! let path = PathAlgorithm::AStar.find(&mut graph, start, goal, None);
//! assert!(path.reached_goal());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Grid ids, positions, terrain bands, `TerrainSurface`, errors |
//! | [`graph`] | `strata-graph` | Grid graph, priority queues, BFS/DFS/Dijkstra/A* |
//! | [`noise`] | `strata-noise` | Seedable Perlin noise and octave height fields |
//! | [`agent`] | `strata-agent` | Agent trait, context, params contract, sculpting helpers |
//! | [`agents`] | `strata-agents` | Erosion, plain, and river agents |
//! | [`engine`] | `strata-engine` | Terrain map, phase scheduler, surveys |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the terrain contract (`strata-core`).
///
/// Contains [`types::GridPos`], [`types::VertexId`], [`types::Position`],
/// band classification, and the [`types::TerrainSurface`] trait.
pub use strata_core as types;

/// Grid graph and pathfinding (`strata-graph`).
///
/// [`graph::Graph`] stores vertices in a row-major arena; searches return a
/// [`graph::Path`].
pub use strata_graph as graph;

/// Noise generation (`strata-noise`).
pub use strata_noise as noise;

/// The agent contract (`strata-agent`).
///
/// Implement [`agent::Agent`] to add a new sculpting behaviour.
pub use strata_agent as agent;

/// Concrete agents (`strata-agents`).
pub use strata_agents as agents;

/// Scheduler, terrain map, and surveys (`strata-engine`).
pub use strata_engine as engine;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strata_core::{
        BandThresholds, GridPos, Position, TerrainBand, TerrainSurface, VertexId,
    };

    // Errors
    pub use strata_core::{GraphError, TerrainError};
    pub use strata_engine::{ConfigError, SystemError};
    pub use strata_noise::NoiseError;

    // Graph
    pub use strata_graph::{Connectivity, Graph, Path, PathAlgorithm, PriorityQueue};

    // Noise
    pub use strata_noise::{NoiseConfig, Octave, PerlinNoise};

    // Agents
    pub use strata_agent::{Agent, AgentContext, AgentKind, AgentParams, AgentStatus, DiminishCurve};
    pub use strata_agents::{CategoryParams, ErosionParams, PlainParams, RiverParams};

    // Engine
    pub use strata_engine::{
        AgentSystem, PhaseConfig, ResyncPolicy, RunReport, SystemConfig, SystemState,
        TerrainConfig, TerrainMap, TerrainSurvey,
    };
}
