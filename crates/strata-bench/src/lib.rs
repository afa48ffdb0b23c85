//! Benchmark profiles for the Strata terrain framework.
//!
//! Provides pre-built configurations shared by the benches:
//!
//! - [`reference_terrain`]: 128x128 seeded noise terrain (16K cells)
//! - [`reference_system`]: the default plain, erosion, river pipeline
//! - [`stress_system`]: 4x the reference populations
//! - [`noise_graph`]: a graph over a seeded noise field, for search benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_agent::AgentKind;
use strata_engine::{PhaseConfig, SystemConfig, TerrainConfig};
use strata_graph::{Connectivity, Graph};
use strata_noise::{HeightField, NoiseConfig};

/// Side length of the reference terrain.
pub const REFERENCE_SIZE: u32 = 128;

/// A `REFERENCE_SIZE` square terrain with default octaves and `seed`.
pub fn reference_terrain(seed: u64) -> TerrainConfig {
    TerrainConfig::new(REFERENCE_SIZE, REFERENCE_SIZE).with_noise(NoiseConfig::seeded(seed))
}

/// Plain, erosion, and river phases at their default populations.
pub fn reference_system(seed: u64) -> SystemConfig {
    SystemConfig::seeded(seed)
}

/// The reference pipeline with four times the agents and slots.
pub fn stress_system(seed: u64) -> SystemConfig {
    SystemConfig::seeded(seed).with_phases(vec![
        PhaseConfig::of_kind(AgentKind::Plain, 256, 64),
        PhaseConfig::of_kind(AgentKind::Erosion, 1024, 128),
        PhaseConfig::of_kind(AgentKind::River, 32, 16),
    ])
}

/// An 8-connected graph over a seeded `size * size` noise field.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn noise_graph(size: u32, seed: u64) -> Graph {
    let field = HeightField::generate(size, size, &NoiseConfig::seeded(seed))
        .expect("benchmark noise field");
    let mut graph = Graph::new(size, size, Connectivity::Eight).expect("benchmark graph");
    graph
        .set_heights(field.heights())
        .expect("field matches graph");
    graph
}
