//! Strata Quickstart: sculpt a noise terrain end to end.
//!
//! Demonstrates:
//!   1. Generating a seeded noise terrain
//!   2. Configuring plain, erosion, and river phases
//!   3. Running the agent system and reading its report
//!   4. Surveying the result and routing across it
//!
//! Run with:
//!   RUST_LOG=info cargo run --example quickstart

use strata_agent::AgentKind;
use strata_core::{TerrainBand, TerrainSurface};
use strata_engine::{AgentSystem, PhaseConfig, SystemConfig, TerrainConfig, TerrainMap, TerrainSurvey};
use strata_graph::PathAlgorithm;
use strata_noise::NoiseConfig;

// ─── Terrain parameters ─────────────────────────────────────────

const WIDTH: u32 = 96;
const HEIGHT: u32 = 96;
const TERRAIN_SEED: u64 = 0x5EED;
const SYSTEM_SEED: u64 = 42;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn print_survey(label: &str, terrain: &dyn TerrainSurface) {
    let s = TerrainSurvey::of(terrain);
    println!(
        "{label:>7}: mean {:.3}  ocean {:.1}%  linearity {:.3}  bands [ocean {} beach {} plain {} mountain {}]",
        s.mean_elevation,
        s.ocean_coverage * 100.0,
        s.linearity,
        terrain.band_cells(TerrainBand::Ocean).len(),
        terrain.band_cells(TerrainBand::Beach).len(),
        terrain.band_cells(TerrainBand::Plain).len(),
        terrain.band_cells(TerrainBand::Mountain).len(),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    println!("=== Strata Quickstart ===\n");

    // 1. Noise terrain.
    let terrain_config =
        TerrainConfig::new(WIDTH, HEIGHT).with_noise(NoiseConfig::seeded(TERRAIN_SEED));
    let mut terrain = TerrainMap::from_noise(&terrain_config)?;
    print_survey("before", &terrain);

    // 2. Phases run in order; each finishes before the next starts.
    let config = SystemConfig::seeded(SYSTEM_SEED).with_phases(vec![
        PhaseConfig::of_kind(AgentKind::Plain, 32, 8),
        PhaseConfig::of_kind(AgentKind::Erosion, 128, 16).randomized(true),
        PhaseConfig::of_kind(AgentKind::River, 6, 2),
    ]);

    // 3. Run.
    let mut system = AgentSystem::new(config)?;
    let report = system.execute(&mut terrain)?;
    println!();
    for (i, phase) in report.phases.iter().enumerate() {
        println!(
            "phase {i} {:<8} spawned {:>4}  no-start {:>3}  ticks {:>6}  steps {:>7}  {} us",
            phase.kind.to_string(),
            phase.spawned,
            phase.failed_to_start,
            phase.ticks,
            phase.agent_steps,
            phase.elapsed_us,
        );
    }
    println!();
    print_survey("after", &terrain);

    // 4. Route from one corner to the other over the sculpted graph.
    if let Some(graph) = system.graph() {
        let mut graph = graph.clone();
        let start = graph.id_at(0, 0);
        let goal = graph.id_at(WIDTH as i32 - 1, HEIGHT as i32 - 1);
        if let (Some(start), Some(goal)) = (start, goal) {
            for algorithm in PathAlgorithm::ALL {
                let path = algorithm.find(&mut graph, start, goal, None);
                println!(
                    "{algorithm:?}: {} vertices, cost {:.2}",
                    path.len(),
                    path.cost(&graph)
                );
            }
        }
    }

    println!("\n=== Done ===");
    Ok(())
}
