//! Agent behaviour over generated terrain.

use proptest::prelude::*;
use strata_agent::sculpt::footprint;
use strata_agent::{Agent, AgentContext, AgentKind, AgentParams, AgentStatus, Termination};
use strata_agents::{CategoryParams, ErosionAgent, ErosionParams};
use strata_core::{GridPos, TerrainSurface};
use strata_noise::{HeightField, NoiseConfig, Octave};
use strata_test_utils::{cone_heights, graph_from_heights, test_rng, MockTerrain};

fn noise_terrain(size: u32, seed: u64) -> (Vec<f32>, MockTerrain) {
    let cfg = NoiseConfig::seeded(seed).with_octaves(vec![
        Octave::new([0.0, 0.0], 10.0, 12.0),
        Octave::new([3.3, 7.7], 4.0, 5.0),
    ]);
    let field = HeightField::generate(size, size, &cfg).unwrap();
    let heights = field.into_heights();
    (heights.clone(), MockTerrain::new(size, size, heights))
}

// ── Token accounting ────────────────────────────────────────

#[test]
fn every_kind_finishes_within_its_budget() {
    let (heights, terrain) = noise_terrain(24, 11);
    for kind in [AgentKind::Erosion, AgentKind::Plain, AgentKind::River] {
        let mut graph = graph_from_heights(24, 24, &heights);
        let mut rng = test_rng(kind as u64);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let params = CategoryParams::default_for(kind);
        let budget = params.as_params().tokens();
        let mut agent = params.spawn();
        if agent.initialize(&mut ctx).is_finished() {
            continue;
        }
        let mut updates = 0;
        while !agent.update(&mut ctx).is_finished() {
            updates += 1;
            assert!(updates <= budget, "{kind} exceeded {budget} tokens");
        }
        assert!(graph.heights().iter().all(|h| h.is_finite()), "{kind}");
    }
}

#[test]
fn zero_tokens_never_mutate() {
    let (heights, terrain) = noise_terrain(20, 3);
    for kind in [AgentKind::Erosion, AgentKind::Plain, AgentKind::River] {
        let mut params = CategoryParams::default_for(kind);
        match &mut params {
            CategoryParams::Erosion(p) => p.tokens = 0,
            CategoryParams::Plain(p) => p.tokens = 0,
            CategoryParams::River(p) => p.tokens = 0,
        }
        let mut graph = graph_from_heights(20, 20, &heights);
        let mut rng = test_rng(9);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let mut agent = params.spawn();
        let init = agent.initialize(&mut ctx);
        let status = agent.update(&mut ctx);
        if !init.is_finished() {
            assert_eq!(status, AgentStatus::Finished(Termination::TokensExhausted));
        }
        assert_eq!(graph.heights(), heights, "{kind}");
    }
}

// ── Erosion ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn erosion_lowers_its_first_footprint(
        strength in 0.01f32..2.0,
        area in 0.0f32..6.0,
        steps in 1usize..20,
        seed in any::<u64>(),
    ) {
        let heights = cone_heights(17, 17, 25.0);
        let terrain = MockTerrain::new(17, 17, heights.clone());
        let mut graph = graph_from_heights(17, 17, &heights);
        let baseline = graph.clone();
        let mut rng = test_rng(seed);
        let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
        let params = ErosionParams { tokens: 100, strength, area_of_effect: area, ..ErosionParams::default() };
        let mut agent = ErosionAgent::new(params);
        let centre = GridPos::new(8, 8);
        agent.place(&ctx, centre);
        for _ in 0..steps {
            if agent.update(&mut ctx).is_finished() {
                break;
            }
        }
        let sum = |g: &strata_graph::Graph| -> f32 {
            footprint(g, centre, area).iter().map(|(id, _)| g.vertex(*id).height()).sum()
        };
        prop_assert!(sum(&graph) < sum(&baseline));
        prop_assert!(graph.heights().iter().zip(baseline.heights()).all(|(a, b)| a <= &b));
    }
}

#[test]
fn terrain_is_read_only_during_agent_steps() {
    let (heights, terrain) = noise_terrain(16, 5);
    let mut graph = graph_from_heights(16, 16, &heights);
    let mut rng = test_rng(5);
    let mut ctx = AgentContext::new(&mut graph, &terrain, &mut rng);
    let mut agent = CategoryParams::default_for(AgentKind::Erosion).spawn();
    if !agent.initialize(&mut ctx).is_finished() {
        while !agent.update(&mut ctx).is_finished() {}
    }
    assert_eq!(terrain.heights(), heights.as_slice());
}
