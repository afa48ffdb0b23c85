//! Terrain sculpting engine for Strata.
//!
//! Ties the pieces together: a [`TerrainMap`] seeded from noise, a
//! [`SystemConfig`] listing agent phases, and the [`AgentSystem`] that
//! builds a graph from the terrain, runs each phase's agent population
//! to completion, and writes the sculpted heights back.
//!
//! [`survey`] measures finished terrains and samples many randomized runs
//! into a histogram.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod survey;
pub mod system;
pub mod terrain;

pub use config::{ConfigError, PhaseConfig, ResyncPolicy, SystemConfig, TerrainConfig};
pub use metrics::{PhaseReport, RunReport};
pub use survey::{Sampler, SurveyHistogram, TerrainSurvey};
pub use system::{AgentSystem, SystemError, SystemState};
pub use terrain::TerrainMap;
