//! The agent abstraction for Strata terrain sculpting.
//!
//! An [`Agent`] is a stateful walker that reshapes a [`strata_graph::Graph`]
//! one step at a time until it reports a [`Termination`]. Concrete agents
//! live in `strata-agents`; this crate holds the contract they share:
//!
//! - [`Agent`] and [`AgentStatus`]: the step protocol
//! - [`AgentContext`]: graph, terrain, and RNG handed to each step
//! - [`AgentParams`]: per-category tuning with bounded randomisation
//! - [`DiminishCurve`]: area-of-effect falloff
//! - [`sculpt`]: footprint, normal, and slope helpers

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod context;
pub mod diminish;
pub mod params;
pub mod sculpt;

pub use agent::{Agent, AgentKind, AgentStatus, Termination};
pub use context::AgentContext;
pub use diminish::DiminishCurve;
pub use params::AgentParams;
