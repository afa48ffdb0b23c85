//! Concrete terrain agents for Strata.
//!
//! | Agent | Starts on | Each step | Stops when |
//! |-------|-----------|-----------|------------|
//! | [`ErosionAgent`] | random mountain cell | squashes its footprint, moves to a steep unvisited neighbour | tokens run out, no candidate, or beach reached |
//! | [`PlainAgent`] | local peak above a random plain cell | smooths toward the local mean, drifts along its heading | tokens run out or it leaves the board |
//! | [`RiverAgent`] | mountain end of a beach-to-mountain route | cuts the next route cell and its banks | route carved or tokens run out |
//!
//! [`CategoryParams`] wraps the three param types and spawns agents of the
//! matching kind.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod category;
pub mod erosion;
pub mod plain;
pub mod river;

pub use category::CategoryParams;
pub use erosion::{ErosionAgent, ErosionParams};
pub use plain::{PlainAgent, PlainParams};
pub use river::{RiverAgent, RiverParams};
