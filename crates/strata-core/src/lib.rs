//! Core types and traits for the Strata terrain sculpting framework.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental abstractions used throughout the Strata workspace: grid
//! identifiers, 3D positions, terrain bands, the [`TerrainSurface`]
//! collaborator trait, and the shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod band;
pub mod error;
pub mod geom;
pub mod id;
pub mod terrain;

pub use band::{BandThresholds, TerrainBand};
pub use error::{GraphError, TerrainError};
pub use geom::Position;
pub use id::{GridPos, VertexId};
pub use terrain::TerrainSurface;
