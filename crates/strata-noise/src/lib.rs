//! Deterministic gradient noise for seeding Strata terrains.
//!
//! [`PerlinNoise`] is a 2D Perlin generator with explicit, seedable table
//! state. [`NoiseConfig`] stacks [`Octave`]s over one generator, and
//! [`HeightField::generate`] samples the stack over a grid.
//!
//! ```
//! use strata_noise::{HeightField, NoiseConfig};
//!
//! let field = HeightField::generate(16, 16, &NoiseConfig::seeded(7)).unwrap();
//! assert_eq!(field.heights().len(), 256);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod field;
pub mod octave;
pub mod perlin;

pub use config::NoiseConfig;
pub use error::NoiseError;
pub use field::HeightField;
pub use octave::Octave;
pub use perlin::PerlinNoise;
