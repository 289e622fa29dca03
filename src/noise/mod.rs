//! # Noise
//!
//! Seeded gradient noise for procedural geometry.
//!
//! Both generators own their permutation tables, so any number of them can
//! coexist with different seeds. Identical seeds reproduce identical fields
//! on every platform because the tables are shuffled with `rand_pcg`.
//!
//! ## Usage
//!
//! ```rust
//! use terra::noise::{PerlinNoise, SimplexNoise};
//!
//! let perlin = PerlinNoise::new(42);
//! let height = perlin.octave_perlin(0.3, 0.0, 1.7, 4, 0.5, 1.0, 1.0).unwrap();
//! assert!(height.abs() < 1.0);
//!
//! let simplex = SimplexNoise::new(128.0, 0.5, 42).unwrap();
//! assert_eq!(simplex.octave_count(), 7);
//! let _ = simplex.noise_2d(10.0, 20.0);
//! ```

pub mod perlin;
pub mod simplex;

pub use perlin::{PerlinNoise, PERLIN_LIMIT};
pub use simplex::{SimplexNoise, SimplexNoiseOctave};
