//! Terra 3D Engine Core
//!
//! Procedural geometry and transform math for a small OpenGL-style 3D
//! engine: icospheres, swept cylinders, seeded trees, Perlin and simplex
//! noise, arcball and free-fly cameras, and mouse picking.
//!
//! Everything here is plain data. Windowing, input devices and GPU upload
//! live outside the crate; they hand in scalar input through
//! [`gfx::camera::InputSource`] and take out [`gfx::scene::Mesh`] values,
//! Pod vertex records and matrices.

pub mod error;
pub mod gfx;
pub mod math;
pub mod noise;
pub mod prelude;

pub use error::{GeometryError, Result};
