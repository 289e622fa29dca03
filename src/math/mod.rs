//! # Math
//!
//! Vectors, 4x4 matrices, triangles and color gradients shared by every
//! other module.

pub mod color;
pub mod matrix;
pub mod triangle;
pub mod vector;

pub use color::ColorFader;
pub use matrix::Matrix4;
pub use triangle::Triangle;
pub use vector::{quick_inverse_sqrt, Vector2, Vector3, Vector4};

use thiserror::Error;

/// Numeric failures that would otherwise surface as NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("cannot {operation} a zero-length or non-finite vector")]
    DegenerateVector { operation: &'static str },

    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix { determinant: f32 },
}
