//! Error types for geometry construction and mesh handling.

use thiserror::Error;

use crate::gfx::scene::SurfaceKind;
use crate::math::MathError;

pub type Result<T, E = GeometryError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("index {index} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    #[error("index count {index_count} is not a multiple of 3")]
    IncompleteTriangle { index_count: usize },

    #[error("mesh mixes colored and textured vertices")]
    MixedSurfaces,

    #[error("expected a {expected:?} mesh, found {found:?}")]
    SurfaceMismatch {
        expected: SurfaceKind,
        found: SurfaceKind,
    },
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
