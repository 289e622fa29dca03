//! # Vertex Data Structures
//!
//! This module defines the vertex model produced by every geometry builder
//! and the GPU-compatible records those vertices are flattened into.

use std::mem;

use crate::math::{Vector2, Vector3, Vector4};

/// Per-vertex surface attribute. A vertex is either colored or textured,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// RGBA color in `[0, 1]`.
    Color(Vector4),
    /// Texture coordinate.
    TexCoord(Vector2),
}

impl Surface {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Surface::Color(_) => SurfaceKind::Colored,
            Surface::TexCoord(_) => SurfaceKind::Textured,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Colored,
    Textured,
}

/// A single mesh vertex.
///
/// # Fields
///
/// - `position`: object-space position
/// - `surface`: color or texture coordinate
/// - `normal`: shading normal, not necessarily unit length for flat faces
/// - `tangent` / `bitangent`: only present on textured meshes after
///   [`Mesh::with_tangents`](super::Mesh::with_tangents)
///
/// # Examples
///
/// ```rust
/// use terra::gfx::scene::{SurfaceKind, Vertex};
/// use terra::math::{Vector3, Vector4};
///
/// let vertex = Vertex::colored(
///     Vector3::new(0.0, 1.0, 0.0),
///     Vector4::new(1.0, 0.0, 0.0, 1.0),
///     Vector3::UNIT_Y,
/// );
/// assert_eq!(vertex.surface_kind(), SurfaceKind::Colored);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector3,
    pub surface: Surface,
    pub normal: Vector3,
    pub tangent: Option<Vector3>,
    pub bitangent: Option<Vector3>,
}

impl Vertex {
    pub fn colored(position: Vector3, color: Vector4, normal: Vector3) -> Self {
        Self {
            position,
            surface: Surface::Color(color),
            normal,
            tangent: None,
            bitangent: None,
        }
    }

    pub fn textured(position: Vector3, tex_coord: Vector2, normal: Vector3) -> Self {
        Self {
            position,
            surface: Surface::TexCoord(tex_coord),
            normal,
            tangent: None,
            bitangent: None,
        }
    }

    pub fn surface_kind(&self) -> SurfaceKind {
        self.surface.kind()
    }

    pub fn color(&self) -> Option<Vector4> {
        match self.surface {
            Surface::Color(color) => Some(color),
            Surface::TexCoord(_) => None,
        }
    }

    pub fn tex_coord(&self) -> Option<Vector2> {
        match self.surface {
            Surface::TexCoord(uv) => Some(uv),
            Surface::Color(_) => None,
        }
    }

    /// Same vertex moved by `delta`.
    pub fn translated(&self, delta: Vector3) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }
}

/// Describes one attribute inside a raw vertex record, independent of any
/// particular graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub shader_location: u32,
    pub offset: usize,
    /// Number of `f32` components.
    pub components: u32,
}

/// Colored vertex as uploaded to the GPU.
///
/// # Memory Layout
///
/// `#[repr(C)]`, tightly packed `f32`s:
/// - location 0: position (3)
/// - location 1: color (4)
/// - location 2: normal (3)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertexRaw {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

impl ColoredVertexRaw {
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            shader_location: 0,
            offset: 0,
            components: 3,
        },
        VertexAttribute {
            shader_location: 1,
            offset: mem::size_of::<[f32; 3]>(),
            components: 4,
        },
        VertexAttribute {
            shader_location: 2,
            offset: mem::size_of::<[f32; 7]>(),
            components: 3,
        },
    ];

    pub const fn stride() -> usize {
        mem::size_of::<Self>()
    }
}

/// Textured vertex as uploaded to the GPU. Missing tangents are written as
/// zero vectors.
///
/// # Memory Layout
///
/// `#[repr(C)]`, tightly packed `f32`s:
/// - location 0: position (3)
/// - location 1: texture coordinate (2)
/// - location 2: normal (3)
/// - location 3: tangent (3)
/// - location 4: bitangent (3)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertexRaw {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl TexturedVertexRaw {
    pub const ATTRIBUTES: [VertexAttribute; 5] = [
        VertexAttribute {
            shader_location: 0,
            offset: 0,
            components: 3,
        },
        VertexAttribute {
            shader_location: 1,
            offset: mem::size_of::<[f32; 3]>(),
            components: 2,
        },
        VertexAttribute {
            shader_location: 2,
            offset: mem::size_of::<[f32; 5]>(),
            components: 3,
        },
        VertexAttribute {
            shader_location: 3,
            offset: mem::size_of::<[f32; 8]>(),
            components: 3,
        },
        VertexAttribute {
            shader_location: 4,
            offset: mem::size_of::<[f32; 11]>(),
            components: 3,
        },
    ];

    pub const fn stride() -> usize {
        mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_accessors() {
        let colored = Vertex::colored(Vector3::ZERO, Vector4::splat(1.0), Vector3::UNIT_Y);
        assert_eq!(colored.color(), Some(Vector4::splat(1.0)));
        assert_eq!(colored.tex_coord(), None);

        let textured = Vertex::textured(Vector3::ZERO, Vector2::new(0.5, 0.5), Vector3::UNIT_Y);
        assert_eq!(textured.surface_kind(), SurfaceKind::Textured);
        assert_eq!(textured.color(), None);
    }

    #[test]
    fn test_raw_layouts_are_packed() {
        assert_eq!(ColoredVertexRaw::stride(), 10 * 4);
        assert_eq!(TexturedVertexRaw::stride(), 14 * 4);

        let last = ColoredVertexRaw::ATTRIBUTES[2];
        assert_eq!(last.offset + last.components as usize * 4, ColoredVertexRaw::stride());
        let last = TexturedVertexRaw::ATTRIBUTES[4];
        assert_eq!(last.offset + last.components as usize * 4, TexturedVertexRaw::stride());
    }

    #[test]
    fn test_translated_keeps_attributes() {
        let v = Vertex::colored(Vector3::ZERO, Vector4::splat(0.5), Vector3::UNIT_X)
            .translated(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(v.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, Vector3::UNIT_X);
    }
}
