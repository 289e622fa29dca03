//! # Scene Module
//!
//! The mesh/vertex data model that geometry builders produce and renderers
//! consume, plus a small container for placed objects.
//!
//! ## Key Components
//!
//! - [`Vertex`] - position, color or texture coordinate, normal, optional tangents
//! - [`Mesh`] - validated, immutable triangle list
//! - [`RenderObject`] - a mesh with position, rotation and scale
//! - [`Scene`] - owns render objects and hands out [`ObjectId`]s
//!
//! ## Usage
//!
//! ```rust
//! use terra::gfx::geometry::build_cube_mesh;
//! use terra::gfx::scene::Scene;
//! use terra::math::{Vector3, Vector4};
//!
//! let mut scene = Scene::new();
//! let cube = build_cube_mesh(Vector4::new(0.8, 0.2, 0.2, 1.0));
//! let id = scene.add_object(cube, Vector3::new(0.0, 1.0, 0.0), Vector3::ZERO, Vector3::ONE);
//!
//! assert_eq!(scene.get(id).unwrap().mesh().triangle_count(), 12);
//! ```

pub mod mesh;
pub mod object;
pub mod scene;
pub mod vertex;

pub use mesh::Mesh;
pub use object::{IdAllocator, ObjectId, RenderObject};
pub use scene::Scene;
pub use vertex::{ColoredVertexRaw, Surface, SurfaceKind, TexturedVertexRaw, Vertex, VertexAttribute};
