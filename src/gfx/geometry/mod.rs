//! # Procedural Geometry Generation
//!
//! Builders for the primitive shapes used by the engine, so basic shapes
//! never need an external model file.
//!
//! ## Supported Primitives
//!
//! - **Icosahedron**: 20-face base solid
//! - **Sphere**: icosphere subdivided to a configurable depth
//! - **Circle**: ring of points on an arbitrary plane
//! - **Cylinder**: tube between two points with rounded or open ends
//! - **Cube**: unit cube, colored or textured
//! - **Tree**: seeded low-poly tree
//!
//! ## Usage
//!
//! ```rust
//! use terra::gfx::geometry::{build_cube_mesh, build_sphere_mesh, build_tree_mesh};
//! use terra::math::Vector4;
//!
//! let red = Vector4::new(1.0, 0.0, 0.0, 1.0);
//!
//! // Unit cube
//! let cube = build_cube_mesh(red);
//!
//! // Sphere of radius 2 subdivided twice
//! let sphere = build_sphere_mesh(red, 2.0, 2).unwrap();
//!
//! // The same seed always grows the same tree
//! let tree = build_tree_mesh(7).unwrap();
//!
//! assert_eq!(cube.triangle_count(), 12);
//! assert_eq!(sphere.triangle_count(), 320);
//! assert_eq!(tree.triangle_count(), 28);
//! ```

pub mod circle;
pub mod cube;
pub mod cylinder;
pub mod icosahedron;
pub mod sphere;
pub mod tree;

pub use circle::Circle;
pub use cube::{build_box_mesh, build_cube_mesh};
pub use cylinder::{build_cylinder_mesh, CapStyle, CylinderBuilder, CylinderSettings};
pub use icosahedron::Icosahedron;
pub use sphere::{
    build_sphere_mesh, sphere_triangles, SphereBuilder, DEFAULT_SPHERE_DEPTH, MAX_SPHERE_DEPTH,
};
pub use tree::{build_tree_mesh, TreeBuilder, TreeSettings, FOLIAGE_COLOR, TRUNK_COLOR};
