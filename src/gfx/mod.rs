//! # Graphics Module
//!
//! Everything between the math types and a renderer: mesh builders, the
//! scene model, cameras and picking.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - procedural primitives and trees
//! - **Scene Management** ([`scene`]) - vertices, meshes, render objects
//! - **Camera System** ([`camera`]) - arcball and free-fly cameras
//! - **Picking** ([`picking`]) - mouse rays and bounding boxes
//!
//! ## Usage
//!
//! ```rust
//! use terra::gfx::{camera::Camera, geometry::build_tree_mesh, scene::Scene, ArcballCamera};
//! use terra::math::Vector3;
//!
//! let mut scene = Scene::new();
//! scene.add_object(build_tree_mesh(3).unwrap(), Vector3::ZERO, Vector3::ZERO, Vector3::ONE);
//!
//! let camera = ArcballCamera::default();
//! let view = camera.view_matrix();
//! assert_eq!(scene.len(), 1);
//! # let _ = view;
//! ```

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod scene;

// Re-export commonly used types
pub use camera::{ArcballCamera, FreeFlyCamera};
pub use scene::{Mesh, Scene};
