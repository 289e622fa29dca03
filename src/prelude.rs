//! # Terra Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```rust
//! use terra::prelude::*;
//!
//! let sphere = build_sphere_mesh(Vector4::splat(1.0), 1.0, 2).unwrap();
//! let mut scene = Scene::new();
//! let id = scene.add_object(sphere, Vector3::ZERO, Vector3::ZERO, Vector3::ONE);
//! assert!(scene.get(id).is_some());
//! ```

// Math
pub use crate::math::{ColorFader, MathError, Matrix4, Triangle, Vector2, Vector3, Vector4};

// Errors
pub use crate::error::{GeometryError, Result};

// Noise
pub use crate::noise::{PerlinNoise, SimplexNoise};

// Geometry builders
pub use crate::gfx::geometry::{
    build_box_mesh, build_cube_mesh, build_cylinder_mesh, build_sphere_mesh, build_tree_mesh,
    CapStyle, CylinderSettings, TreeBuilder, TreeSettings,
};

// Scene
pub use crate::gfx::scene::{Mesh, ObjectId, RenderObject, Scene, Vertex};

// Cameras and picking
pub use crate::gfx::camera::{
    ArcballCamera, Camera, CameraController, CameraSettings, FrameInput, FreeFlyCamera,
    InputSource, Projection,
};
pub use crate::gfx::picking::{Aabb, MousePicker, ObjectPicker, Ray};
