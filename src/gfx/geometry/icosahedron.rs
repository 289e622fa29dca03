//! # Icosahedron
//!
//! The 12-vertex, 20-face base solid that spheres are subdivided from and
//! that the procedural tree deforms into foliage.

use crate::error::{GeometryError, Result};
use crate::gfx::scene::Mesh;
use crate::math::{Triangle, Vector3, Vector4};

/// Golden ratio used to build the vertex table.
pub const PHI: f32 = 1.618_034;

/// Face index table. Each triple winds counter-clockwise seen from outside,
/// so reordering an entry flips that face.
pub const FACES: [[usize; 3]; 20] = [
    [0, 2, 10],
    [0, 10, 5],
    [0, 5, 4],
    [0, 4, 8],
    [0, 8, 2],
    [3, 1, 11],
    [3, 11, 7],
    [3, 7, 6],
    [3, 6, 9],
    [3, 9, 1],
    [2, 6, 7],
    [2, 7, 10],
    [10, 7, 11],
    [10, 11, 5],
    [5, 11, 1],
    [5, 1, 4],
    [4, 1, 9],
    [4, 9, 8],
    [8, 9, 6],
    [8, 6, 2],
];

/// Distance from the center to every vertex of an icosahedron built with
/// radius 1.
pub fn circumradius_factor() -> f32 {
    (0.25 + PHI * PHI / 4.0).sqrt()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Icosahedron {
    radius: f32,
    vertices: [Vector3; 12],
}

impl Icosahedron {
    /// Note that `radius` scales the vertex table; vertices end up
    /// `radius * circumradius_factor()` from the origin.
    pub fn new(radius: f32) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::invalid(
                "radius",
                format!("icosahedron radius must be positive, got {radius}"),
            ));
        }

        let a = 0.5 * radius;
        let b = PHI / 2.0 * radius;
        let vertices = [
            Vector3::new(a, 0.0, b),
            Vector3::new(a, 0.0, -b),
            Vector3::new(-a, 0.0, b),
            Vector3::new(-a, 0.0, -b),
            Vector3::new(b, a, 0.0),
            Vector3::new(b, -a, 0.0),
            Vector3::new(-b, a, 0.0),
            Vector3::new(-b, -a, 0.0),
            Vector3::new(0.0, b, a),
            Vector3::new(0.0, b, -a),
            Vector3::new(0.0, -b, a),
            Vector3::new(0.0, -b, -a),
        ];

        Ok(Self { radius, vertices })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn vertices(&self) -> &[Vector3; 12] {
        &self.vertices
    }

    pub fn faces(&self) -> &'static [[usize; 3]; 20] {
        &FACES
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        triangles_from(&self.vertices)
    }

    /// Flat-shaded mesh, one vertex per face corner.
    pub fn to_mesh(&self, color: Vector4) -> Mesh {
        Mesh::from_triangles(&self.triangles(), color)
    }
}

/// Applies [`FACES`] to any 12 vertices, e.g. a displaced icosahedron.
pub fn triangles_from(vertices: &[Vector3; 12]) -> Vec<Triangle> {
    FACES
        .iter()
        .map(|&[a, b, c]| Triangle::new(vertices[a], vertices[b], vertices[c]))
        .collect()
}
