//! # Cube Generation
//!
//! Unit cubes centered at the origin, spanning -0.5 to 0.5 on all axes.
//! Each face has its own four vertices so normals stay flat.

use crate::gfx::scene::{Mesh, Vertex};
use crate::math::{Vector2, Vector3, Vector4};

#[rustfmt::skip]
const POSITIONS: [[f32; 3]; 24] = [
    // Front face
    [-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5],
    // Back face
    [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5],
    // Left face
    [-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5],
    // Right face
    [0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5],
    // Top face
    [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5],
    // Bottom face
    [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5],
];

#[rustfmt::skip]
const TEX_COORDS: [[f32; 2]; 24] = [
    [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
    [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
    [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
];

/// Two counter-clockwise triangles per face.
#[rustfmt::skip]
const INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // front
    4, 5, 6, 6, 7, 4, // back
    8, 9, 10, 10, 11, 8, // left
    12, 13, 14, 14, 15, 12, // right
    16, 17, 18, 18, 19, 16, // top
    20, 21, 22, 22, 23, 20, // bottom
];

fn normal_of(vertex: usize) -> Vector3 {
    FACE_NORMALS[vertex / 4].into()
}

/// Unit cube in a single color.
pub fn build_cube_mesh(color: Vector4) -> Mesh {
    let vertices = POSITIONS
        .iter()
        .enumerate()
        .map(|(i, &p)| Vertex::colored(p.into(), color, normal_of(i)))
        .collect();
    Mesh::from_trusted(vertices, INDICES.to_vec())
}

/// Unit cube with per-face texture coordinates and tangents, ready for
/// normal mapping.
pub fn build_box_mesh() -> Mesh {
    let vertices = POSITIONS
        .iter()
        .zip(TEX_COORDS.iter())
        .enumerate()
        .map(|(i, (&p, &uv))| Vertex::textured(p.into(), Vector2::from(uv), normal_of(i)))
        .collect();
    let mut mesh = Mesh::from_trusted(vertices, INDICES.to_vec());
    mesh.compute_tangents();
    mesh
}
