//! # Icosphere
//!
//! Spheres built by recursively splitting the faces of an [`Icosahedron`]
//! and pushing every new vertex out to the target radius.
//!
//! Each split replaces a triangle `(v1, v2, v3)` with four children using
//! the edge midpoints `v12`, `v23`, `v31`:
//!
//! ```text
//! (v1, v12, v31)  (v2, v23, v12)  (v3, v31, v23)  (v12, v23, v31)
//! ```
//!
//! Midpoints are taken first and normalized to the radius afterwards; the
//! order matters for the final vertex positions.

use crate::error::{GeometryError, Result};
use crate::gfx::scene::{Mesh, Vertex};
use crate::math::{Triangle, Vector3, Vector4};

use super::icosahedron::Icosahedron;

pub const DEFAULT_SPHERE_DEPTH: u32 = 4;

/// Deeper spheres exceed a million triangles.
pub const MAX_SPHERE_DEPTH: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereBuilder {
    pub radius: f32,
    pub depth: u32,
}

impl Default for SphereBuilder {
    fn default() -> Self {
        Self {
            radius: 1.0,
            depth: DEFAULT_SPHERE_DEPTH,
        }
    }
}

impl SphereBuilder {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn triangle_count(&self) -> usize {
        20 * 4usize.pow(self.depth)
    }

    /// Surface triangles centered on the origin.
    pub fn triangles(&self) -> Result<Vec<Triangle>> {
        if self.depth > MAX_SPHERE_DEPTH {
            return Err(GeometryError::invalid(
                "depth",
                format!(
                    "subdivision depth {} exceeds the maximum of {}",
                    self.depth, MAX_SPHERE_DEPTH
                ),
            ));
        }
        let radius = self.radius;
        let base = Icosahedron::new(radius)?;

        // Work stack of (triangle, remaining depth). Children are pushed in
        // reverse so they pop in the same order a recursive walk visits them.
        let mut stack: Vec<(Triangle, u32)> = base
            .triangles()
            .into_iter()
            .rev()
            .map(|t| (t, self.depth))
            .collect();
        let mut out = Vec::with_capacity(self.triangle_count());

        while let Some((t, depth)) = stack.pop() {
            if depth == 0 {
                out.push(Triangle::new(
                    t.v1.normalize_to(radius)?,
                    t.v2.normalize_to(radius)?,
                    t.v3.normalize_to(radius)?,
                ));
                continue;
            }

            let v12 = (t.v1 + t.v2).normalize_to(radius)?;
            let v23 = (t.v2 + t.v3).normalize_to(radius)?;
            let v31 = (t.v3 + t.v1).normalize_to(radius)?;

            stack.push((Triangle::new(v12, v23, v31), depth - 1));
            stack.push((Triangle::new(t.v3, v31, v23), depth - 1));
            stack.push((Triangle::new(t.v2, v23, v12), depth - 1));
            stack.push((Triangle::new(t.v1, v12, v31), depth - 1));
        }

        log::debug!(
            "Subdivided sphere: radius {}, depth {}, {} triangles",
            radius,
            self.depth,
            out.len()
        );
        Ok(out)
    }

    pub fn build(&self, color: Vector4) -> Result<Mesh> {
        let triangles = self.triangles()?;
        Ok(radial_mesh(&triangles, Vector3::ZERO, self.radius, color))
    }
}

/// Colored sphere mesh; `depth` defaults to [`DEFAULT_SPHERE_DEPTH`] in
/// [`SphereBuilder`].
pub fn build_sphere_mesh(color: Vector4, radius: f32, depth: u32) -> Result<Mesh> {
    SphereBuilder::new(radius).with_depth(depth).build(color)
}

pub fn sphere_triangles(radius: f32, depth: u32) -> Result<Vec<Triangle>> {
    SphereBuilder::new(radius).with_depth(depth).triangles()
}

/// One vertex per corner with the outward unit normal of a sphere of
/// `radius` around `center`.
pub(crate) fn radial_mesh(
    triangles: &[Triangle],
    center: Vector3,
    radius: f32,
    color: Vector4,
) -> Mesh {
    let mut vertices = Vec::with_capacity(triangles.len() * 3);
    for triangle in triangles {
        for corner in triangle.vertices() {
            let normal = (corner - center) / radius;
            vertices.push(Vertex::colored(corner, color, normal));
        }
    }
    let indices = (0..vertices.len() as u32).collect();
    Mesh::from_trusted(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Vector4 {
        Vector4::splat(1.0)
    }

    #[test]
    fn test_triangle_counts() {
        for depth in 0..=3 {
            let triangles = sphere_triangles(1.0, depth).unwrap();
            assert_eq!(triangles.len(), 20 * 4usize.pow(depth));
        }
        assert_eq!(SphereBuilder::default().triangle_count(), 5120);
    }

    #[test]
    fn test_vertices_on_radius() {
        let radius = 2.5;
        let mesh = build_sphere_mesh(white(), radius, 4).unwrap();
        assert_eq!(mesh.triangle_count(), 5120);
        for v in mesh.vertices() {
            assert!((v.position.length() - radius).abs() < 1e-4);
            assert!((v.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_depth_zero_is_projected_icosahedron() {
        let triangles = sphere_triangles(1.0, 0).unwrap();
        let ico = Icosahedron::new(1.0).unwrap();
        let expected = ico.vertices()[0].normalize().unwrap();
        assert!(triangles[0].v1.approx_eq(expected, 1e-6));
    }

    #[test]
    fn test_emission_order_matches_recursion() {
        // First child of the first face keeps v1 of face 0 in front.
        let triangles = sphere_triangles(1.0, 2).unwrap();
        let corner = Icosahedron::new(1.0).unwrap().vertices()[0].normalize().unwrap();
        assert!(triangles[0].v1.approx_eq(corner, 1e-6));
    }

    #[test]
    fn test_faces_wind_outward() {
        for t in sphere_triangles(1.0, 2).unwrap() {
            assert!(t.normal().dot(t.centroid()) > 0.0);
        }
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(build_sphere_mesh(white(), 0.0, 2).is_err());
        assert!(build_sphere_mesh(white(), 1.0, MAX_SPHERE_DEPTH + 1).is_err());
    }
}
