//! # Mesh
//!
//! Validated triangle lists. Every builder in [`crate::gfx::geometry`]
//! returns a [`Mesh`]; renderers take it by value and flatten it with
//! [`Mesh::colored_buffer`] or [`Mesh::textured_buffer`].
//!
//! ## Invariants
//!
//! - the index count is a multiple of 3
//! - every index refers to an existing vertex
//! - all vertices share one [`SurfaceKind`]
//!
//! A mesh cannot be edited after construction. Operations such as
//! [`Mesh::translated`] or [`Mesh::merge`] produce a new mesh.

use crate::error::{GeometryError, Result};
use crate::math::{Triangle, Vector3, Vector4};

use super::vertex::{ColoredVertexRaw, SurfaceKind, TexturedVertexRaw, Vertex};

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        Self::validate(&vertices, &indices)?;
        Ok(Self { vertices, indices })
    }

    /// For builders whose tables are valid by construction.
    pub(crate) fn from_trusted(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert!(Self::validate(&vertices, &indices).is_ok());
        Self { vertices, indices }
    }

    fn validate(vertices: &[Vertex], indices: &[u32]) -> Result<()> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle {
                index_count: indices.len(),
            });
        }

        if let Some(&index) = indices
            .iter()
            .find(|&&index| index as usize >= vertices.len())
        {
            return Err(GeometryError::IndexOutOfBounds {
                index,
                vertex_count: vertices.len(),
            });
        }

        if let Some(first) = vertices.first() {
            let kind = first.surface_kind();
            if vertices.iter().any(|v| v.surface_kind() != kind) {
                return Err(GeometryError::MixedSurfaces);
            }
        }

        Ok(())
    }

    /// Unindexed mesh: vertex `i` is index `i`.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Result<Self> {
        let indices = (0..vertices.len() as u32).collect();
        Self::new(vertices, indices)
    }

    /// Flat colored mesh with one vertex per triangle corner. Each corner
    /// gets the triangle's normal, normalized when possible.
    pub fn from_triangles(triangles: &[Triangle], color: Vector4) -> Self {
        let mut vertices = Vec::with_capacity(triangles.len() * 3);
        for triangle in triangles {
            let normal = triangle.unit_normal().unwrap_or_else(|_| triangle.normal());
            for position in triangle.vertices() {
                vertices.push(Vertex::colored(position, color, normal));
            }
        }
        let indices = (0..vertices.len() as u32).collect();
        Self::from_trusted(vertices, indices)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `None` for a mesh without vertices.
    pub fn surface_kind(&self) -> Option<SurfaceKind> {
        self.vertices.first().map(Vertex::surface_kind)
    }

    /// Corner vertices of every triangle, in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Axis-aligned `(min, max)` corners of all vertex positions.
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.min_components(v.position), max.max_components(v.position))
        }))
    }

    pub fn translated(&self, delta: Vector3) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v.translated(delta)).collect(),
            indices: self.indices.clone(),
        }
    }

    /// Appends `other`, offsetting its indices.
    pub fn merge(mut self, other: Mesh) -> Result<Self> {
        if let (Some(expected), Some(found)) = (self.surface_kind(), other.surface_kind()) {
            if expected != found {
                return Err(GeometryError::SurfaceMismatch { expected, found });
            }
        }

        let offset = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices
            .extend(other.indices.into_iter().map(|index| index + offset));
        Ok(self)
    }

    /// Fills in tangents and bitangents from texture coordinate deltas.
    ///
    /// A vertex shared by several triangles keeps the first value written.
    /// Triangles whose UVs are degenerate contribute nothing.
    pub fn with_tangents(mut self) -> Result<Self> {
        self.expect_kind(SurfaceKind::Textured)?;
        self.compute_tangents();
        Ok(self)
    }

    pub(crate) fn compute_tangents(&mut self) {
        let mut skipped = 0usize;
        for tri in self.indices.chunks_exact(3) {
            let [i1, i2, i3] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (v1, v2, v3) = (&self.vertices[i1], &self.vertices[i2], &self.vertices[i3]);

            let (Some(uv1), Some(uv2), Some(uv3)) = (v1.tex_coord(), v2.tex_coord(), v3.tex_coord())
            else {
                continue;
            };

            let edge1 = v2.position - v1.position;
            let edge2 = v3.position - v1.position;
            let delta_uv1 = uv2 - uv1;
            let delta_uv2 = uv3 - uv1;

            let denominator = delta_uv1.x * delta_uv2.y - delta_uv2.x * delta_uv1.y;
            if denominator == 0.0 || !denominator.is_finite() {
                skipped += 1;
                continue;
            }
            let f = 1.0 / denominator;

            let tangent = (edge1 * delta_uv2.y - edge2 * delta_uv1.y) * f;
            let bitangent = (edge2 * delta_uv1.x - edge1 * delta_uv2.x) * f;

            for index in [i1, i2, i3] {
                let vertex = &mut self.vertices[index];
                vertex.tangent.get_or_insert(tangent);
                vertex.bitangent.get_or_insert(bitangent);
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} triangles with degenerate texture coordinates", skipped);
        }
    }

    pub fn colored_buffer(&self) -> Result<Vec<ColoredVertexRaw>> {
        self.expect_kind(SurfaceKind::Colored)?;
        Ok(self
            .vertices
            .iter()
            .map(|v| ColoredVertexRaw {
                position: v.position.to_array(),
                color: v.color().unwrap_or_default().to_array(),
                normal: v.normal.to_array(),
            })
            .collect())
    }

    pub fn textured_buffer(&self) -> Result<Vec<TexturedVertexRaw>> {
        self.expect_kind(SurfaceKind::Textured)?;
        Ok(self
            .vertices
            .iter()
            .map(|v| TexturedVertexRaw {
                position: v.position.to_array(),
                tex_coord: v.tex_coord().unwrap_or_default().to_array(),
                normal: v.normal.to_array(),
                tangent: v.tangent.unwrap_or_default().to_array(),
                bitangent: v.bitangent.unwrap_or_default().to_array(),
            })
            .collect())
    }

    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }

    fn expect_kind(&self, expected: SurfaceKind) -> Result<()> {
        match self.surface_kind() {
            Some(found) if found != expected => {
                Err(GeometryError::SurfaceMismatch { expected, found })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    fn red() -> Vector4 {
        Vector4::new(1.0, 0.0, 0.0, 1.0)
    }

    fn quad_textured() -> Mesh {
        let n = Vector3::UNIT_Z;
        let vertices = vec![
            Vertex::textured(Vector3::new(0.0, 0.0, 0.0), Vector2::new(0.0, 0.0), n),
            Vertex::textured(Vector3::new(1.0, 0.0, 0.0), Vector2::new(1.0, 0.0), n),
            Vertex::textured(Vector3::new(1.0, 1.0, 0.0), Vector2::new(1.0, 1.0), n),
            Vertex::textured(Vector3::new(0.0, 1.0, 0.0), Vector2::new(0.0, 1.0), n),
        ];
        Mesh::new(vertices, vec![0, 1, 2, 0, 2, 3]).unwrap()
    }

    #[test]
    fn test_rejects_incomplete_triangle() {
        let v = Vertex::colored(Vector3::ZERO, red(), Vector3::UNIT_Y);
        assert_eq!(
            Mesh::new(vec![v; 3], vec![0, 1]),
            Err(GeometryError::IncompleteTriangle { index_count: 2 })
        );
    }

    #[test]
    fn test_rejects_out_of_bounds_index() {
        let v = Vertex::colored(Vector3::ZERO, red(), Vector3::UNIT_Y);
        assert_eq!(
            Mesh::new(vec![v; 3], vec![0, 1, 3]),
            Err(GeometryError::IndexOutOfBounds {
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_rejects_mixed_surfaces() {
        let colored = Vertex::colored(Vector3::ZERO, red(), Vector3::UNIT_Y);
        let textured = Vertex::textured(Vector3::ZERO, Vector2::ZERO, Vector3::UNIT_Y);
        assert_eq!(
            Mesh::new(vec![colored, colored, textured], vec![0, 1, 2]),
            Err(GeometryError::MixedSurfaces)
        );
    }

    #[test]
    fn test_from_triangles_uses_face_normals() {
        let t = Triangle::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0));
        let mesh = Mesh::from_triangles(&[t], red());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert!(mesh.vertices().iter().all(|v| v.normal == Vector3::UNIT_Z));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let t = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y);
        let a = Mesh::from_triangles(&[t], red());
        let b = Mesh::from_triangles(&[t.translated(Vector3::UNIT_Z)], red());
        let merged = a.merge(b).unwrap();
        assert_eq!(merged.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(merged.bounds(), Some((Vector3::ZERO, Vector3::ONE)));
    }

    #[test]
    fn test_merge_rejects_other_surface() {
        let t = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y);
        let colored = Mesh::from_triangles(&[t], red());
        assert!(matches!(
            colored.merge(quad_textured()),
            Err(GeometryError::SurfaceMismatch { .. })
        ));
    }

    #[test]
    fn test_tangents_follow_uv_axes() {
        let mesh = quad_textured().with_tangents().unwrap();
        for v in mesh.vertices() {
            assert!(v.tangent.unwrap().approx_eq(Vector3::UNIT_X, 1e-6));
            assert!(v.bitangent.unwrap().approx_eq(Vector3::UNIT_Y, 1e-6));
        }
    }

    #[test]
    fn test_tangents_skip_degenerate_uvs() {
        let n = Vector3::UNIT_Z;
        let vertices = vec![
            Vertex::textured(Vector3::ZERO, Vector2::ZERO, n),
            Vertex::textured(Vector3::UNIT_X, Vector2::ZERO, n),
            Vertex::textured(Vector3::UNIT_Y, Vector2::ZERO, n),
        ];
        let mesh = Mesh::from_vertices(vertices).unwrap().with_tangents().unwrap();
        assert!(mesh.vertices().iter().all(|v| v.tangent.is_none()));
    }

    #[test]
    fn test_tangents_require_textured_mesh() {
        let t = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y);
        assert!(Mesh::from_triangles(&[t], red()).with_tangents().is_err());
    }

    #[test]
    fn test_raw_buffers_match_kind() {
        let t = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y);
        let mesh = Mesh::from_triangles(&[t], red());
        let raw = mesh.colored_buffer().unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(raw[1].color, [1.0, 0.0, 0.0, 1.0]);
        assert!(mesh.textured_buffer().is_err());

        let bytes: &[u8] = bytemuck::cast_slice(&raw);
        assert_eq!(bytes.len(), 3 * ColoredVertexRaw::stride());
    }
}
