use std::f32::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::Vector3;

const PARALLEL_EPSILON: f32 = 1e-6;

/// A ring of points on the plane through `center` perpendicular to
/// `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Vector3,
    radius: f32,
    normal: Vector3,
    basis: (Vector3, Vector3),
    vertices: Vec<Vector3>,
}

impl Circle {
    pub fn new(center: Vector3, radius: f32, normal: Vector3, vertex_count: usize) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::invalid(
                "radius",
                format!("circle radius must be positive, got {radius}"),
            ));
        }
        if vertex_count < 3 {
            return Err(GeometryError::invalid(
                "vertex_count",
                format!("a circle needs at least 3 vertices, got {vertex_count}"),
            ));
        }

        let (u, v) = plane_basis(normal)?;
        let step = TAU / vertex_count as f32;
        let vertices = (0..vertex_count)
            .map(|i| {
                let t = i as f32 * step;
                center + u * (radius * t.cos()) + v * (radius * t.sin())
            })
            .collect();

        Ok(Self {
            center,
            radius,
            normal,
            basis: (u, v),
            vertices,
        })
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Orthonormal in-plane axes; vertex `i` sits at angle `2*pi*i/n` from
    /// the first one towards the second.
    pub fn basis(&self) -> (Vector3, Vector3) {
        self.basis
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Two unit vectors spanning the plane perpendicular to `normal`.
fn plane_basis(normal: Vector3) -> Result<(Vector3, Vector3)> {
    if normal.length() == 0.0 || !normal.length().is_finite() {
        return Err(GeometryError::invalid(
            "normal",
            "circle normal must be a non-zero vector",
        ));
    }

    let mut helper = Vector3::new(1.0, 0.0, 1.0);
    if normal.cross(helper).approx_eq(Vector3::ZERO, PARALLEL_EPSILON) {
        log::trace!("Circle normal {} is parallel to the default helper", normal);
        helper = Vector3::new(0.0, 1.0, 1.0);
    }

    let u = normal.cross(helper).normalize()?;
    let v = normal.cross(u).normalize()?;
    Ok((u, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_on_ring() {
        let center = Vector3::new(1.0, -2.0, 3.0);
        let normal = Vector3::new(0.3, 1.0, -0.4);
        let circle = Circle::new(center, 0.75, normal, 24).unwrap();

        assert_eq!(circle.vertex_count(), 24);
        for &v in circle.vertices() {
            assert!((v.distance(center) - 0.75).abs() < 1e-5);
            assert!((v - center).dot(normal).abs() < 1e-5);
        }
    }

    #[test]
    fn test_helper_fallback_for_parallel_normal() {
        let normal = Vector3::new(2.0, 0.0, 2.0);
        let circle = Circle::new(Vector3::ZERO, 1.0, normal, 8).unwrap();
        let (u, v) = circle.basis();
        assert!(u.dot(normal).abs() < 1e-6);
        assert!(v.dot(normal).abs() < 1e-6);
        assert!(u.dot(v).abs() < 1e-6);
        assert!((u.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_first_vertex_along_first_axis() {
        let circle = Circle::new(Vector3::ZERO, 2.0, Vector3::UNIT_Y, 4).unwrap();
        let (u, v) = circle.basis();
        assert!(circle.vertices()[0].approx_eq(u * 2.0, 1e-6));
        assert!(circle.vertices()[1].approx_eq(v * 2.0, 1e-6));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(Circle::new(Vector3::ZERO, 0.0, Vector3::UNIT_Y, 8).is_err());
        assert!(Circle::new(Vector3::ZERO, 1.0, Vector3::UNIT_Y, 2).is_err());
        assert!(Circle::new(Vector3::ZERO, 1.0, Vector3::ZERO, 8).is_err());
    }
}
