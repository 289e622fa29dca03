use super::{MathError, Vector3};

/// Three corner positions with an optional explicit face normal.
///
/// Corners are counter-clockwise when seen from the front, so the computed
/// normal `(v2 - v1) x (v3 - v1)` points out of the front face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vector3,
    pub v2: Vector3,
    pub v3: Vector3,
    normal: Option<Vector3>,
}

impl Triangle {
    pub fn new(v1: Vector3, v2: Vector3, v3: Vector3) -> Self {
        Self {
            v1,
            v2,
            v3,
            normal: None,
        }
    }

    /// Triangle whose shading normal is fixed instead of derived from the
    /// winding. Used for smooth surfaces such as spheres.
    pub fn with_normal(v1: Vector3, v2: Vector3, v3: Vector3, normal: Vector3) -> Self {
        Self {
            v1,
            v2,
            v3,
            normal: Some(normal),
        }
    }

    /// Explicit normal if one was given, otherwise the (unnormalized)
    /// winding cross product.
    pub fn normal(&self) -> Vector3 {
        self.normal
            .unwrap_or_else(|| (self.v2 - self.v1).cross(self.v3 - self.v1))
    }

    pub fn has_explicit_normal(&self) -> bool {
        self.normal.is_some()
    }

    pub fn unit_normal(&self) -> Result<Vector3, MathError> {
        self.normal().normalize()
    }

    pub fn vertices(&self) -> [Vector3; 3] {
        [self.v1, self.v2, self.v3]
    }

    pub fn centroid(&self) -> Vector3 {
        (self.v1 + self.v2 + self.v3) / 3.0
    }

    pub fn area(&self) -> f32 {
        (self.v2 - self.v1).cross(self.v3 - self.v1).length() * 0.5
    }

    /// Same triangle moved by `delta`; an explicit normal is kept as is.
    pub fn translated(&self, delta: Vector3) -> Self {
        Self {
            v1: self.v1 + delta,
            v2: self.v2 + delta,
            v3: self.v3 + delta,
            normal: self.normal,
        }
    }
}
