//! # Cylinder
//!
//! Tubes lofted between two rings, used for branches, bonds and other
//! segments between two points.
//!
//! ## Usage
//!
//! ```rust
//! use terra::gfx::geometry::{build_cylinder_mesh, CapStyle, CylinderSettings};
//! use terra::math::{Vector3, Vector4};
//!
//! let settings = CylinderSettings {
//!     radius: 0.5,
//!     smoothness: 8,
//!     caps: CapStyle::Flat,
//!     ..Default::default()
//! };
//! let (mesh, midpoint) = build_cylinder_mesh(
//!     Vector3::ZERO,
//!     Vector3::new(0.0, 2.0, 0.0),
//!     Vector4::new(0.5, 0.5, 0.5, 1.0),
//!     settings,
//! )
//! .unwrap();
//!
//! assert_eq!(mesh.triangle_count(), 16);
//! assert_eq!(midpoint, Vector3::new(0.0, 1.0, 0.0));
//! ```

use crate::error::{GeometryError, Result};
use crate::gfx::scene::Mesh;
use crate::math::{Triangle, Vector3, Vector4};

use super::circle::Circle;
use super::sphere::{radial_mesh, sphere_triangles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapStyle {
    /// A full sphere of the cylinder's radius at each endpoint.
    #[default]
    Rounded,
    /// Open ends, no cap geometry.
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSettings {
    pub radius: f32,
    /// Vertices per ring.
    pub smoothness: usize,
    pub caps: CapStyle,
    /// Subdivision depth of the rounded caps.
    pub cap_depth: u32,
}

impl Default for CylinderSettings {
    fn default() -> Self {
        Self {
            radius: 0.1,
            smoothness: 120,
            caps: CapStyle::Rounded,
            cap_depth: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CylinderBuilder {
    settings: CylinderSettings,
}

impl CylinderBuilder {
    pub fn new(settings: CylinderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CylinderSettings {
        &self.settings
    }

    /// The two rings at `p1` and `p2`, both perpendicular to `p1 - p2`.
    pub fn rings(&self, p1: Vector3, p2: Vector3) -> Result<(Circle, Circle)> {
        let axis = p1 - p2;
        if axis.length() == 0.0 {
            return Err(GeometryError::invalid(
                "endpoints",
                format!("cylinder endpoints coincide at {p1}"),
            ));
        }

        let radius = self.settings.radius;
        let smoothness = self.settings.smoothness;
        Ok((
            Circle::new(p1, radius, axis, smoothness)?,
            Circle::new(p2, radius, axis, smoothness)?,
        ))
    }

    /// Side wall: two triangles per ring segment, each carrying its own
    /// face normal.
    pub fn lateral_triangles(&self, p1: Vector3, p2: Vector3) -> Result<Vec<Triangle>> {
        let (ring1, ring2) = self.rings(p1, p2)?;
        let (a, b) = (ring1.vertices(), ring2.vertices());
        let n = a.len();

        let mut triangles = Vec::with_capacity(2 * n);
        for i in 0..n {
            let j = (i + 1) % n;

            let n1 = (a[i] - a[j]).cross(b[i] - a[j]);
            let n2 = (a[j] - b[j]).cross(b[i] - b[j]);

            triangles.push(Triangle::with_normal(b[i], a[j], a[i], n1));
            triangles.push(Triangle::with_normal(b[j], a[j], b[i], n2));
        }
        Ok(triangles)
    }

    /// Mesh in world coordinates plus the midpoint of the two endpoints,
    /// which callers typically use as the object position.
    pub fn build(&self, p1: Vector3, p2: Vector3, color: Vector4) -> Result<(Mesh, Vector3)> {
        let lateral = self.lateral_triangles(p1, p2)?;
        let mut mesh = Mesh::from_triangles(&lateral, color);

        if self.settings.caps == CapStyle::Rounded {
            let radius = self.settings.radius;
            let cap = sphere_triangles(radius, self.settings.cap_depth)?;
            for end in [p1, p2] {
                let moved: Vec<Triangle> = cap.iter().map(|t| t.translated(end)).collect();
                mesh = mesh.merge(radial_mesh(&moved, end, radius, color))?;
            }
        }

        log::debug!(
            "Built cylinder {} -> {}: {} triangles ({:?} caps)",
            p1,
            p2,
            mesh.triangle_count(),
            self.settings.caps
        );

        Ok((mesh, p1.midpoint(p2)))
    }
}

pub fn build_cylinder_mesh(
    p1: Vector3,
    p2: Vector3,
    color: Vector4,
    settings: CylinderSettings,
) -> Result<(Mesh, Vector3)> {
    CylinderBuilder::new(settings).build(p1, p2, color)
}
