//! # Object Picking System
//!
//! Mouse ray-casting against object bounding boxes, so clicks in the
//! viewport can select scene objects.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: [`MousePicker`] turns a cursor position into a
//!    world-space [`Ray`] starting at the camera
//! 2. **Ray-Object Intersection**: each object's [`Aabb`] is moved into
//!    world space and slab-tested against the ray
//! 3. **Selection**: [`ObjectPicker`] returns the closest hit
//!
//! ## Usage
//!
//! ```rust
//! use terra::gfx::camera::{ArcballCamera, Projection};
//! use terra::gfx::geometry::build_cube_mesh;
//! use terra::gfx::picking::{MousePicker, ObjectPicker};
//! use terra::gfx::scene::Scene;
//! use terra::math::{Vector2, Vector3, Vector4};
//!
//! let mut scene = Scene::new();
//! let cube = scene.add_object(
//!     build_cube_mesh(Vector4::splat(1.0)),
//!     Vector3::ZERO,
//!     Vector3::ZERO,
//!     Vector3::ONE,
//! );
//!
//! let camera = ArcballCamera::default();
//! let picker = MousePicker::new(Projection::new(70.0, 1.0, 0.1, 100.0)).unwrap();
//! let ray = picker
//!     .compute_ray(Vector2::new(400.0, 400.0), Vector2::new(800.0, 800.0), &camera)
//!     .unwrap();
//!
//! let hit = ObjectPicker::new().pick(&ray, &scene).unwrap();
//! assert_eq!(hit.object, cube);
//! ```

use crate::gfx::camera::{Camera, Projection};
use crate::gfx::scene::{Mesh, ObjectId, Scene};
use crate::math::{MathError, Matrix4, Vector2, Vector3};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3,
    /// Ray direction (normalized)
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Result<Self, MathError> {
        Ok(Self {
            origin,
            direction: direction.normalize()?,
        })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3 {
        self.origin + self.direction * t
    }
}

/// Builds world-space rays from cursor positions.
#[derive(Debug, Clone, Copy)]
pub struct MousePicker {
    projection: Projection,
    inverse_projection: Matrix4,
}

impl MousePicker {
    pub fn new(projection: Projection) -> Result<Self, MathError> {
        Ok(Self {
            projection,
            inverse_projection: projection.inverse()?,
        })
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Call when the viewport changes shape.
    pub fn set_projection(&mut self, projection: Projection) -> Result<(), MathError> {
        self.inverse_projection = projection.inverse()?;
        self.projection = projection;
        Ok(())
    }

    /// Window coordinates (origin top-left, Y down) to normalized device
    /// coordinates (origin center, Y up).
    pub fn normalized_device_coords(mouse: Vector2, viewport: Vector2) -> Vector2 {
        let y = viewport.y - mouse.y;
        Vector2::new(
            2.0 * mouse.x / viewport.x - 1.0,
            2.0 * y / viewport.y - 1.0,
        )
    }

    pub fn compute_ray(
        &self,
        mouse: Vector2,
        viewport: Vector2,
        camera: &impl Camera,
    ) -> Result<Ray, MathError> {
        let ndc = Self::normalized_device_coords(mouse, viewport);
        let inverse_view = Matrix4::invert(&camera.view_matrix())?;
        let direction = Matrix4::unproject(ndc, &self.inverse_projection, &inverse_view)?;
        Ray::new(camera.position(), direction)
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3,
    /// Maximum corner of the bounding box
    pub max: Vector3,
}

impl Aabb {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Smallest box around `vertices`, `None` when there are none.
    pub fn from_vertices(vertices: &[Vector3]) -> Option<Self> {
        let (&first, rest) = vertices.split_first()?;
        let (min, max) = rest.iter().fold((first, first), |(min, max), &v| {
            (min.min_components(v), max.max_components(v))
        });
        Some(Self::new(min, max))
    }

    pub fn from_mesh(mesh: &Mesh) -> Option<Self> {
        mesh.bounds().map(|(min, max)| Self::new(min, max))
    }

    pub fn center(&self) -> Vector3 {
        self.min.midpoint(self.max)
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// True when the boxes overlap with positive volume; touching faces do
    /// not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        (other.max.x > self.min.x && other.min.x < self.max.x)
            && (other.max.y > self.min.y && other.min.y < self.max.y)
            && (other.max.z > self.min.z && other.min.z < self.max.z)
    }

    pub fn contains(&self, point: Vector3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).multiply(inv_dir);
        let t_max = (self.max - ray.origin).multiply(inv_dir);

        let t1 = t_min.min_components(t_max);
        let t2 = t_min.max_components(t_max);

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Box around all 8 transformed corners.
    pub fn transform(&self, matrix: &Matrix4) -> Self {
        let (lo, hi) = (self.min, self.max);
        let corners = [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ]
        .map(|corner| matrix.transform_point(corner));

        let (min, max) = corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(min, max), &v| {
                (min.min_components(v), max.max_components(v))
            });
        Self::new(min, max)
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    pub object: ObjectId,
    /// Distance along the ray to the hit
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3,
}

/// Picks the closest object hit by a ray.
///
/// Holds no state, so one picker can serve any number of scenes. Local
/// boxes come from [`RenderObject::local_bounds`], which is fixed when the
/// object is added.
///
/// [`RenderObject::local_bounds`]: crate::gfx::scene::RenderObject::local_bounds
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectPicker;

impl ObjectPicker {
    pub fn new() -> Self {
        Self
    }

    pub fn pick(&self, ray: &Ray, scene: &Scene) -> Option<PickResult> {
        let mut closest: Option<PickResult> = None;

        for object in scene.objects() {
            // Objects without vertices cannot be hit.
            let Some((min, max)) = object.local_bounds() else {
                continue;
            };

            let world = Aabb::new(min, max).transform(&object.transform_matrix());
            if let Some(distance) = world.intersect_ray(ray) {
                if closest.map_or(true, |hit| distance < hit.distance) {
                    closest = Some(PickResult {
                        object: object.id(),
                        distance,
                        point: ray.point_at(distance),
                    });
                }
            }
        }

        if let Some(hit) = &closest {
            log::debug!("Picked object {} at distance {:.3}", hit.object, hit.distance);
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::ArcballCamera;
    use crate::gfx::geometry::{build_cube_mesh, build_sphere_mesh};
    use crate::math::Vector4;

    fn unit_box() -> Aabb {
        Aabb::new(Vector3::splat(-1.0), Vector3::splat(1.0))
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, -1.0),
        ];
        let aabb = Aabb::from_vertices(&vertices).unwrap();

        assert_eq!(aabb, unit_box());
        assert!(Aabb::from_vertices(&[]).is_none());
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = unit_box();

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        // Ray missing the box
        let ray_miss =
            Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert!(aabb.intersect_ray(&ray_miss).is_none());

        // Pointing away
        let behind = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(aabb.intersect_ray(&behind).is_none());
    }

    #[test]
    fn test_ray_from_inside_hits_far_side() {
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(unit_box().intersect_ray(&ray), Some(1.0));
        assert_eq!(ray.point_at(1.0), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert!(Ray::new(Vector3::ZERO, Vector3::ZERO).is_err());
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = unit_box();
        let overlapping = Aabb::new(Vector3::splat(0.5), Vector3::splat(2.0));
        let touching = Aabb::new(Vector3::new(1.0, -1.0, -1.0), Vector3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_transform_covers_rotated_box() {
        let moved = unit_box().transform(&Matrix4::transform(
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(0.0, 45.0, 0.0),
            Vector3::ONE,
        ));
        let root_two = 2.0_f32.sqrt();
        assert!(moved.center().approx_eq(Vector3::new(10.0, 0.0, 0.0), 1e-5));
        assert!(moved.size().approx_eq(Vector3::new(2.0 * root_two, 2.0, 2.0 * root_two), 1e-5));
    }

    #[test]
    fn test_ndc_flips_y() {
        let viewport = Vector2::new(800.0, 600.0);
        let top_left = MousePicker::normalized_device_coords(Vector2::ZERO, viewport);
        assert_eq!(top_left, Vector2::new(-1.0, 1.0));
        let center = MousePicker::normalized_device_coords(Vector2::new(400.0, 300.0), viewport);
        assert_eq!(center, Vector2::ZERO);
    }

    #[test]
    fn test_center_ray_points_at_focus() {
        let focus = Vector3::new(2.0, -1.0, 4.0);
        let camera = ArcballCamera::new(focus, Default::default());
        let picker = MousePicker::new(Projection::new(60.0, 4.0 / 3.0, 0.1, 100.0)).unwrap();
        let ray = picker
            .compute_ray(Vector2::new(400.0, 300.0), Vector2::new(800.0, 600.0), &camera)
            .unwrap();

        let expected = (focus - camera.position()).normalize().unwrap();
        assert!(ray.direction.approx_eq(expected, 1e-4));
        assert_eq!(ray.origin, camera.position());
    }

    #[test]
    fn test_pick_closest_object() {
        let white = Vector4::splat(1.0);
        let mut scene = Scene::new();
        let far = scene.add_object(
            build_cube_mesh(white),
            Vector3::new(0.0, 0.0, -10.0),
            Vector3::ZERO,
            Vector3::ONE,
        );
        let near = scene.add_object(
            build_cube_mesh(white),
            Vector3::new(0.0, 0.0, -4.0),
            Vector3::ZERO,
            Vector3::ONE,
        );
        scene.add_object(
            build_cube_mesh(white),
            Vector3::new(5.0, 0.0, -4.0),
            Vector3::ZERO,
            Vector3::ONE,
        );

        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0)).unwrap();
        let picker = ObjectPicker::new();
        let hit = picker.pick(&ray, &scene).unwrap();
        assert_eq!(hit.object, near);
        assert!((hit.distance - 3.5).abs() < 1e-5);

        scene.remove(near);
        assert_eq!(picker.pick(&ray, &scene).unwrap().object, far);
    }

    #[test]
    fn test_one_picker_serves_several_scenes() {
        let white = Vector4::splat(1.0);
        let mut small = Scene::new();
        let cube = small.add_object(
            build_cube_mesh(white),
            Vector3::ZERO,
            Vector3::ZERO,
            Vector3::ONE,
        );
        let mut large = Scene::new();
        let sphere = large.add_object(
            build_sphere_mesh(white, 5.0, 1).unwrap(),
            Vector3::ZERO,
            Vector3::ZERO,
            Vector3::ONE,
        );
        // Both scenes start numbering at zero.
        assert_eq!(cube, sphere);

        let picker = ObjectPicker::new();
        let centered =
            Ray::new(Vector3::new(0.0, 0.0, 20.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(picker.pick(&centered, &small).unwrap().object, cube);

        let offset =
            Ray::new(Vector3::new(3.0, 0.0, 20.0), Vector3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(picker.pick(&offset, &small).is_none());
        let hit = picker.pick(&offset, &large).unwrap();
        assert_eq!(hit.object, sphere);
        assert!(hit.distance > 14.0 && hit.distance < 16.0);
    }

    #[test]
    fn test_pick_nothing() {
        let scene = Scene::new();
        let ray = Ray::new(Vector3::ZERO, Vector3::UNIT_X).unwrap();
        assert!(ObjectPicker::new().pick(&ray, &scene).is_none());
    }
}
