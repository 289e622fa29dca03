use std::fmt;

use crate::math::{Matrix4, Vector3};

use super::mesh::Mesh;

/// Opaque handle for an object in a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out sequential [`ObjectId`]s. Each scene owns its own allocator,
/// so identifiers are only unique within that scene.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// A mesh placed in the world.
///
/// The mesh is fixed once the object exists, so its local bounds are
/// computed up front.
#[derive(Debug, Clone)]
pub struct RenderObject {
    id: ObjectId,
    mesh: Mesh,
    local_bounds: Option<(Vector3, Vector3)>,
    pub position: Vector3,
    /// Euler angles in degrees.
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl RenderObject {
    pub fn new(id: ObjectId, mesh: Mesh, position: Vector3, rotation: Vector3, scale: Vector3) -> Self {
        Self {
            id,
            local_bounds: mesh.bounds(),
            mesh,
            position,
            rotation,
            scale,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Min and max corners of the mesh in object space, `None` for an
    /// empty mesh.
    pub fn local_bounds(&self) -> Option<(Vector3, Vector3)> {
        self.local_bounds
    }

    /// Model matrix built from the current position, rotation and scale.
    pub fn transform_matrix(&self) -> Matrix4 {
        Matrix4::transform(self.position, self.rotation, self.scale)
    }

    /// Apply translation on top of the current position
    pub fn translate(&mut self, delta: Vector3) {
        self.position += delta;
    }

    /// Apply rotation (degrees) on top of the current rotation
    pub fn rotate(&mut self, delta: Vector3) {
        self.rotation += delta;
    }

    pub fn reset_transform(&mut self) {
        self.position = Vector3::ZERO;
        self.rotation = Vector3::ZERO;
        self.scale = Vector3::ONE;
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }
}
