use crate::math::{Vector3, Vector4};

use super::mesh::Mesh;
use super::object::{IdAllocator, ObjectId, RenderObject};

/// Main scene containing render objects and the light
#[derive(Debug, Clone)]
pub struct Scene {
    ids: IdAllocator,
    objects: Vec<RenderObject>,
    pub light_position: Vector3,
    pub light_color: Vector4,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene with a white light above the origin
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            objects: Vec::new(),
            light_position: Vector3::new(0.0, 100.0, 0.0),
            light_color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Takes ownership of `mesh` and places it in the scene
    pub fn add_object(
        &mut self,
        mesh: Mesh,
        position: Vector3,
        rotation: Vector3,
        scale: Vector3,
    ) -> ObjectId {
        let id = self.ids.allocate();
        log::debug!(
            "Adding object {} ({} vertices, {} triangles) at {}",
            id,
            mesh.vertex_count(),
            mesh.triangle_count(),
            position
        );
        self.objects
            .push(RenderObject::new(id, mesh, position, rotation, scale));
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&RenderObject> {
        self.objects.iter().find(|object| object.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut RenderObject> {
        self.objects.iter_mut().find(|object| object.id() == id)
    }

    /// Removes the object and hands its ownership back
    pub fn remove(&mut self, id: ObjectId) -> Option<RenderObject> {
        let index = self.objects.iter().position(|object| object.id() == id)?;
        Some(self.objects.remove(index))
    }

    pub fn objects(&self) -> &[RenderObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Triangle;

    fn triangle_mesh() -> Mesh {
        Mesh::from_triangles(
            &[Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y)],
            Vector4::splat(1.0),
        )
    }

    #[test]
    fn test_add_get_remove() {
        let mut scene = Scene::new();
        let a = scene.add_object(triangle_mesh(), Vector3::ZERO, Vector3::ZERO, Vector3::ONE);
        let b = scene.add_object(triangle_mesh(), Vector3::UNIT_X, Vector3::ZERO, Vector3::ONE);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(b).unwrap().position, Vector3::UNIT_X);

        let removed = scene.remove(a).unwrap();
        assert_eq!(removed.id(), a);
        assert!(scene.get(a).is_none());
        assert!(scene.remove(a).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut scene = Scene::new();
        let a = scene.add_object(triangle_mesh(), Vector3::ZERO, Vector3::ZERO, Vector3::ONE);
        scene.remove(a);
        let b = scene.add_object(triangle_mesh(), Vector3::ZERO, Vector3::ZERO, Vector3::ONE);
        assert_ne!(a, b);
    }
}
