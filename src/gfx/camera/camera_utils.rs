use crate::math::{MathError, Matrix4};

use super::Camera;

/// Perspective parameters shared by rendering and picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Matrix4 {
        Matrix4::projection(self.fov_degrees, self.aspect, self.near, self.far)
    }

    pub fn inverse(&self) -> Result<Matrix4, MathError> {
        Matrix4::inverse_projection(self.fov_degrees, self.aspect, self.near, self.far)
    }
}

/// Camera data laid out for a shader uniform block.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// World-space camera position with `w = 1`. The fourth component keeps
    /// the field at 16 bytes, the alignment uniform blocks use for vectors.
    pub view_position: [f32; 4],

    /// Column-major view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: matrix_to_columns(&Matrix4::identity()),
        }
    }
}

impl CameraUniform {
    pub fn update_view_proj(&mut self, camera: &impl Camera, projection: &Projection) {
        self.view_position = camera.position().extend(1.0).to_array();
        self.view_proj = matrix_to_columns(&camera.view_projection(&projection.matrix()));
    }
}

pub fn matrix_to_columns(matrix: &Matrix4) -> [[f32; 4]; 4] {
    matrix.to_columns()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::ArcballCamera;
    use crate::math::Vector4;

    #[test]
    fn test_default_uniform_is_identity() {
        let uniform = CameraUniform::default();
        assert_eq!(uniform.view_proj[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniform.view_proj[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 80);
    }

    #[test]
    fn test_columns_hold_translation_last() {
        let m = Matrix4::translate([1.0, 2.0, 3.0].into());
        assert_eq!(matrix_to_columns(&m)[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_uniform_projects_focus_to_screen_center() {
        let camera = ArcballCamera::default();
        let projection = Projection::new(60.0, 1.5, 0.1, 100.0);
        let mut uniform = CameraUniform::default();
        uniform.update_view_proj(&camera, &projection);

        assert_eq!(uniform.view_position[3], 1.0);

        // Column-major layout: clip = sum of columns weighted by the point.
        let p = Vector4::new(0.0, 0.0, 0.0, 1.0);
        let cols = uniform.view_proj;
        let clip: Vec<f32> = (0..4)
            .map(|row| (0..4).map(|c| cols[c][row] * p[c]).sum())
            .collect();
        assert!((clip[0] / clip[3]).abs() < 1e-5);
        assert!((clip[1] / clip[3]).abs() < 1e-5);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut projection = Projection::default();
        projection.resize(800, 400);
        assert_eq!(projection.aspect, 2.0);
        projection.resize(800, 0);
        assert_eq!(projection.aspect, 2.0);
    }
}
