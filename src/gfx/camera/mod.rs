//! # Cameras
//!
//! Transform logic for the two camera styles the engine supports. Neither
//! camera reads devices directly: an [`InputSource`] is polled once per
//! frame by a [`CameraController`], which hands the camera a [`FrameInput`]
//! of deltas.
//!
//! - [`ArcballCamera`] orbits a focus point; its position and rotation are
//!   always derived from the focus, distance and two angles.
//! - [`FreeFlyCamera`] moves on the XZ plane relative to its yaw and looks
//!   around with the mouse.
//!
//! All angles are Euler angles in degrees.

pub mod arcball;
pub mod camera_controller;
pub mod camera_utils;
pub mod free_fly;

use crate::math::{Matrix4, Vector3};

pub use arcball::ArcballCamera;
pub use camera_controller::{
    CameraController, CameraKey, CameraManager, FrameInput, InputSource, MouseButton,
};
pub use camera_utils::{matrix_to_columns, CameraUniform, Projection};
pub use free_fly::FreeFlyCamera;

pub trait Camera {
    fn position(&self) -> Vector3;

    /// Euler rotation in degrees.
    fn rotation(&self) -> Vector3;

    /// Advances the camera by one frame of input.
    fn update(&mut self, input: &FrameInput);

    fn view_matrix(&self) -> Matrix4 {
        Matrix4::view(self.position(), self.rotation())
    }

    /// View followed by `projection`.
    fn view_projection(&self, projection: &Matrix4) -> Matrix4 {
        Matrix4::multiply(&self.view_matrix(), projection)
    }
}

/// Movement and mouse tuning shared by both cameras, plus the arcball
/// defaults that a reset returns to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub default_distance: f32,
    pub default_vertical_angle: f32,
    pub default_horizontal_angle: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            mouse_sensitivity: 0.1,
            zoom_speed: 1.0,
            min_distance: 0.1,
            default_distance: 3.0,
            default_vertical_angle: -30.0,
            default_horizontal_angle: 30.0,
        }
    }
}
