use crate::math::Vector3;

use super::{Camera, CameraSettings, FrameInput};

/// First-person camera. Movement keys walk relative to the current yaw and
/// never change height; up and down move straight along Y.
#[derive(Debug, Clone, Copy)]
pub struct FreeFlyCamera {
    position: Vector3,
    rotation: Vector3,
    settings: CameraSettings,
}

impl Camera for FreeFlyCamera {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn rotation(&self) -> Vector3 {
        self.rotation
    }

    fn update(&mut self, input: &FrameInput) {
        let speed = self.settings.move_speed;
        let (sin_yaw, cos_yaw) = self.rotation.y.to_radians().sin_cos();
        let x = sin_yaw * speed;
        let z = cos_yaw * speed;

        if input.left {
            self.position += Vector3::new(-z, 0.0, x);
        }
        if input.right {
            self.position += Vector3::new(z, 0.0, -x);
        }
        if input.forward {
            self.position += Vector3::new(-x, 0.0, -z);
        }
        if input.back {
            self.position += Vector3::new(x, 0.0, z);
        }
        if input.up {
            self.position.y += speed;
        }
        if input.down {
            self.position.y -= speed;
        }

        let sensitivity = self.settings.mouse_sensitivity;
        let delta = input.mouse_delta;
        self.rotation += Vector3::new(-delta.y * sensitivity, -delta.x * sensitivity, 0.0);
    }
}

impl FreeFlyCamera {
    pub fn new(position: Vector3, rotation: Vector3) -> Self {
        Self::with_settings(position, rotation, CameraSettings::default())
    }

    pub fn with_settings(position: Vector3, rotation: Vector3, settings: CameraSettings) -> Self {
        Self {
            position,
            rotation,
            settings,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Vector3) {
        self.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(apply: impl FnOnce(&mut FrameInput)) -> FrameInput {
        let mut input = FrameInput::default();
        apply(&mut input);
        input
    }

    #[test]
    fn test_forward_follows_view_direction() {
        for yaw in [0.0, 45.0, 90.0, 200.0] {
            let mut camera = FreeFlyCamera::new(Vector3::ZERO, Vector3::new(0.0, yaw, 0.0));
            camera.update(&keys(|i| i.forward = true));

            // Whatever the yaw, forward ends up straight ahead in eye space.
            let moved = camera.position();
            let view = FreeFlyCamera::new(Vector3::ZERO, camera.rotation()).view_matrix();
            let ahead = view.transform_direction(moved);
            assert!(ahead.approx_eq(Vector3::new(0.0, 0.0, -0.05), 1e-6), "yaw {yaw}");
        }
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let start = Vector3::new(1.0, 2.0, 3.0);
        let mut camera = FreeFlyCamera::new(start, Vector3::new(0.0, 30.0, 0.0));
        camera.update(&keys(|i| {
            i.forward = true;
            i.back = true;
            i.left = true;
            i.right = true;
            i.up = true;
            i.down = true;
        }));
        assert!(camera.position().approx_eq(start, 1e-6));
    }

    #[test]
    fn test_strafe_at_zero_yaw() {
        let mut camera = FreeFlyCamera::new(Vector3::ZERO, Vector3::ZERO);
        camera.update(&keys(|i| i.right = true));
        assert!(camera.position().approx_eq(Vector3::new(0.05, 0.0, 0.0), 1e-7));

        camera.update(&keys(|i| i.up = true));
        assert!(camera.position().approx_eq(Vector3::new(0.05, 0.05, 0.0), 1e-7));
    }

    #[test]
    fn test_mouse_turns_camera() {
        let mut camera = FreeFlyCamera::new(Vector3::ZERO, Vector3::ZERO);
        camera.update(&FrameInput::default().with_mouse_delta(10.0, -20.0));
        assert!(camera.rotation().approx_eq(Vector3::new(2.0, -1.0, 0.0), 1e-6));
    }
}
