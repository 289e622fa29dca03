use crate::math::Vector2;

use super::Camera;

/// Logical camera keys. Windowing code decides which physical keys they
/// map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    /// Restores the arcball defaults.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Rotates while held.
    Primary,
    /// Pans the arcball focus while held.
    Secondary,
}

/// Current-value queries against whatever owns the input devices.
///
/// Positions and scroll offsets are absolute; [`CameraController`] turns
/// them into per-frame deltas.
pub trait InputSource {
    fn mouse_position(&self) -> Vector2;
    fn scroll_offset(&self) -> f32;
    fn is_key_down(&self, key: CameraKey) -> bool;
    fn is_button_down(&self, button: MouseButton) -> bool;
}

/// One frame of camera input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub mouse_delta: Vector2,
    pub scroll_delta: f32,
    pub primary_button: bool,
    pub secondary_button: bool,
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub reset: bool,
}

impl FrameInput {
    pub fn with_mouse_delta(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_delta = Vector2::new(dx, dy);
        self
    }

    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self
    }
}

/// Turns polled absolute input into deltas. The first poll has nothing to
/// compare against and reports zero movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraController {
    last_mouse: Option<Vector2>,
    last_scroll: Option<f32>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, source: &impl InputSource) -> FrameInput {
        let mouse = source.mouse_position();
        let scroll = source.scroll_offset();

        let mouse_delta = self.last_mouse.map_or(Vector2::ZERO, |last| mouse - last);
        let scroll_delta = self.last_scroll.map_or(0.0, |last| scroll - last);
        self.last_mouse = Some(mouse);
        self.last_scroll = Some(scroll);

        FrameInput {
            mouse_delta,
            scroll_delta,
            primary_button: source.is_button_down(MouseButton::Primary),
            secondary_button: source.is_button_down(MouseButton::Secondary),
            forward: source.is_key_down(CameraKey::Forward),
            back: source.is_key_down(CameraKey::Back),
            left: source.is_key_down(CameraKey::Left),
            right: source.is_key_down(CameraKey::Right),
            up: source.is_key_down(CameraKey::Up),
            down: source.is_key_down(CameraKey::Down),
            reset: source.is_key_down(CameraKey::Reset),
        }
    }

    /// Forgets the last mouse and scroll values, e.g. after the window
    /// regains focus.
    pub fn forget(&mut self) {
        self.last_mouse = None;
        self.last_scroll = None;
    }
}

/// A camera together with the controller that feeds it.
pub struct CameraManager<C: Camera> {
    pub camera: C,
    pub controller: CameraController,
}

impl<C: Camera> CameraManager<C> {
    pub fn new(camera: C) -> Self {
        Self {
            camera,
            controller: CameraController::new(),
        }
    }

    /// Polls `source` and advances the camera; returns the input that was
    /// applied.
    pub fn update(&mut self, source: &impl InputSource) -> FrameInput {
        let input = self.controller.poll(source);
        self.camera.update(&input);
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::FreeFlyCamera;
    use crate::math::Vector3;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeInput {
        mouse: Vector2,
        scroll: f32,
        keys: HashSet<CameraKey>,
        buttons: HashSet<MouseButton>,
    }

    impl InputSource for FakeInput {
        fn mouse_position(&self) -> Vector2 {
            self.mouse
        }

        fn scroll_offset(&self) -> f32 {
            self.scroll
        }

        fn is_key_down(&self, key: CameraKey) -> bool {
            self.keys.contains(&key)
        }

        fn is_button_down(&self, button: MouseButton) -> bool {
            self.buttons.contains(&button)
        }
    }

    #[test]
    fn test_first_poll_has_zero_deltas() {
        let input = FakeInput {
            mouse: Vector2::new(400.0, 300.0),
            scroll: 5.0,
            ..Default::default()
        };
        let mut controller = CameraController::new();
        let frame = controller.poll(&input);
        assert_eq!(frame.mouse_delta, Vector2::ZERO);
        assert_eq!(frame.scroll_delta, 0.0);
    }

    #[test]
    fn test_deltas_between_polls() {
        let mut input = FakeInput::default();
        let mut controller = CameraController::new();
        controller.poll(&input);

        input.mouse = Vector2::new(10.0, -4.0);
        input.scroll = 2.0;
        input.buttons.insert(MouseButton::Primary);
        input.keys.insert(CameraKey::Forward);

        let frame = controller.poll(&input);
        assert_eq!(frame.mouse_delta, Vector2::new(10.0, -4.0));
        assert_eq!(frame.scroll_delta, 2.0);
        assert!(frame.primary_button);
        assert!(!frame.secondary_button);
        assert!(frame.forward);
        assert!(!frame.back);

        // No movement since the last poll.
        let frame = controller.poll(&input);
        assert_eq!(frame.mouse_delta, Vector2::ZERO);
        assert_eq!(frame.scroll_delta, 0.0);
    }

    #[test]
    fn test_forget_resets_reference() {
        let mut input = FakeInput::default();
        let mut controller = CameraController::new();
        controller.poll(&input);
        controller.forget();
        input.mouse = Vector2::new(50.0, 50.0);
        assert_eq!(controller.poll(&input).mouse_delta, Vector2::ZERO);
    }

    #[test]
    fn test_manager_drives_camera() {
        let mut input = FakeInput::default();
        input.keys.insert(CameraKey::Forward);
        let mut manager = CameraManager::new(FreeFlyCamera::new(Vector3::ZERO, Vector3::ZERO));

        manager.update(&input);
        manager.update(&input);
        assert!(manager.camera.position().approx_eq(Vector3::new(0.0, 0.0, -0.1), 1e-6));
    }
}
