use crate::math::{MathError, Vector3};

use super::{Camera, CameraSettings, FrameInput};

/// Axis a pan drag is locked to until [`ArcballCamera::end_pan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanAxis {
    Horizontal,
    Vertical,
}

/// Orbits `focus` at `distance`. Drag with the primary button to rotate,
/// scroll to zoom, drag with the secondary button to pan.
#[derive(Debug, Clone, Copy)]
pub struct ArcballCamera {
    focus: Vector3,
    distance: f32,
    horizontal_angle: f32,
    vertical_angle: f32,
    position: Vector3,
    rotation: Vector3,
    settings: CameraSettings,
    pan_axis: Option<PanAxis>,
}

impl Camera for ArcballCamera {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn rotation(&self) -> Vector3 {
        self.rotation
    }

    fn update(&mut self, input: &FrameInput) {
        if input.reset {
            self.restore_defaults();
        }

        let delta = input.mouse_delta;
        if input.secondary_button {
            if let Err(err) = self.pan(delta.x, delta.y) {
                log::warn!("Skipping arcball pan: {}", err);
            }
        } else {
            self.end_pan();
            if input.primary_button {
                self.vertical_angle -= delta.y * self.settings.mouse_sensitivity;
                self.horizontal_angle += delta.x * self.settings.mouse_sensitivity;
            }
        }

        self.zoom(input.scroll_delta);
        self.recompute();
    }
}

impl ArcballCamera {
    pub fn new(focus: Vector3, settings: CameraSettings) -> Self {
        let mut camera = Self {
            focus,
            distance: settings.default_distance,
            horizontal_angle: settings.default_horizontal_angle,
            vertical_angle: settings.default_vertical_angle,
            position: Vector3::ZERO, // Derived in `recompute()`.
            rotation: Vector3::ZERO,
            settings,
            pan_axis: None,
        };
        camera.recompute();
        camera
    }

    pub fn focus(&self) -> Vector3 {
        self.focus
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn horizontal_angle(&self) -> f32 {
        self.horizontal_angle
    }

    pub fn vertical_angle(&self) -> f32 {
        self.vertical_angle
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn set_focus(&mut self, focus: Vector3) {
        self.focus = focus;
        self.recompute();
    }

    /// Looks at `focus` again from the default distance and angles.
    pub fn reset(&mut self, focus: Vector3) {
        self.focus = focus;
        self.restore_defaults();
        self.recompute();
    }

    /// Moves the focus and the camera together across the screen plane.
    ///
    /// The first call after [`end_pan`](Self::end_pan) locks the drag to
    /// whichever of `dx` and `dy` is larger; the other component is
    /// ignored until the pan ends.
    pub fn pan(&mut self, dx: f32, dy: f32) -> Result<(), MathError> {
        let axis = *self.pan_axis.get_or_insert(if dx.abs() > dy.abs() {
            PanAxis::Horizontal
        } else {
            PanAxis::Vertical
        });
        let (dx, dy) = match axis {
            PanAxis::Horizontal => (dx, 0.0),
            PanAxis::Vertical => (0.0, dy),
        };

        let looking = (self.focus - self.position).normalize()?;
        let mut helper = looking + Vector3::UNIT_Y;
        if helper.approx_eq(Vector3::ZERO, 1e-4) {
            helper = looking + Vector3::new(0.0, 2.0, 0.0);
        }
        let across = helper.cross(looking).normalize()?;
        let up = looking.cross(across).normalize()?;

        let step = self.settings.move_speed * self.settings.mouse_sensitivity;
        let offset = -(across * dx + up * dy) * step;
        self.focus += offset;
        self.position += offset;
        Ok(())
    }

    pub fn end_pan(&mut self) {
        self.pan_axis = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_axis.is_some()
    }

    fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * self.settings.zoom_speed)
            .max(self.settings.min_distance);
    }

    fn restore_defaults(&mut self) {
        self.distance = self.settings.default_distance;
        self.horizontal_angle = self.settings.default_horizontal_angle;
        self.vertical_angle = self.settings.default_vertical_angle;
    }

    /// Derives position and rotation from focus, distance and angles.
    fn recompute(&mut self) {
        let (sin_v, cos_v) = self.vertical_angle.to_radians().sin_cos();
        let horizontal_distance = self.distance * cos_v;
        let vertical_distance = self.distance * sin_v;

        let (sin_h, cos_h) = (-self.horizontal_angle).to_radians().sin_cos();
        self.position = self.focus
            + Vector3::new(
                horizontal_distance * sin_h,
                -vertical_distance,
                horizontal_distance * cos_h,
            );
        self.rotation = Vector3::new(self.vertical_angle, -self.horizontal_angle, 0.0);
    }
}

impl Default for ArcballCamera {
    fn default() -> Self {
        Self::new(Vector3::ZERO, CameraSettings::default())
    }
}
