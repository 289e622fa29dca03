//! # Color Gradients
//!
//! Piecewise-linear color ramps, used to tint procedural geometry by height
//! or noise value.
//!
//! ## Usage
//!
//! ```rust
//! use terra::math::{ColorFader, Vector3};
//!
//! let fader = ColorFader::new(vec![
//!     (0.0, ColorFader::from_rgb8(34, 85, 34)),
//!     (1.0, ColorFader::from_rgb8(240, 240, 240)),
//! ])
//! .unwrap();
//!
//! let snow_line = fader.color_at(0.9);
//! assert!(snow_line.x > 0.8);
//! ```

use crate::error::{GeometryError, Result};

use super::{Vector3, Vector4};

#[derive(Debug, Clone, PartialEq)]
pub struct ColorFader {
    stops: Vec<(f32, Vector3)>,
}

impl ColorFader {
    /// Builds a gradient from `(position, rgb)` stops.
    ///
    /// At least two stops are required and positions must be finite and
    /// strictly increasing.
    pub fn new(stops: Vec<(f32, Vector3)>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(GeometryError::InvalidParameter {
                name: "stops",
                reason: format!("need at least 2 color stops, got {}", stops.len()),
            });
        }
        if stops.iter().any(|(position, _)| !position.is_finite()) {
            return Err(GeometryError::InvalidParameter {
                name: "stops",
                reason: "stop positions must be finite".to_string(),
            });
        }
        if stops.windows(2).any(|pair| pair[1].0 <= pair[0].0) {
            return Err(GeometryError::InvalidParameter {
                name: "stops",
                reason: "stop positions must be strictly increasing".to_string(),
            });
        }
        Ok(Self { stops })
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Vector3 {
        Vector3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn color_at(&self, position: f32) -> Vector3 {
        let (first_position, first_color) = self.stops[0];
        if position <= first_position || position.is_nan() {
            return first_color;
        }

        for pair in self.stops.windows(2) {
            let (start, from) = pair[0];
            let (end, to) = pair[1];
            if position <= end {
                let t = (position - start) / (end - start);
                return from + (to - from) * t;
            }
        }

        self.stops[self.stops.len() - 1].1
    }

    /// [`ColorFader::color_at`] with an opaque alpha channel.
    pub fn rgba_at(&self, position: f32) -> Vector4 {
        self.color_at(position).extend(1.0)
    }

    pub fn stops(&self) -> &[(f32, Vector3)] {
        &self.stops
    }
}
