//! # Vector Types
//!
//! Small `f32` vectors used throughout the engine for positions, directions,
//! colors and texture coordinates.
//!
//! All three types are `Copy` values. Every operation returns a new vector;
//! the only way to change a vector in place is an explicit compound
//! assignment (`+=`, `-=`, `*=`) on a binding you own. Two owners can never
//! observe each other's edits.
//!
//! ## Usage
//!
//! ```rust
//! use terra::math::Vector3;
//!
//! let a = Vector3::new(1.0, 0.0, 0.0);
//! let b = Vector3::new(0.0, 1.0, 0.0);
//!
//! assert_eq!(a.cross(b), Vector3::new(0.0, 0.0, 1.0));
//! assert_eq!(a.dot(b), 0.0);
//! assert!(Vector3::ZERO.normalize().is_err());
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use super::MathError;

/// Fast approximation of `1 / sqrt(value)`.
///
/// The classic bit-level estimate followed by a single Newton-Raphson step.
/// Maximum relative error is about 0.175%, so it is only suitable where an
/// approximate magnitude is acceptable. Returns garbage for zero, negative
/// or non-finite inputs, exactly like the original trick.
pub fn quick_inverse_sqrt(value: f32) -> f32 {
    let half = 0.5 * value;
    let bits = 0x5f37_59df_u32.wrapping_sub(value.to_bits() >> 1);
    let estimate = f32::from_bits(bits);
    estimate * (1.5 - half * estimate * estimate)
}

/// Two-component vector, mostly used for texture coordinates and screen
/// positions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// Three-component vector for positions, directions, normals and Euler
/// rotations (degrees).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four-component vector for homogeneous coordinates and RGBA colors.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Componentwise product.
    pub fn multiply(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Componentwise quotient. Zero components produce infinities, as with
    /// plain `f32` division.
    pub fn divide(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    pub fn normalize(self) -> Result<Self, MathError> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(MathError::DegenerateVector {
                operation: "normalize",
            });
        }
        Ok(self / length)
    }

    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    pub fn from_xy(xy: Vector2, z: f32) -> Self {
        Self::new(xy.x, xy.y, z)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Componentwise product.
    pub fn multiply(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Componentwise quotient. Zero components produce infinities, as with
    /// plain `f32` division.
    pub fn divide(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    /// Unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// [`MathError::DegenerateVector`] when the length is zero or not finite.
    pub fn normalize(self) -> Result<Self, MathError> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(MathError::DegenerateVector {
                operation: "normalize",
            });
        }
        Ok(self / length)
    }

    /// Vector in the same direction with the given length.
    pub fn normalize_to(self, length: f32) -> Result<Self, MathError> {
        Ok(self.normalize()? * length)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    pub fn midpoint(self, other: Self) -> Self {
        (self + other) * 0.5
    }

    /// Unsigned angle between two vectors, in radians.
    pub fn angle_between(self, other: Self) -> Result<f32, MathError> {
        let denominator = self.length() * other.length();
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(MathError::DegenerateVector {
                operation: "angle_between",
            });
        }
        // Rounding can push the cosine just past +-1.
        Ok((self.dot(other) / denominator).clamp(-1.0, 1.0).acos())
    }

    /// Symmetric tolerance comparison: every component differs by at most
    /// `epsilon`.
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }

    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn xz(self) -> Vector2 {
        Vector2::new(self.x, self.z)
    }

    pub fn yz(self) -> Vector2 {
        Vector2::new(self.y, self.z)
    }

    /// Homogeneous point (`w = 1`).
    pub fn extend(self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn min_components(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max_components(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn from_xy(xy: Vector2, z: f32, w: f32) -> Self {
        Self::new(xy.x, xy.y, z, w)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Componentwise product.
    pub fn multiply(self, other: Self) -> Self {
        Self::new(
            self.x * other.x,
            self.y * other.y,
            self.z * other.z,
            self.w * other.w,
        )
    }

    /// Componentwise quotient.
    pub fn divide(self, other: Self) -> Self {
        Self::new(
            self.x / other.x,
            self.y / other.y,
            self.z / other.z,
            self.w / other.w,
        )
    }

    pub fn normalize(self) -> Result<Self, MathError> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(MathError::DegenerateVector {
                operation: "normalize",
            });
        }
        Ok(self * (1.0 / length))
    }

    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
            && (self.w - other.w).abs() <= epsilon
    }

    pub fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

macro_rules! impl_vector_ops {
    ($name:ident { $($field:ident),+ }) => {
        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$name> for f32 {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl Div<f32> for $name {
            type Output = Self;
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $name {
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }
    };
}

impl_vector_ops!(Vector2 { x, y });
impl_vector_ops!(Vector3 { x, y, z });
impl_vector_ops!(Vector4 { x, y, z, w });

impl Index<usize> for Vector3 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of range: {index}"),
        }
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vector4 index out of range: {index}"),
        }
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Vector3> for cgmath::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        cgmath::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<cgmath::Vector3<f32>> for Vector3 {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector4> for cgmath::Vector4<f32> {
    fn from(v: Vector4) -> Self {
        cgmath::Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<cgmath::Vector4<f32>> for Vector4 {
    fn from(v: cgmath::Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2}, {:.2})", self.x, self.y, self.z, self.w)
    }
}
