//! # Matrix4
//!
//! 4x4 `f32` matrix used for model, view and projection transforms.
//!
//! ## Layout
//!
//! The sixteen elements are stored **row-major** and addressed as
//! `get(column, row)`, i.e. element index `row * 4 + column`. Read as rows,
//! the storage is the usual column-vector matrix: translation lives in
//! column 3 and `m * v` transforms a column vector.
//!
//! Products compose **left to right**: `a * b` (or [`Matrix4::multiply`])
//! is the transform that applies `a` first and then `b`. This is why
//! [`Matrix4::transform`] reads `scale * rotation * translation`.
//!
//! When handing a matrix to a graphics API either upload
//! [`Matrix4::to_row_major`] with the transpose flag set, or upload
//! [`Matrix4::to_column_major`] as-is.
//!
//! ## Usage
//!
//! ```rust
//! use terra::math::{Matrix4, Vector3, Vector4};
//!
//! let model = Matrix4::transform(
//!     Vector3::new(0.0, 1.0, 0.0),
//!     Vector3::new(0.0, 90.0, 0.0),
//!     Vector3::ONE,
//! );
//! let inverse = Matrix4::invert(&model).unwrap();
//! assert!((model * inverse).approx_eq(&Matrix4::identity(), 1e-5));
//!
//! let moved = Matrix4::translate(Vector3::new(1.0, 2.0, 3.0)) * Vector4::new(0.0, 0.0, 0.0, 1.0);
//! assert_eq!(moved, Vector4::new(1.0, 2.0, 3.0, 1.0));
//! ```

use std::fmt;
use std::ops::Mul;

use super::{MathError, Vector2, Vector3, Vector4};

/// Singularity tolerance relative to the product of the row lengths.
///
/// That product bounds `|det|` from above, so the check does not depend on
/// how large or small the entries are overall.
pub const SINGULAR_EPSILON: f32 = 1e-12;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4 {
    elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    pub const fn zero() -> Self {
        Self {
            elements: [0.0; 16],
        }
    }

    pub const fn identity() -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds a matrix from its rows as written on paper.
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let [r0, r1, r2, r3] = rows;
        Self {
            elements: [
                r0[0], r0[1], r0[2], r0[3], //
                r1[0], r1[1], r1[2], r1[3], //
                r2[0], r2[1], r2[2], r2[3], //
                r3[0], r3[1], r3[2], r3[3],
            ],
        }
    }

    pub const fn from_row_major(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn get(&self, column: usize, row: usize) -> f32 {
        self.elements[row * 4 + column]
    }

    #[inline]
    pub fn set(&mut self, column: usize, row: usize, value: f32) {
        self.elements[row * 4 + column] = value;
    }

    pub fn translate(offset: Vector3) -> Self {
        let mut m = Self::identity();
        m.set(3, 0, offset.x);
        m.set(3, 1, offset.y);
        m.set(3, 2, offset.z);
        m
    }

    pub fn scale(factors: Vector3) -> Self {
        let mut m = Self::identity();
        m.set(0, 0, factors.x);
        m.set(1, 1, factors.y);
        m.set(2, 2, factors.z);
        m
    }

    /// Right-handed rotation of `angle_degrees` about an arbitrary axis
    /// (Rodrigues' formula). The axis is normalized here, callers can pass
    /// any non-zero length.
    ///
    /// # Errors
    ///
    /// [`MathError::DegenerateVector`] for a zero-length axis.
    pub fn rotate(angle_degrees: f32, axis: Vector3) -> Result<Self, MathError> {
        let axis = axis.normalize().map_err(|_| MathError::DegenerateVector {
            operation: "rotate",
        })?;
        Ok(Self::rotation_about_unit_axis(angle_degrees, axis))
    }

    pub fn rotate_x(angle_degrees: f32) -> Self {
        Self::rotation_about_unit_axis(angle_degrees, Vector3::UNIT_X)
    }

    pub fn rotate_y(angle_degrees: f32) -> Self {
        Self::rotation_about_unit_axis(angle_degrees, Vector3::UNIT_Y)
    }

    pub fn rotate_z(angle_degrees: f32) -> Self {
        Self::rotation_about_unit_axis(angle_degrees, Vector3::UNIT_Z)
    }

    fn rotation_about_unit_axis(angle_degrees: f32, axis: Vector3) -> Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        let t = 1.0 - c;
        let Vector3 { x, y, z } = axis;

        Self::from_rows([
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y, 0.0],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x, 0.0],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Model matrix: scale, then rotate about X, Y and Z (degrees), then
    /// translate.
    pub fn transform(position: Vector3, rotation: Vector3, scale: Vector3) -> Self {
        let rotation = Self::multiply(
            &Self::rotate_x(rotation.x),
            &Self::multiply(&Self::rotate_y(rotation.y), &Self::rotate_z(rotation.z)),
        );
        Self::multiply(
            &Self::multiply(&Self::scale(scale), &rotation),
            &Self::translate(position),
        )
    }

    /// OpenGL-style perspective projection (right-handed eye space, clip
    /// depth in `[-1, 1]`).
    pub fn projection(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (fov_degrees.to_radians() / 2.0).tan();
        let range = far - near;

        let mut m = Self::zero();
        m.set(0, 0, 1.0 / (aspect * tan_half_fov));
        m.set(1, 1, 1.0 / tan_half_fov);
        m.set(2, 2, -((far + near) / range));
        m.set(2, 3, -1.0);
        m.set(3, 2, -((2.0 * far * near) / range));
        m
    }

    /// Closed-form inverse of [`Matrix4::projection`] for the same
    /// parameters.
    pub fn inverse_projection(
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, MathError> {
        let projection = Self::projection(fov_degrees, aspect, near, far);
        let determinant = projection.determinant();
        if projection.is_singular(determinant) {
            return Err(MathError::SingularMatrix { determinant });
        }

        let depth_scale = projection.get(2, 2);
        let depth_offset = projection.get(3, 2);

        let mut m = Self::zero();
        m.set(0, 0, 1.0 / projection.get(0, 0));
        m.set(1, 1, 1.0 / projection.get(1, 1));
        m.set(3, 2, -1.0);
        m.set(2, 3, 1.0 / depth_offset);
        m.set(3, 3, depth_scale / depth_offset);
        Ok(m)
    }

    /// View matrix for a camera at `position` with Euler `rotation`
    /// (degrees). This is the inverse of the camera's own model transform:
    /// translate by `-position`, then undo the Z, Y and X rotations.
    pub fn view(position: Vector3, rotation: Vector3) -> Self {
        let mut m = Self::translate(-position);
        m = Self::multiply(&m, &Self::rotate_z(-rotation.z));
        m = Self::multiply(&m, &Self::rotate_y(-rotation.y));
        Self::multiply(&m, &Self::rotate_x(-rotation.x))
    }

    /// `a` then `b`.
    pub fn multiply(a: &Self, b: &Self) -> Self {
        let mut result = Self::zero();
        for column in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a.get(column, k) * b.get(k, row);
                }
                result.set(column, row, sum);
            }
        }
        result
    }

    pub fn transform_vector(&self, v: Vector4) -> Vector4 {
        let row = |r: usize| {
            self.get(0, r) * v.x + self.get(1, r) * v.y + self.get(2, r) * v.z + self.get(3, r) * v.w
        };
        Vector4::new(row(0), row(1), row(2), row(3))
    }

    /// Transforms a point (`w = 1`) and applies the perspective divide when
    /// the resulting `w` is usable.
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        let v = self.transform_vector(point.extend(1.0));
        if v.w != 0.0 && v.w.is_finite() {
            v.xyz() / v.w
        } else {
            v.xyz()
        }
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.transform_vector(direction.extend(0.0)).xyz()
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::zero();
        for column in 0..4 {
            for row in 0..4 {
                result.set(row, column, self.get(column, row));
            }
        }
        result
    }

    pub fn determinant(&self) -> f32 {
        let m = |row: usize, column: usize| self.elements[row * 4 + column];
        let minors = Minors::new(self);

        m(0, 0) * (m(1, 1) * minors.a2323 - m(1, 2) * minors.a1323 + m(1, 3) * minors.a1223)
            - m(0, 1) * (m(1, 0) * minors.a2323 - m(1, 2) * minors.a0323 + m(1, 3) * minors.a0223)
            + m(0, 2) * (m(1, 0) * minors.a1323 - m(1, 1) * minors.a0323 + m(1, 3) * minors.a0123)
            - m(0, 3) * (m(1, 0) * minors.a1223 - m(1, 1) * minors.a0223 + m(1, 2) * minors.a0123)
    }

    fn is_singular(&self, determinant: f32) -> bool {
        let row_lengths: f32 = self
            .elements
            .chunks_exact(4)
            .map(|row| row.iter().map(|e| e * e).sum::<f32>().sqrt())
            .product();
        !determinant.is_finite() || determinant.abs() <= SINGULAR_EPSILON * row_lengths
    }

    /// General inverse by cofactor expansion.
    ///
    /// # Errors
    ///
    /// [`MathError::SingularMatrix`] when the determinant is zero, not
    /// finite, or within [`SINGULAR_EPSILON`] of zero relative to the
    /// product of the row lengths.
    pub fn invert(matrix: &Self) -> Result<Self, MathError> {
        let determinant = matrix.determinant();
        if matrix.is_singular(determinant) {
            return Err(MathError::SingularMatrix { determinant });
        }

        let m = |row: usize, column: usize| matrix.elements[row * 4 + column];
        let a = Minors::new(matrix);
        let inv = 1.0 / determinant;

        Ok(Self::from_rows([
            [
                inv * (m(1, 1) * a.a2323 - m(1, 2) * a.a1323 + m(1, 3) * a.a1223),
                inv * -(m(0, 1) * a.a2323 - m(0, 2) * a.a1323 + m(0, 3) * a.a1223),
                inv * (m(0, 1) * a.a2313 - m(0, 2) * a.a1313 + m(0, 3) * a.a1213),
                inv * -(m(0, 1) * a.a2312 - m(0, 2) * a.a1312 + m(0, 3) * a.a1212),
            ],
            [
                inv * -(m(1, 0) * a.a2323 - m(1, 2) * a.a0323 + m(1, 3) * a.a0223),
                inv * (m(0, 0) * a.a2323 - m(0, 2) * a.a0323 + m(0, 3) * a.a0223),
                inv * -(m(0, 0) * a.a2313 - m(0, 2) * a.a0313 + m(0, 3) * a.a0213),
                inv * (m(0, 0) * a.a2312 - m(0, 2) * a.a0312 + m(0, 3) * a.a0212),
            ],
            [
                inv * (m(1, 0) * a.a1323 - m(1, 1) * a.a0323 + m(1, 3) * a.a0123),
                inv * -(m(0, 0) * a.a1323 - m(0, 1) * a.a0323 + m(0, 3) * a.a0123),
                inv * (m(0, 0) * a.a1313 - m(0, 1) * a.a0313 + m(0, 3) * a.a0113),
                inv * -(m(0, 0) * a.a1312 - m(0, 1) * a.a0312 + m(0, 3) * a.a0112),
            ],
            [
                inv * -(m(1, 0) * a.a1223 - m(1, 1) * a.a0223 + m(1, 2) * a.a0123),
                inv * (m(0, 0) * a.a1223 - m(0, 1) * a.a0223 + m(0, 2) * a.a0123),
                inv * -(m(0, 0) * a.a1213 - m(0, 1) * a.a0213 + m(0, 2) * a.a0113),
                inv * (m(0, 0) * a.a1212 - m(0, 1) * a.a0212 + m(0, 2) * a.a0112),
            ],
        ]))
    }

    /// Reconstructs a normalized world-space ray direction from normalized
    /// device coordinates. The clip point sits on the near plane; after the
    /// inverse projection it is forced to point down `-Z` as a direction.
    pub fn unproject(
        ndc: Vector2,
        inverse_projection: &Self,
        inverse_view: &Self,
    ) -> Result<Vector3, MathError> {
        let clip = Vector4::new(ndc.x, ndc.y, -1.0, 1.0);
        let eye = inverse_projection.transform_vector(clip);
        let eye = Vector4::new(eye.x, eye.y, -1.0, 0.0);
        let world = inverse_view.transform_vector(eye);
        world.xyz().normalize()
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn to_row_major(&self) -> [f32; 16] {
        self.elements
    }

    pub fn to_column_major(&self) -> [f32; 16] {
        self.transpose().elements
    }

    /// Columns as nested arrays, the layout expected by WGSL/GLSL `mat4x4`
    /// uniforms.
    pub fn to_columns(&self) -> [[f32; 4]; 4] {
        let mut columns = [[0.0; 4]; 4];
        for (column, out) in columns.iter_mut().enumerate() {
            for (row, value) in out.iter_mut().enumerate() {
                *value = self.get(column, row);
            }
        }
        columns
    }
}

/// 2x2 sub-determinants shared by `determinant` and `invert`. `aRRCC` is
/// built from rows 2-3 (or 1-3, 1-2) and the named column pair.
struct Minors {
    a2323: f32,
    a1323: f32,
    a1223: f32,
    a0323: f32,
    a0223: f32,
    a0123: f32,
    a2313: f32,
    a1313: f32,
    a1213: f32,
    a2312: f32,
    a1312: f32,
    a1212: f32,
    a0313: f32,
    a0213: f32,
    a0312: f32,
    a0212: f32,
    a0113: f32,
    a0112: f32,
}

impl Minors {
    fn new(matrix: &Matrix4) -> Self {
        let m = |row: usize, column: usize| matrix.elements[row * 4 + column];
        Self {
            a2323: m(2, 2) * m(3, 3) - m(2, 3) * m(3, 2),
            a1323: m(2, 1) * m(3, 3) - m(2, 3) * m(3, 1),
            a1223: m(2, 1) * m(3, 2) - m(2, 2) * m(3, 1),
            a0323: m(2, 0) * m(3, 3) - m(2, 3) * m(3, 0),
            a0223: m(2, 0) * m(3, 2) - m(2, 2) * m(3, 0),
            a0123: m(2, 0) * m(3, 1) - m(2, 1) * m(3, 0),
            a2313: m(1, 2) * m(3, 3) - m(1, 3) * m(3, 2),
            a1313: m(1, 1) * m(3, 3) - m(1, 3) * m(3, 1),
            a1213: m(1, 1) * m(3, 2) - m(1, 2) * m(3, 1),
            a2312: m(1, 2) * m(2, 3) - m(1, 3) * m(2, 2),
            a1312: m(1, 1) * m(2, 3) - m(1, 3) * m(2, 1),
            a1212: m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1),
            a0313: m(1, 0) * m(3, 3) - m(1, 3) * m(3, 0),
            a0213: m(1, 0) * m(3, 2) - m(1, 2) * m(3, 0),
            a0312: m(1, 0) * m(2, 3) - m(1, 3) * m(2, 0),
            a0212: m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0),
            a0113: m(1, 0) * m(3, 1) - m(1, 1) * m(3, 0),
            a0112: m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0),
        }
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Matrix4::multiply(&self, &rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        self.transform_vector(rhs)
    }
}

impl From<Matrix4> for cgmath::Matrix4<f32> {
    fn from(m: Matrix4) -> Self {
        let c = m.to_columns();
        cgmath::Matrix4::from_cols(c[0].into(), c[1].into(), c[2].into(), c[3].into())
    }
}

impl From<cgmath::Matrix4<f32>> for Matrix4 {
    fn from(m: cgmath::Matrix4<f32>) -> Self {
        let columns: [[f32; 4]; 4] = m.into();
        let mut result = Matrix4::zero();
        for (column, values) in columns.iter().enumerate() {
            for (row, value) in values.iter().enumerate() {
                result.set(column, row, *value);
            }
        }
        result
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "[{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
                self.get(0, row),
                self.get(1, row),
                self.get(2, row),
                self.get(3, row)
            )?;
        }
        Ok(())
    }
}
