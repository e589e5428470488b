/// 4x4 homogeneous transform matrices
use std::ops::Mul;

use crate::vector::Vec3;

/// A 4x4 transform stored column-major: elements `0..4` are the first column,
/// `4..8` the second, and so on. Element `(row, col)` lives at `col * 4 + row`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4x4 {
    m: [f64; 16],
}

impl Mat4x4 {
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn from_cols_array(m: [f64; 16]) -> Self {
        Self { m }
    }

    pub fn to_cols_array(&self) -> [f64; 16] {
        self.m
    }

    /// Element at `row`, `col`
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    /// Right-handed rotation about the X axis
    pub fn rotation_x(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, cos, sin, 0.0, //
            0.0, -sin, cos, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Right-handed rotation about the Y axis
    pub fn rotation_y(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols_array([
            cos, 0.0, -sin, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            sin, 0.0, cos, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Right-handed rotation about the Z axis
    pub fn rotation_z(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols_array([
            cos, sin, 0.0, 0.0, //
            -sin, cos, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            dx, dy, dz, 1.0,
        ])
    }

    /// Symmetric-frustum perspective projection for a camera looking down -Z.
    ///
    /// The resulting `w` equals the view-space distance in front of the
    /// camera (`-z`), so it grows with distance and serves as the perspective
    /// divisor.
    ///
    /// Requires `0 < near < far`; other values produce a meaningless matrix.
    pub fn perspective(fov_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        debug_assert!(0.0 < near && near < far, "perspective needs 0 < near < far");
        let f = 1.0 / (fov_degrees * std::f64::consts::PI / 360.0).tan();
        Self::from_cols_array([
            f / aspect, 0.0, 0.0, 0.0, //
            0.0, f, 0.0, 0.0, //
            0.0, 0.0, (far + near) / (near - far), -1.0, //
            0.0, 0.0, (2.0 * far * near) / (near - far), 0.0,
        ])
    }

    /// Compose two transforms. The result applies `rhs` first, then `self`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut m = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                m[col * 4 + row] = (0..4)
                    .map(|k| self.m[k * 4 + row] * rhs.m[col * 4 + k])
                    .sum();
            }
        }
        Self { m }
    }

    /// Transform a point (implicit `w = 1`).
    ///
    /// Returns the transformed `(x, y, z)` and the homogeneous divisor `w`.
    /// No division is performed.
    pub fn transform_point(&self, v: Vec3) -> (Vec3, f64) {
        let m = &self.m;
        let x = v.x * m[0] + v.y * m[4] + v.z * m[8] + m[12];
        let y = v.x * m[1] + v.y * m[5] + v.z * m[9] + m[13];
        let z = v.x * m[2] + v.y * m[6] + v.z * m[10] + m[14];
        let w = v.x * m[3] + v.y * m[7] + v.z * m[11] + m[15];
        (Vec3::new(x, y, z), w)
    }
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

/// Create a model-view-projection matrix
pub fn mvp(model: &Mat4x4, view: &Mat4x4, projection: &Mat4x4) -> Mat4x4 {
    *projection * *view * *model
}
