//! 4×4 homogeneous transforms.
//!
//! Storage is column-major (`nalgebra`'s native layout) and composition follows
//! the column-vector convention: `a.mul(b)` applies `b` first, then `a`.

use std::ops::Mul;

use nalgebra as na;

use crate::vector::Vector3;

/// Substitute for a homogeneous `w` of exactly zero, so that a point on the
/// camera plane still maps to a (far away) screen position instead of NaN.
pub const W_EPSILON: f64 = 1e-9;

/// An affine or projective 4×4 transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4(na::Matrix4<f64>);

impl Matrix4 {
    pub fn identity() -> Self {
        Self(na::Matrix4::identity())
    }

    /// The 16 entries in column-major order.
    pub fn as_column_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self(na::Matrix4::new_translation(&na::Vector3::new(tx, ty, tz)))
    }

    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self(na::Matrix4::new_nonuniform_scaling(&na::Vector3::new(
            sx, sy, sz,
        )))
    }

    /// Right-handed rotation about +X.
    pub fn rotation_x(angle: f64) -> Self {
        Self(na::Matrix4::new_rotation(na::Vector3::x() * angle))
    }

    /// Right-handed rotation about +Y.
    pub fn rotation_y(angle: f64) -> Self {
        Self(na::Matrix4::new_rotation(na::Vector3::y() * angle))
    }

    /// Right-handed rotation about +Z.
    pub fn rotation_z(angle: f64) -> Self {
        Self(na::Matrix4::new_rotation(na::Vector3::z() * angle))
    }

    /// Rodrigues rotation by `angle` radians about a line through the origin.
    ///
    /// `axis` must already be unit length; it is used as given. Callers with an
    /// arbitrary direction normalize it first (see `transform::line_rotation`).
    pub fn rotation_around_axis(axis: Vector3, angle: f64) -> Self {
        let Vector3 { x, y, z } = axis;
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        #[rustfmt::skip]
        let m = na::Matrix4::new(
            t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
            t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
            t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
            0.0,               0.0,               0.0,               1.0,
        );
        Self(m)
    }

    /// Right-handed perspective projection. `fov_y_degrees` is the full
    /// vertical field of view; eye-space `z = -near` maps to NDC `-1` and
    /// `z = -far` to `+1`.
    pub fn perspective(fov_y_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fov_y_degrees.to_radians() / 2.0).tan();

        #[rustfmt::skip]
        let m = na::Matrix4::new(
            f / aspect, 0.0, 0.0,                          0.0,
            0.0,        f,   0.0,                          0.0,
            0.0,        0.0, (far + near) / (near - far),  2.0 * far * near / (near - far),
            0.0,        0.0, -1.0,                         0.0,
        );
        Self(m)
    }

    pub fn orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self(na::Matrix4::new_orthographic(
            left, right, bottom, top, near, far,
        ))
    }

    /// View matrix for a camera at `eye` looking at `center`.
    ///
    /// When the view direction is parallel to `up` the right vector
    /// normalizes to zero and the result is a singular (but finite) matrix.
    pub fn look_at(eye: Vector3, center: Vector3, up: Vector3) -> Self {
        let f = (center - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        #[rustfmt::skip]
        let m = na::Matrix4::new(
            s.x,  s.y,  s.z,  -s.dot(eye),
            u.x,  u.y,  u.z,  -u.dot(eye),
            -f.x, -f.y, -f.z, f.dot(eye),
            0.0,  0.0,  0.0,  1.0,
        );
        Self(m)
    }

    /// Full 4×4 product: the result applies `other` first, then `self`.
    pub fn mul(self, other: Matrix4) -> Matrix4 {
        Self(self.0 * other.0)
    }

    /// Applies the matrix to a homogeneous vector and returns all four
    /// components; the caller performs the divide by `w`.
    pub fn mul_vec4(&self, x: f64, y: f64, z: f64, w: f64) -> [f64; 4] {
        let r = self.0 * na::Vector4::new(x, y, z, w);
        [r.x, r.y, r.z, r.w]
    }

    /// Transforms a point `(p, 1)` and performs the perspective divide.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let [x, y, z, w] = self.mul_vec4(p.x, p.y, p.z, 1.0);
        let w = if w == 0.0 { W_EPSILON } else { w };
        Vector3::new(x / w, y / w, z / w)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn approx_eq(&self, other: &Matrix4, eps: f64) -> bool {
        (self.0 - other.0).amax() <= eps
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Self(self.0 * rhs.0)
    }
}
