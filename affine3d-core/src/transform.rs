//! Model pose: the accumulated model matrix and the commands that change it.

use tracing::trace;

use crate::error::{EngineError, Result};
use crate::matrix::Matrix4;
use crate::vector::Vector3;

/// Distance of the second point from the origin for a principal axis line.
const PRINCIPAL_AXIS_REACH: f64 = 100.0;

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::UNIT_X,
            Axis::Y => Vector3::UNIT_Y,
            Axis::Z => Vector3::UNIT_Z,
        }
    }

    /// Rotation about this axis through the origin.
    pub fn rotation(self, angle: f64) -> Matrix4 {
        match self {
            Axis::X => Matrix4::rotation_x(angle),
            Axis::Y => Matrix4::rotation_y(angle),
            Axis::Z => Matrix4::rotation_z(angle),
        }
    }
}

/// A spatial line through two distinct, finite world-space points, used as a
/// rotation axis. The direction runs from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    p1: Vector3,
    p2: Vector3,
}

impl AxisLine {
    /// Fails with [`EngineError::InvalidAxis`] when the points coincide, when
    /// either is not finite, or when their difference overflows.
    pub fn new(p1: Vector3, p2: Vector3) -> Result<Self> {
        if let Some(&point) = [p1, p2].iter().find(|p| !p.is_finite()) {
            return Err(EngineError::InvalidAxis { point });
        }
        if p1 == p2 || !(p2 - p1).is_finite() {
            return Err(EngineError::InvalidAxis { point: p1 });
        }
        Ok(Self { p1, p2 })
    }

    /// The line through the origin along `axis`.
    pub fn principal(axis: Axis) -> Self {
        Self {
            p1: Vector3::ZERO,
            p2: axis.unit() * PRINCIPAL_AXIS_REACH,
        }
    }

    pub fn p1(&self) -> Vector3 {
        self.p1
    }

    pub fn p2(&self) -> Vector3 {
        self.p2
    }
}

/// Rotation by `angle` radians about the line through `p1` and `p2`.
///
/// Moves `p1` to the origin, applies a Rodrigues rotation about the
/// normalized direction, and moves back. Returns `None` when the points
/// coincide or the direction is not finite.
pub fn line_rotation(p1: Vector3, p2: Vector3, angle: f64) -> Option<Matrix4> {
    let direction = (p2 - p1).normalize();
    if direction == Vector3::ZERO {
        return None;
    }
    let to_origin = Matrix4::translation(-p1.x, -p1.y, -p1.z);
    let rotate = Matrix4::rotation_around_axis(direction, angle);
    let back = Matrix4::translation(p1.x, p1.y, p1.z);
    Some(back.mul(rotate).mul(to_origin))
}

/// The model matrix. Every command left-multiplies it, so commands compose
/// in call order: the most recent one is applied last.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelTransform {
    matrix: Matrix4,
}

impl ModelTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(&self) -> Matrix4 {
        self.matrix
    }

    /// Left-multiplies `transform` onto the current model matrix. A product
    /// with non-finite entries is dropped and `false` returned.
    pub fn apply(&mut self, transform: Matrix4) -> bool {
        let next = transform.mul(self.matrix);
        if !next.is_finite() {
            trace!("ignoring transform with non-finite result");
            return false;
        }
        self.matrix = next;
        true
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.apply(Matrix4::translation(dx, dy, dz));
    }

    pub fn scale_uniform(&mut self, factor: f64) {
        self.apply(Matrix4::scale(factor, factor, factor));
    }

    pub fn rotate(&mut self, axis: Axis, angle: f64) {
        self.apply(axis.rotation(angle));
    }

    /// Rotates about the line through `p1` and `p2`. Coincident points or a
    /// non-finite result leave the model untouched and return `false`.
    pub fn rotate_around_line(&mut self, p1: Vector3, p2: Vector3, angle: f64) -> bool {
        match line_rotation(p1, p2, angle) {
            Some(rotation) => self.apply(rotation),
            None => {
                trace!(%p1, "ignoring rotation about a zero-length axis");
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.matrix = Matrix4::identity();
    }
}
