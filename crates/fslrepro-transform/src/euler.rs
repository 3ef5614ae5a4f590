use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::matrix::RotationMatrix;

/// Skew-symmetric norms at or below this leave the rotation axis undefined.
pub const DEGENERATE_AXIS_EPSILON: f64 = 1e-12;

/// A rotation expressed as a single angle about a unit axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    /// Rotation angle in radians, in `[0, pi]`.
    pub angle: f64,
    /// Unit rotation axis.
    pub axis: [f64; 3],
}

/// Compute the Euler angles `[rx, ry, rz]` of a rotation matrix.
///
/// The extraction assumes the composition `R = Rz * Ry * Rx`:
///
/// * `rx = atan2(r21, r22)`
/// * `ry = atan2(-r20, sqrt(r21^2 + r22^2))`
/// * `rz = atan2(r10, r00)`
///
/// PRECONDITION: `rot` is orthonormal. This is not checked.
///
/// At gimbal lock (`ry = +/-pi/2`) `r21` and `r22` vanish and `atan2(0, 0) = 0` is
/// returned for the affected angles.
pub fn euler_angles(rot: &RotationMatrix) -> [f64; 3] {
    let rx = rot[2][1].atan2(rot[2][2]);
    let ry = (-rot[2][0]).atan2((rot[2][1].powi(2) + rot[2][2].powi(2)).sqrt());
    let rz = rot[1][0].atan2(rot[0][0]);
    [rx, ry, rz]
}

/// Compute the rotation angle of a rotation matrix from its trace.
///
/// `cos = (trace - 1) / 2` is clamped into `[-1, 1]` before `acos`, with a warning,
/// so round-off on near-identity rotations yields `0` instead of NaN.
pub fn rotation_angle(rot: &RotationMatrix) -> f64 {
    let cos = (rot[0][0] + rot[1][1] + rot[2][2] - 1.0) / 2.0;
    let cos = if cos > 1.0 {
        log::warn!("cos is larger than 1: {cos}");
        1.0
    } else if cos < -1.0 {
        log::warn!("cos is smaller than -1: {cos}");
        -1.0
    } else {
        cos
    };
    cos.acos()
}

/// Compute the unit rotation axis from the skew-symmetric part of a rotation matrix.
///
/// # Errors
///
/// [`TransformError::DegenerateRotation`] when the skew-symmetric part vanishes, which
/// happens for rotation angles of 0 and pi.
pub fn rotation_axis(rot: &RotationMatrix) -> Result<[f64; 3], TransformError> {
    let x = rot[2][1] - rot[1][2];
    let y = rot[0][2] - rot[2][0];
    let z = rot[1][0] - rot[0][1];

    let norm = (x * x + y * y + z * z).sqrt();
    if norm.is_nan() || norm <= DEGENERATE_AXIS_EPSILON {
        return Err(TransformError::DegenerateRotation { norm });
    }

    Ok([x / norm, y / norm, z / norm])
}

/// Compute the rotation angle and axis of a rotation matrix.
///
/// See [`rotation_angle`] and [`rotation_axis`].
pub fn rotation_angle_axis(rot: &RotationMatrix) -> Result<AxisAngle, TransformError> {
    Ok(AxisAngle {
        angle: rotation_angle(rot),
        axis: rotation_axis(rot)?,
    })
}

/// Elementary rotation about the X axis.
pub fn rotation_x(angle: f64) -> RotationMatrix {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

/// Elementary rotation about the Y axis.
pub fn rotation_y(angle: f64) -> RotationMatrix {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Elementary rotation about the Z axis.
pub fn rotation_z(angle: f64) -> RotationMatrix {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}
