use std::fmt;

use serde::{Deserialize, Serialize};

use crate::euler::{euler_angles, rotation_x, rotation_y, rotation_z};
use crate::matrix::{RotationMatrix, TransformMatrix};
use crate::utils;

/// Compact rigid transform: translation in matrix units, Euler angles in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseVector {
    /// Translation along X.
    pub tx: f64,
    /// Translation along Y.
    pub ty: f64,
    /// Translation along Z.
    pub tz: f64,
    /// Rotation about X.
    pub rx: f64,
    /// Rotation about Y.
    pub ry: f64,
    /// Rotation about Z.
    pub rz: f64,
}

impl PoseVector {
    /// Create a pose vector from `[tx, ty, tz, rx, ry, rz]`.
    pub const fn from_array(values: [f64; 6]) -> Self {
        let [tx, ty, tz, rx, ry, rz] = values;
        Self {
            tx,
            ty,
            tz,
            rx,
            ry,
            rz,
        }
    }

    /// The components in `[tx, ty, tz, rx, ry, rz]` order.
    pub fn to_array(&self) -> [f64; 6] {
        [self.tx, self.ty, self.tz, self.rx, self.ry, self.rz]
    }

    /// The translation part `[tx, ty, tz]`.
    pub fn translation(&self) -> [f64; 3] {
        [self.tx, self.ty, self.tz]
    }

    /// The rotation part `[rx, ry, rz]`.
    pub fn angles(&self) -> [f64; 3] {
        [self.rx, self.ry, self.rz]
    }
}

impl From<[f64; 6]> for PoseVector {
    fn from(values: [f64; 6]) -> Self {
        Self::from_array(values)
    }
}

impl fmt::Display for PoseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:e}, {:e}, {:e}, {:e}, {:e}, {:e}]",
            self.tx, self.ty, self.tz, self.rx, self.ry, self.rz
        )
    }
}

/// Return the pose vector `[tx, ty, tz, rx, ry, rz]` of a transformation matrix.
///
/// The angles come from [`euler_angles`] on the rotation block.
pub fn to_pose_vector(m: &TransformMatrix) -> PoseVector {
    let [tx, ty, tz] = m.translation();
    let [rx, ry, rz] = euler_angles(&m.rotation());
    PoseVector {
        tx,
        ty,
        tz,
        rx,
        ry,
        rz,
    }
}

/// Return the transformation matrix of a pose vector, composing `R = Rx * Ry * Rz`.
///
/// NOTE: this order is not the one assumed by [`euler_angles`] (`Rz * Ry * Rx`), so
/// `from_pose_vector(to_pose_vector(m))` only reproduces `m` when at most one
/// rotation angle is non-zero. Use [`from_pose_vector_zyx`] for a consistent inverse.
pub fn from_pose_vector(pose: &PoseVector) -> TransformMatrix {
    let r = compose(&[
        rotation_x(pose.rx),
        rotation_y(pose.ry),
        rotation_z(pose.rz),
    ]);
    TransformMatrix::from_parts(&r, &pose.translation())
}

/// Return the transformation matrix of a pose vector, composing `R = Rz * Ry * Rx`.
///
/// This inverts [`to_pose_vector`] for `ry` in `(-pi/2, pi/2)`.
pub fn from_pose_vector_zyx(pose: &PoseVector) -> TransformMatrix {
    let r = compose(&[
        rotation_z(pose.rz),
        rotation_y(pose.ry),
        rotation_x(pose.rx),
    ]);
    TransformMatrix::from_parts(&r, &pose.translation())
}

// left to right matrix product
fn compose(rotations: &[RotationMatrix]) -> RotationMatrix {
    let product = rotations
        .iter()
        .map(utils::array33_to_dmat3)
        .fold(glam::DMat3::IDENTITY, |acc, r| acc * r);
    utils::dmat3_to_array33(&product)
}
