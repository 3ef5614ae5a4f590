#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Residual transforms between two matrices.
pub mod compare;

/// Error types for the transform module.
pub mod error;

/// Euler angles and angle/axis extraction from rotation matrices.
pub mod euler;

/// Readers for transformation matrix files.
pub mod io;

/// The 4x4 transformation matrix type and its decomposition.
pub mod matrix;

/// Pose vector conversions.
pub mod pose;

/// Conversions between fixed-size arrays and glam matrices.
pub mod utils;

pub use compare::compare;
pub use error::TransformError;
pub use euler::{euler_angles, rotation_angle_axis, AxisAngle};
pub use io::fsl::{parse_transform, read_transform};
pub use matrix::{rotation_of, translation_of, RotationMatrix, TransformMatrix, Translation};
pub use pose::{from_pose_vector, from_pose_vector_zyx, to_pose_vector, PoseVector};
