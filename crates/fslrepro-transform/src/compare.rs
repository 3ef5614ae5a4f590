use crate::error::TransformError;
use crate::matrix::TransformMatrix;
use crate::pose::{to_pose_vector, PoseVector};

/// Compute the residual transformation `inverse(m1) * m2`.
///
/// # Errors
///
/// [`TransformError::SingularMatrix`] when `m1` cannot be inverted.
pub fn residual(
    m1: &TransformMatrix,
    m2: &TransformMatrix,
) -> Result<TransformMatrix, TransformError> {
    Ok(m1.try_inverse()? * *m2)
}

/// Return the residual pose vector between two transformation matrices.
///
/// The result is the pose vector of `inverse(m1) * m2`, i.e. how far `m2` deviates
/// from `m1`.
///
/// # Errors
///
/// [`TransformError::SingularMatrix`] when `m1` cannot be inverted.
pub fn compare(m1: &TransformMatrix, m2: &TransformMatrix) -> Result<PoseVector, TransformError> {
    let residual_mat = residual(m1, m2)?;
    Ok(to_pose_vector(&residual_mat))
}
