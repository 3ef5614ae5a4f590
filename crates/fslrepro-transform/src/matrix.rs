use std::ops::Mul;

use crate::error::TransformError;
use crate::utils;

/// A 3x3 rotation block, indexed as `rotation[row][col]`.
pub type RotationMatrix = [[f64; 3]; 3];

/// A translation vector `[tx, ty, tz]`.
pub type Translation = [f64; 3];

/// Determinants with an absolute value at or below this are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// A 4x4 affine transformation in homogeneous coordinates.
///
/// Stored row-major on the stack. Matrices produced by the readers and the pose
/// conversions always carry `[0, 0, 0, 1]` as their bottom row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix([[f64; 4]; 4]);

impl TransformMatrix {
    /// The identity transformation.
    pub const IDENTITY: Self = Self([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// The homogeneous bottom row.
    pub const BOTTOM_ROW: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Create a matrix from its rows, taken literally.
    pub const fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self(rows)
    }

    /// Assemble a matrix from a rotation block and a translation vector.
    ///
    /// The bottom row is set to `[0, 0, 0, 1]`. No arithmetic is involved, so
    /// `from_parts(m.rotation(), m.translation())` reproduces `m` bit for bit
    /// whenever `m` has the canonical bottom row.
    pub fn from_parts(rotation: &RotationMatrix, translation: &Translation) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().take(3).enumerate() {
            row[..3].copy_from_slice(&rotation[i]);
            row[3] = translation[i];
        }
        rows[3] = Self::BOTTOM_ROW;
        Self(rows)
    }

    /// The rows of the matrix.
    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.0
    }

    /// The element at `row`, `col`.
    ///
    /// PRECONDITION: `row < 4` and `col < 4`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[row][col]
    }

    /// The top-left 3x3 rotation block.
    pub fn rotation(&self) -> RotationMatrix {
        let m = &self.0;
        [
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ]
    }

    /// The translation column, elements (0,3), (1,3) and (2,3).
    pub fn translation(&self) -> Translation {
        [self.0[0][3], self.0[1][3], self.0[2][3]]
    }

    /// The determinant of the full 4x4 matrix.
    pub fn determinant(&self) -> f64 {
        utils::array44_to_dmat4(&self.0).determinant()
    }

    /// The matrix inverse.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] when the absolute determinant is at
    /// or below [`SINGULAR_EPSILON`].
    pub fn try_inverse(&self) -> Result<Self, TransformError> {
        let mat = utils::array44_to_dmat4(&self.0);
        let det = mat.determinant();
        if !det.is_finite() || det.abs() <= SINGULAR_EPSILON {
            return Err(TransformError::SingularMatrix { det });
        }
        Ok(Self(utils::dmat4_to_array44(&mat.inverse())))
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[[f64; 4]; 4]> for TransformMatrix {
    fn from(rows: [[f64; 4]; 4]) -> Self {
        Self(rows)
    }
}

impl Mul for TransformMatrix {
    type Output = TransformMatrix;

    fn mul(self, rhs: Self) -> Self::Output {
        let lhs = utils::array44_to_dmat4(&self.0);
        let rhs = utils::array44_to_dmat4(&rhs.0);
        Self(utils::dmat4_to_array44(&(lhs * rhs)))
    }
}

/// Return the rotation block of a transformation matrix.
pub fn rotation_of(m: &TransformMatrix) -> RotationMatrix {
    m.rotation()
}

/// Return the translation vector of a transformation matrix.
pub fn translation_of(m: &TransformMatrix) -> Translation {
    m.translation()
}
