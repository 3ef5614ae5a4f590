use std::path::PathBuf;

/// Error types for the transform module.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Error reading the transformation file
    #[error("Cannot read transformation file {path}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line does not contain exactly four tokens
    #[error("Wrong format in transformation line: {line} (file name: {path})")]
    Format {
        /// The offending line, trimmed.
        line: String,
        /// The file the line was read from.
        path: PathBuf,
    },

    /// A token is not a floating point number
    #[error("Cannot parse `{token}` as a number (file name: {path})")]
    Parse {
        /// The offending token.
        token: String,
        /// The file the token was read from.
        path: PathBuf,
    },

    /// The file does not contain exactly four rows
    #[error("Expected 4 transformation rows, found {found} (file name: {path})")]
    RowCount {
        /// Number of non-blank rows found.
        found: usize,
        /// The file the rows were read from.
        path: PathBuf,
    },

    /// The matrix cannot be inverted
    #[error("Transformation matrix is singular (determinant {det:e})")]
    SingularMatrix {
        /// Determinant of the matrix.
        det: f64,
    },

    /// The rotation axis cannot be normalized (rotation angle is 0 or pi)
    #[error("Rotation axis is undefined, skew-symmetric norm is {norm:e}")]
    DegenerateRotation {
        /// Norm of the skew-symmetric part of the rotation.
        norm: f64,
    },
}
