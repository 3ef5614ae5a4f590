use std::path::PathBuf;

/// Error types for the significant digits module.
#[derive(Debug, thiserror::Error)]
pub enum SigDigitsError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// A token is not a floating point number
    #[error("Cannot parse `{token}` as a number (file name: {path})")]
    Parse {
        /// The offending token.
        token: String,
        /// The file the token was read from.
        path: PathBuf,
    },

    /// Rows or samples do not share the same shape
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// The expected `(rows, cols)`.
        expected: (usize, usize),
        /// The offending `(rows, cols)`.
        found: (usize, usize),
    },

    /// The estimator needs at least two samples
    #[error("At least 2 samples are required, found {0}")]
    NotEnoughSamples(usize),

    /// Invalid distribution parameters
    #[error("Distribution error: {0}")]
    Distribution(String),
}
