#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Grouping of repeated-run result files per subject.
pub mod collect;

/// Error types for the significant digits module.
pub mod error;

/// Writing significant digits to disk.
pub mod output;

/// The significant digits estimator.
pub mod significant;

/// Numeric tables read from and written to whitespace delimited text.
pub mod table;

pub use collect::{compute_significant_digits, load_mat_file, parse_mat_files, SubjectFiles};
pub use error::SigDigitsError;
pub use output::{create_output_directory, write_significant_digits, FileMode};
pub use significant::{cnh_delta, significant_digits, ErrorKind, SigDigitsConfig};
pub use table::Matrix;
