#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Discovery of T1w scans in a BIDS-like tree.
pub mod discovery;

/// Error types for the invocation module.
pub mod error;

/// FLIRT invocation files.
pub mod invocation;

pub use discovery::{
    extract_fields, extract_sessions, find_t1s, Sessions, SubjectSessions, T1Fields,
};
pub use error::InvocationError;
pub use invocation::{
    create_flirt_invocation, create_flirt_invocations, create_ieee_invocations,
    create_mca_invocations, generate, to_json_writer, write_invocation, Invocation,
    InvocationConfig,
};
