use std::path::PathBuf;

/// Error types for the invocation module.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// Error serializing the invocation
    #[error("error serializing invocation: {0}")]
    Json(#[from] serde_json::Error),

    /// The path does not follow `sub-*/ses-*/anat/<t1>`
    #[error("Unexpected T1w path layout: {0}")]
    UnexpectedLayout(PathBuf),

    /// A subject is missing one of the two sessions
    #[error("Subject {subject} has no {session}")]
    MissingSession {
        /// Subject label, e.g. `sub-0025531`.
        subject: String,
        /// The missing session key.
        session: &'static str,
    },
}
