use std::path::PathBuf;

/// Failures from the Attempt Store. Read failures (missing or
/// malformed files) are deliberately *not* represented here — they are
/// coerced to an empty history per the store's documented contract.
/// Only failures the caller must act on (write errors) surface.
#[derive(Debug, thiserror::Error)]
pub enum AttemptStoreError {
    #[error("failed to create parent directory for {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write temporary file for {path}")]
    WriteTemp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace {path} with the written temporary file")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize attempt history")]
    Serialize(#[source] serde_json::Error),
}
