use std::path::PathBuf;

use tt_persist::AttemptStoreError;

/// Every way a `tt` invocation can fail. This is the one place in the
/// repository where a failure becomes a process exit code — every
/// library crate underneath stays total or coerces its own errors away
/// (see the core's error taxonomy).
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("failed to read {path}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("segment index {index} is out of range; {path} has {len} segment(s)")]
    SegmentOutOfRange {
        path: PathBuf,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    AttemptStore(#[from] AttemptStoreError),
}
