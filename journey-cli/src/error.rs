//! Error types for loading entries and handing them to Day One

use journey_babel::TableError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Everything that can go wrong while importing.
///
/// Errors tied to a single entry are recorded against that entry's path and the
/// run continues; only setup errors (bad configuration, missing program,
/// unreadable source directory) end a run.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading an entry or writing converted output failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the source directory failed
    #[error("cannot read {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Entry file is not a Journey entry
    #[error("invalid entry {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Day One program not found
    #[error("cannot find '{program}' in PATH: {source}")]
    CommandNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    /// Day One program could not be started or fed
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Day One program exited with a failure status
    #[error("{program} failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// Day One program succeeded but printed no entry id
    #[error("no entry id in output: {0:?}")]
    MissingEntryId(String),

    /// Configured timezone is not an IANA zone name
    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),

    /// Configured timestamp format contains an unknown specifier
    #[error("invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),

    /// Correction tables from the configuration are invalid
    #[error("invalid conversion table: {0}")]
    Table(#[from] TableError),
}
