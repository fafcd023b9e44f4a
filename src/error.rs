use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum TreepackError {
    #[error("Invalid configuration for {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Serialization failed: {0}")]
    Serialize(String),
}
impl TreepackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreepackError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TreepackError::ConfigInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Category of a problem that was recorded without aborting the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A requested ignore-file could not be read; it contributed no rules.
    IgnoreFileUnreadable,
    /// A single line of an ignore-file failed to compile and was skipped.
    IgnoreRuleInvalid,
    /// An entry could not be stat'ed and was skipped.
    EntryStatFailed,
    /// A directory below the root could not be listed.
    DirectoryReadFailed,
    /// The binary sniff failed and the configured fallback was applied.
    SniffFailed,
    /// The content of an included file could not be read; it was omitted.
    FileReadFailed,
}

/// A non-fatal problem encountered while building a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub path: PathBuf,
    pub kind: WarningKind,
    pub message: String,
}
impl Warning {
    pub(crate) fn new(kind: WarningKind, path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        let warning = Warning {
            path: path.into(),
            kind,
            message: message.to_string(),
        };
        #[cfg(feature = "logging")]
        tracing::warn!(kind = ?warning.kind, path = %warning.path.display(), "{}", warning.message);
        warning
    }
}
impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
