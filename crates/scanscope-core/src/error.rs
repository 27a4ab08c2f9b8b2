//! Error types for include-path builds.

use std::path::PathBuf;

use thiserror::Error;

use crate::path::RelPath;

/// Errors that can occur while building include paths.
///
/// `UnreadableFile` is the only semantic failure. Every other variant is an
/// operational failure of the filesystem, the VCS, or the caller's input.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A path that nothing excludes is not readable by all.
    #[error(
        "Unreadable file: {} is not readable by all and is not excluded",
        .path.display_name()
    )]
    UnreadableFile { path: RelPath },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The version-control backend failed.
    #[error("VCS error: {message}")]
    Vcs { message: String },

    /// An exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl BuildError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a VCS error from anything displayable.
    pub fn vcs(message: impl std::fmt::Display) -> Self {
        Self::Vcs {
            message: message.to_string(),
        }
    }

    /// Check if this is the unreadable-file failure callers must report.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::UnreadableFile { .. })
    }

    /// The offending path of an unreadable-file failure.
    pub fn unreadable_path(&self) -> Option<&RelPath> {
        match self {
            Self::UnreadableFile { path } => Some(path),
            _ => None,
        }
    }
}
