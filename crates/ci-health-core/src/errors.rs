//! Error types for loading inputs and writing the summary.

use std::path::{Path, PathBuf};

/// Fatal pipeline errors. Missing optional fields never surface here; they are
/// substituted with defaults while parsing.
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    /// Snapshot file missing or unreadable.
    #[error("failed to read test snapshot {}: {message}", .path.display())]
    SnapshotRead { path: PathBuf, message: String },

    /// Snapshot is not valid JSON or does not match the expected shape.
    #[error("failed to parse test snapshot {}: {message}", .path.display())]
    SnapshotParse { path: PathBuf, message: String },

    /// Maintainer config missing or unreadable.
    #[error("failed to read config {}: {message}", .path.display())]
    ConfigRead { path: PathBuf, message: String },

    /// Maintainer config is not valid YAML or has the wrong shape.
    #[error("failed to parse config {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// Summary could not be serialized or written.
    #[error("failed to write summary: {message}")]
    Output { message: String },
}

impl HealthError {
    pub fn snapshot_read(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::SnapshotRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn snapshot_parse(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::SnapshotParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn config_read(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::ConfigRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn config_parse(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn output(err: impl std::fmt::Display) -> Self {
        Self::Output {
            message: err.to_string(),
        }
    }

    /// Path of the input that caused the error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SnapshotRead { path, .. }
            | Self::SnapshotParse { path, .. }
            | Self::ConfigRead { path, .. }
            | Self::ConfigParse { path, .. } => Some(path),
            Self::Output { .. } => None,
        }
    }
}
