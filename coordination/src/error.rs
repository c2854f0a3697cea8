//! Arena error types
//!
//! Library-level failures. Protocol violations are not errors of the
//! library itself: they are a normal debate outcome and live in
//! [`crate::debate::validator::ProtocolViolation`].

use std::path::PathBuf;
use thiserror::Error;

use crate::debate::state::TransitionError;

/// Result type alias for arena operations
pub type ArenaResult<T> = Result<T, ArenaError>;

/// Errors that can occur while running a debate or writing its artifacts
#[derive(Error, Debug)]
pub enum ArenaError {
    /// Audit log append after `close()`
    #[error("Audit log at {} is closed", .path.display())]
    AuditClosed { path: PathBuf },

    /// Audit log could not be written
    #[error("Audit log error at {}: {message}", .path.display())]
    AuditWrite { path: PathBuf, message: String },

    /// Artifact (verdict or diagram) could not be written
    #[error("Failed to write {artifact} to {}: {message}", .path.display())]
    ArtifactWrite {
        artifact: String,
        path: PathBuf,
        message: String,
    },

    /// Debate session refused a phase change
    #[error("Invalid state transition: {0}")]
    Transition(#[from] TransitionError),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArenaError {
    /// Create an audit write error
    pub fn audit_write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::AuditWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an artifact write error
    pub fn artifact_write(
        artifact: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::ArtifactWrite {
            artifact: artifact.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}
