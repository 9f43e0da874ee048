//! Unified error types for the monopack workspace.
//!
//! The build crate defines its own `BuildError` for orchestration failures;
//! everything that happens before a workspace exists is reported here.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum MonopackError {
    /// The repository-root package descriptor is missing or unparseable.
    #[error("manifest unreadable at {path}: {reason}")]
    ManifestUnreadable {
        /// Path of the descriptor that was attempted.
        path: PathBuf,
        /// Why the descriptor could not be used.
        reason: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MonopackError>;
