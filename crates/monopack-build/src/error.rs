//! Build failure taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a build aborts.
///
/// Per-component problems never appear here; discovery recovers from them
/// and reports skips instead.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No buildable component was handed to the orchestrator.
    #[error("no components found in monorepo")]
    NoComponents,

    /// The temporary workspace could not be created or written.
    #[error("build workspace error at {path}: {source}")]
    Workspace {
        /// Path of the workspace or file involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The toolchain could not be started or did not complete.
    #[error("toolchain invocation failed: {message}")]
    ToolchainInvocation {
        /// Description of the fault.
        message: String,
    },

    /// The toolchain ran and reported compile diagnostics.
    #[error("toolchain reported {} error(s)", .diagnostics.len())]
    ToolchainCompile {
        /// Diagnostics exactly as the toolchain reported them.
        diagnostics: Vec<String>,
    },

    /// The caller cancelled the build while the toolchain was running.
    #[error("build cancelled")]
    Cancelled,
}

/// Result alias for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
