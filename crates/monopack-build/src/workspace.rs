//! Temporary build workspace.
//!
//! Each build owns one directory under the repository root, named with a
//! random suffix so concurrent builds never share it. The directory and the
//! synthesized entry inside it are removed when the workspace is released
//! or dropped, whichever comes first.

use std::path::{Path, PathBuf};

use monopack_common::constants::{ENTRY_FILE, WORKSPACE_PREFIX};
use tempfile::TempDir;

use crate::error::{BuildError, Result};

/// Exclusively owned scratch directory for one build.
#[derive(Debug)]
pub struct BuildWorkspace {
    dir: TempDir,
}

impl BuildWorkspace {
    /// Creates a fresh workspace directory under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Workspace`] if the directory cannot be created.
    pub fn acquire(root: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|source| BuildError::Workspace {
                path: root.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %dir.path().display(), "acquired build workspace");
        Ok(Self { dir })
    }

    /// Workspace directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Location of the synthesized entry module.
    #[must_use]
    pub fn entry_path(&self) -> PathBuf {
        self.dir.path().join(ENTRY_FILE)
    }

    /// Writes the entry module.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Workspace`] if the file cannot be written.
    pub fn write_entry(&self, source: &str) -> Result<PathBuf> {
        let path = self.entry_path();
        std::fs::write(&path, source).map_err(|source| BuildError::Workspace {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Removes the workspace and everything in it.
    ///
    /// Failures are logged and swallowed so they never mask the build's
    /// own result.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "released build workspace"),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to remove build workspace");
            }
        }
    }
}
