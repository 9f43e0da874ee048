//! Resolved component records and skip diagnostics.

use std::fmt;
use std::path::{Path, PathBuf};

use monopack_common::types::ComponentKind;
use serde::{Deserialize, Serialize};

/// A component resolved from the manifest and probed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Registration name, unique within a build.
    pub name: String,
    /// Repository-relative component directory.
    pub path: String,
    /// Runtime category.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Settings file (`ww-config.js` or `ww-config.json`).
    pub config_file: Option<PathBuf>,
    /// Conventional source entry for `kind`.
    pub component_file: Option<PathBuf>,
}

impl Component {
    /// Returns the component directory under `root`.
    #[must_use]
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }

    /// Whether both the config file and the source file were found.
    #[must_use]
    pub const fn is_buildable(&self) -> bool {
        self.config_file.is_some() && self.component_file.is_some()
    }
}

/// Why a declared component was excluded from the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Neither `ww-config.js` nor `ww-config.json` exists.
    MissingConfig,
    /// The conventional source file for the resolved kind does not exist.
    MissingSource {
        /// Kind the component resolved to.
        kind: ComponentKind,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfig => f.write_str("no ww-config found"),
            Self::MissingSource { kind } => {
                write!(f, "no component file found (src/{})", kind.source_file())
            }
        }
    }
}

/// A declared component excluded from the build, non-fatally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedComponent {
    /// Declared name.
    pub name: String,
    /// Declared path.
    pub path: String,
    /// Exclusion reason.
    pub reason: SkipReason,
}

impl fmt::Display for SkippedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.path, self.reason)
    }
}
