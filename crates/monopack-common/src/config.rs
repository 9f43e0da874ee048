//! Build configuration model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Options for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Repository root containing the package descriptor.
    pub root: PathBuf,
    /// Output directory, relative to `root` unless absolute.
    pub out_dir: PathBuf,
    /// Artifact filename inside `out_dir`.
    pub filename: String,
    /// Version stamped on every registered component.
    pub version: String,
    /// Name under which the artifact exposes its default export.
    pub library_name: String,
    /// Module format of the artifact.
    pub library_target: String,
    /// Toolchain optimization mode.
    pub mode: String,
    /// Module names provided by the host instead of being bundled.
    pub externals: BTreeMap<String, String>,
    /// Compile-time constant replacements.
    pub defines: BTreeMap<String, String>,
    /// Platform modules that resolve to an empty implementation.
    pub disabled_modules: Vec<String>,
}

impl BuildOptions {
    /// Creates default options rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Returns the directory the artifact is written to.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.out_dir)
    }

    /// Returns the final path of the artifact.
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir().join(&self.filename)
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        let externals = BTreeMap::from([("vue".to_string(), "Vue".to_string())]);
        let defines = BTreeMap::from([
            ("__VUE_OPTIONS_API__".to_string(), "true".to_string()),
            ("__VUE_PROD_DEVTOOLS__".to_string(), "false".to_string()),
            (
                "__VUE_PROD_HYDRATION_MISMATCH_DETAILS__".to_string(),
                "false".to_string(),
            ),
        ]);

        Self {
            root: PathBuf::from("."),
            out_dir: PathBuf::from(constants::DEFAULT_OUT_DIR),
            filename: constants::DEFAULT_OUTPUT_FILE.to_string(),
            version: constants::FALLBACK_VERSION.to_string(),
            library_name: constants::DEFAULT_LIBRARY_NAME.to_string(),
            library_target: "umd".to_string(),
            mode: "production".to_string(),
            externals,
            defines,
            disabled_modules: constants::DISABLED_PLATFORM_MODULES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
