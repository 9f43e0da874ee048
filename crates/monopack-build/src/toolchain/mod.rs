//! Bundling toolchain abstraction.
//!
//! The orchestrator only needs "compile this entry into one artifact". How
//! the toolchain transforms sources is its own business; this module fixes
//! the inputs it receives and the outcome it reports.

pub mod command;

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use monopack_common::config::BuildOptions;
use monopack_discovery::component::Component;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use command::CommandToolchain;

/// Everything a toolchain needs to produce the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolchainConfig {
    /// Build name.
    pub name: String,
    /// Optimization mode.
    pub mode: String,
    /// Directory relative paths are resolved against (the repository root).
    pub context: PathBuf,
    /// The single entry point: the synthesized aggregation module.
    pub entry: PathBuf,
    /// Artifact location and format.
    pub output: OutputConfig,
    /// Module names provided by the host at runtime.
    pub externals: BTreeMap<String, String>,
    /// Compile-time constant replacements.
    pub define: BTreeMap<String, String>,
    /// Module resolution rules.
    pub resolve: ResolveConfig,
}

/// Artifact location and format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputConfig {
    /// Output directory.
    pub path: PathBuf,
    /// Artifact filename.
    pub filename: String,
    /// Exported library shape.
    pub library: LibraryConfig,
}

/// Exported library shape of the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryConfig {
    /// Global name of the default export.
    pub name: String,
    /// Module format.
    #[serde(rename = "type")]
    pub target: String,
}

/// Module resolution rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveConfig {
    /// `@<component>` tokens mapped to each component's own directory, so
    /// intra-component imports keep resolving from the workspace.
    pub alias: BTreeMap<String, PathBuf>,
    /// Platform modules mapped to `false`, i.e. an empty implementation.
    pub fallback: BTreeMap<String, bool>,
}

impl ToolchainConfig {
    /// Builds the invocation for `entry` over `components`.
    ///
    /// When two components share a name, the later one owns the alias.
    #[must_use]
    pub fn new(entry: &Path, components: &[Component], options: &BuildOptions) -> Self {
        let alias = components
            .iter()
            .map(|c| (format!("@{}", c.name), c.dir(&options.root)))
            .collect();
        let fallback = options
            .disabled_modules
            .iter()
            .map(|m| (m.clone(), false))
            .collect();

        Self {
            name: "monorepo".to_string(),
            mode: options.mode.clone(),
            context: options.root.clone(),
            entry: entry.to_path_buf(),
            output: OutputConfig {
                path: options.output_dir(),
                filename: options.filename.clone(),
                library: LibraryConfig {
                    name: options.library_name.clone(),
                    target: options.library_target.clone(),
                },
            },
            externals: options.externals.clone(),
            define: options.defines.clone(),
            resolve: ResolveConfig { alias, fallback },
        }
    }

    /// Final location of the artifact.
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.output.path.join(&self.output.filename)
    }
}

/// Stats reported by a toolchain that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainReport {
    /// Compile errors; any entry fails the build.
    pub errors: Vec<String>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
}

impl ToolchainReport {
    /// Whether the toolchain reported compile errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The toolchain itself could not run or did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ToolchainFault {
    /// Description of the fault.
    pub message: String,
}

impl ToolchainFault {
    /// Creates a fault with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An external bundling system.
///
/// Implementors may do their work asynchronously or concurrently; the
/// returned future settles once, when the toolchain is done.
pub trait Toolchain: Send + Sync {
    /// Compiles `config.entry` into the configured artifact.
    ///
    /// Returns the toolchain's report when it ran to completion (even if it
    /// reported compile errors), or a fault when it could not run at all.
    fn invoke(
        &self,
        config: &ToolchainConfig,
    ) -> impl Future<Output = Result<ToolchainReport, ToolchainFault>> + Send;
}
