//! Build orchestration.
//!
//! One build is a sequential pipeline: pre-flight, workspace acquisition,
//! synthesis, toolchain invocation, cleanup, classification. The only
//! suspension point is the toolchain call, and the workspace is released
//! after it has settled, on every path.

use std::future::Future;
use std::path::PathBuf;

use monopack_common::config::BuildOptions;
use monopack_common::types::BuildId;
use monopack_discovery::component::Component;
use tracing::Instrument;

use crate::error::{BuildError, Result};
use crate::toolchain::{Toolchain, ToolchainConfig, ToolchainFault, ToolchainReport};
use crate::workspace::BuildWorkspace;

/// Drives one toolchain through builds.
#[derive(Debug)]
pub struct Orchestrator<T> {
    toolchain: T,
}

impl<T: Toolchain> Orchestrator<T> {
    /// Creates an orchestrator around `toolchain`.
    #[must_use]
    pub const fn new(toolchain: T) -> Self {
        Self { toolchain }
    }

    /// Returns the toolchain.
    #[must_use]
    pub const fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Builds `components` into one artifact and returns its path.
    ///
    /// # Errors
    ///
    /// See [`build_until`](Self::build_until).
    pub async fn build(&self, components: &[Component], options: &BuildOptions) -> Result<PathBuf> {
        self.build_until(components, options, std::future::pending())
            .await
    }

    /// Builds `components`, aborting if `cancel` resolves before the
    /// toolchain settles.
    ///
    /// Cancellation drops the toolchain call, which stops any child process
    /// it started, and still releases the workspace.
    ///
    /// # Errors
    ///
    /// - [`BuildError::NoComponents`] if no component is buildable. Nothing
    ///   is created on disk in that case.
    /// - [`BuildError::Workspace`] if the workspace cannot be prepared.
    /// - [`BuildError::ToolchainInvocation`] if the toolchain could not run.
    /// - [`BuildError::ToolchainCompile`] if it ran and reported errors.
    /// - [`BuildError::Cancelled`] if `cancel` won the race.
    pub async fn build_until<C>(
        &self,
        components: &[Component],
        options: &BuildOptions,
        cancel: C,
    ) -> Result<PathBuf>
    where
        C: Future<Output = ()>,
    {
        let buildable: Vec<Component> = components
            .iter()
            .filter(|c| c.is_buildable())
            .cloned()
            .collect();
        if buildable.is_empty() {
            return Err(BuildError::NoComponents);
        }

        let id = BuildId::generate();
        let span = tracing::info_span!("build", id = %id);
        async move {
            tracing::info!(components = buildable.len(), "starting build");

            let workspace = BuildWorkspace::acquire(&options.root)?;
            let result = self.run(&workspace, &buildable, options, cancel).await;
            workspace.release();

            match &result {
                Ok(artifact) => tracing::info!(artifact = %artifact.display(), "build succeeded"),
                Err(e) => tracing::error!(error = %e, "build failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run<C>(
        &self,
        workspace: &BuildWorkspace,
        components: &[Component],
        options: &BuildOptions,
        cancel: C,
    ) -> Result<PathBuf>
    where
        C: Future<Output = ()>,
    {
        let entry = workspace.entry_path();
        let source = monopack_synth::synthesize(components, &options.version, &entry);
        let entry = workspace.write_entry(&source)?;

        let config = ToolchainConfig::new(&entry, components, options);
        tracing::debug!(entry = %entry.display(), aliases = config.resolve.alias.len(), "invoking toolchain");

        let outcome = tokio::select! {
            biased;
            () = cancel => {
                tracing::warn!("build cancelled while the toolchain was running");
                return Err(BuildError::Cancelled);
            }
            outcome = self.toolchain.invoke(&config) => outcome,
        };

        classify(outcome, &config)
    }
}

/// Maps a settled toolchain call onto the build result.
fn classify(
    outcome: std::result::Result<ToolchainReport, ToolchainFault>,
    config: &ToolchainConfig,
) -> Result<PathBuf> {
    let report = outcome.map_err(|fault| BuildError::ToolchainInvocation {
        message: fault.message,
    })?;

    for warning in &report.warnings {
        tracing::warn!(%warning, "toolchain warning");
    }
    if report.has_errors() {
        return Err(BuildError::ToolchainCompile {
            diagnostics: report.errors,
        });
    }
    Ok(config.artifact_path())
}
