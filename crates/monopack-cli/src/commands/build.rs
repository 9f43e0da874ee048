//! `mpk build`: discover components and bundle them into one artifact.

use std::future::Future;
use std::path::{Path, PathBuf};

use clap::Args;
use monopack_build::error::BuildError;
use monopack_build::orchestrator::Orchestrator;
use monopack_build::toolchain::CommandToolchain;
use monopack_common::config::BuildOptions;
use monopack_common::constants::{DEFAULT_OUT_DIR, DEFAULT_TOOLCHAIN, FALLBACK_VERSION};
use monopack_discovery::manifest::Manifest;
use monopack_discovery::resolver;

use crate::output;

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Artifact filename inside the output directory.
    pub output: Option<String>,

    /// Toolchain adapter program, looked up on PATH.
    #[arg(long, env = "MONOPACK_TOOLCHAIN", default_value = DEFAULT_TOOLCHAIN)]
    pub toolchain: String,

    /// Output directory, relative to the repository root.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
}

/// Executes the `build` command.
///
/// # Errors
///
/// Returns an error if the repository is not a monorepo, no component is
/// usable, or the toolchain fails.
pub fn execute(args: BuildArgs, root: &Path) -> anyhow::Result<()> {
    let manifest = Manifest::load(root)?;
    if !manifest.is_monorepo() {
        anyhow::bail!(
            "{} does not declare a component monorepo",
            manifest.path().display()
        );
    }

    let discovery = resolver::resolve(root, &manifest);
    print!("{}", output::skipped_lines(&discovery.skipped));
    if discovery.components.is_empty() {
        anyhow::bail!("No components found in monorepo.");
    }

    let options = build_options(&args, root, &manifest);
    print!("{}", output::build_summary(&discovery.components));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let orchestrator = Orchestrator::new(CommandToolchain::new(&args.toolchain));
    let result = runtime.block_on(async {
        // Installed before the workspace exists.
        let cancel = interrupt_listener();
        orchestrator
            .build_until(&discovery.components, &options, cancel)
            .await
    });

    match result {
        Ok(artifact) => {
            println!("Output: {}", artifact.display());
            Ok(())
        }
        Err(BuildError::ToolchainCompile { diagnostics }) => {
            for diagnostic in &diagnostics {
                #[allow(clippy::print_stderr)]
                {
                    eprintln!("{diagnostic}");
                }
            }
            anyhow::bail!("build failed with {} errors", diagnostics.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn build_options(args: &BuildArgs, root: &Path, manifest: &Manifest) -> BuildOptions {
    let mut options = BuildOptions::new(root);
    options.out_dir.clone_from(&args.out_dir);
    if let Some(filename) = &args.output {
        options.filename.clone_from(filename);
    }
    match manifest.version() {
        Some(version) => options.version = version.to_string(),
        None => tracing::warn!(
            fallback = FALLBACK_VERSION,
            "package.json has no version; stamping fallback"
        ),
    }
    options
}

/// Installs the Ctrl+C handler immediately and returns a future that
/// resolves on the first interrupt.
///
/// If the handler cannot be installed, the future never resolves. Must be
/// called from within a tokio runtime.
fn interrupt_listener() -> impl Future<Output = ()> {
    let installed = install_interrupt_handler();
    async move {
        match installed {
            Ok(mut interrupts) => {
                let _ = interrupts.recv().await;
                tracing::warn!("interrupt received, cancelling build");
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(unix)]
fn install_interrupt_handler() -> std::io::Result<tokio::signal::unix::Signal> {
    use tokio::signal::unix::{SignalKind, signal};

    signal(SignalKind::interrupt())
}

#[cfg(windows)]
fn install_interrupt_handler() -> std::io::Result<tokio::signal::windows::CtrlC> {
    tokio::signal::windows::ctrl_c()
}
