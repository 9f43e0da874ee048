//! CLI command definitions and dispatch.

pub mod build;
pub mod list;
pub mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// mpk: bundle a component monorepo into one artifact.
#[derive(Parser, Debug)]
#[command(name = "mpk", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Repository root containing package.json.
    #[arg(long, global = true, env = "MONOPACK_ROOT", default_value = ".")]
    pub root: PathBuf,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build all declared components into one bundle.
    Build(build::BuildArgs),
    /// List the components the manifest resolves to.
    List(list::ListArgs),
    /// Show one resolved component.
    Show(show::ShowArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let root = std::fs::canonicalize(&cli.root).map_err(|e| {
        anyhow::anyhow!("cannot open repository root {}: {e}", cli.root.display())
    })?;

    match cli.command {
        Command::Build(args) => build::execute(args, &root),
        Command::List(args) => list::execute(&args, &root),
        Command::Show(args) => show::execute(&args, &root),
    }
}
