//! `mpk list`: show what the manifest resolves to.

use std::path::Path;

use clap::Args;
use monopack_discovery::manifest::Manifest;
use monopack_discovery::resolver;

use crate::output;

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the discovery result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `list` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or serialized output
/// cannot be produced.
pub fn execute(args: &ListArgs, root: &Path) -> anyhow::Result<()> {
    let manifest = Manifest::load(root)?;
    let discovery = resolver::resolve(root, &manifest);

    if args.json {
        let value = serde_json::json!({
            "components": discovery.components,
            "skipped": discovery.skipped,
            "duplicates": discovery.duplicates,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if discovery.components.is_empty() {
        println!("No components found in monorepo.");
    } else {
        print!("{}", output::component_table(&discovery.components));
    }
    print!("{}", output::skipped_lines(&discovery.skipped));
    for name in &discovery.duplicates {
        println!("duplicate: {name}");
    }
    Ok(())
}
