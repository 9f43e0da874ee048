//! `mpk show`: print one resolved component.

use std::path::Path;

use clap::Args;
use monopack_discovery::resolver;

use crate::output;

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Declared component name.
    pub name: String,
}

/// Executes the `show` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or no buildable
/// component has the requested name.
pub fn execute(args: &ShowArgs, root: &Path) -> anyhow::Result<()> {
    let component = resolver::find_component(root, &args.name)?;
    print!("{}", output::component_detail(&component, root));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_component_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"weweb":{"components":["comp/a"]}}"#,
        )
        .expect("write");

        let args = ShowArgs { name: "ghost".into() };
        let err = execute(&args, dir.path()).unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {err}");
    }
}
