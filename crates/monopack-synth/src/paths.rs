//! Import specifier arithmetic.

use std::path::Path;

/// Returns the specifier that imports `target` from a module living in
/// `from_dir`.
///
/// The result always uses `/` separators. Relative specifiers that do not
/// climb out of `from_dir` are prefixed with `./` so the module system does
/// not mistake them for package names. If no relative path exists (for
/// example, one side is absolute and the other is not), the target itself is
/// returned.
#[must_use]
pub fn import_specifier(from_dir: &Path, target: &Path) -> String {
    let relative = pathdiff::diff_paths(target, from_dir).unwrap_or_else(|| target.to_path_buf());
    let text = relative.to_string_lossy().replace('\\', "/");

    if relative.is_absolute() || text.starts_with('/') || text.starts_with("../") {
        text
    } else {
        format!("./{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_directory_climbs_once() {
        let specifier = import_specifier(
            Path::new("/repo/.monopack-build-x"),
            Path::new("/repo/comp/a/src/wwElement.vue"),
        );
        assert_eq!(specifier, "../comp/a/src/wwElement.vue");
    }

    #[test]
    fn nested_target_gets_dot_prefix() {
        let specifier = import_specifier(Path::new("/repo"), Path::new("/repo/comp/a/ww-config.js"));
        assert_eq!(specifier, "./comp/a/ww-config.js");
    }

    #[test]
    fn deep_workspace_climbs_several_levels() {
        let specifier = import_specifier(
            Path::new("/repo/tmp/work/build"),
            Path::new("/repo/comp/b/ww-config.json"),
        );
        assert_eq!(specifier, "../../../comp/b/ww-config.json");
    }

    #[test]
    fn backslashes_become_forward_slashes() {
        let specifier = import_specifier(
            Path::new("repo/work"),
            Path::new("repo/comp\\a\\src/wwPlugin.js"),
        );
        assert_eq!(specifier, "../comp/a/src/wwPlugin.js");
        assert!(!specifier.contains('\\'));
    }

    #[test]
    fn unrelated_paths_fall_back_to_target() {
        let specifier = import_specifier(Path::new("relative/dir"), Path::new("/abs/file.js"));
        assert_eq!(specifier, "/abs/file.js");
    }
}
