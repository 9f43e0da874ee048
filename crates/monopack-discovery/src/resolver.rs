//! Component resolution: config gating, type inference, and source lookup.
//!
//! For each declaration, in manifest order:
//! 1. A config file must exist (`ww-config.js`, then `ww-config.json`),
//!    otherwise the component is skipped before anything else is probed.
//! 2. The kind is the declared one, or inferred from `src/` and the
//!    component's own descriptor, defaulting to `element`.
//! 3. The conventional source file for that kind must exist, otherwise the
//!    component is skipped.
//!
//! Skips are warnings. Discovery never fails because one component is
//! malformed.

use std::path::{Path, PathBuf};

use monopack_common::constants::{CONFIG_EXTENSIONS, CONFIG_STEM, SOURCE_DIR};
use monopack_common::error::{MonopackError, Result};
use monopack_common::types::ComponentKind;

use crate::component::{Component, SkipReason, SkippedComponent};
use crate::manifest::{self, Declaration, Manifest};
use crate::validator;

/// Outcome of discovering the components of one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Buildable components, in declaration order.
    pub components: Vec<Component>,
    /// Declared components that were excluded, in declaration order.
    pub skipped: Vec<SkippedComponent>,
    /// Names declared more than once among `components`.
    pub duplicates: Vec<String>,
}

/// Loads the manifest under `root` and resolves its components.
///
/// A missing or unparseable manifest is logged and yields an empty result.
#[must_use]
pub fn discover(root: &Path) -> Discovery {
    match Manifest::load(root) {
        Ok(manifest) => resolve(root, &manifest),
        Err(e) => {
            tracing::error!(error = %e, "cannot discover components");
            Discovery::default()
        }
    }
}

/// Resolves every declaration of `manifest` against the files under `root`.
#[must_use]
pub fn resolve(root: &Path, manifest: &Manifest) -> Discovery {
    let mut discovery = Discovery::default();
    for decl in manifest.declarations() {
        match resolve_declaration(root, decl) {
            Ok(component) => discovery.components.push(component),
            Err(skipped) => {
                tracing::warn!(
                    component = %skipped.name,
                    path = %skipped.path,
                    reason = %skipped.reason,
                    "skipping component"
                );
                discovery.skipped.push(skipped);
            }
        }
    }
    discovery.duplicates = validator::duplicate_names(&discovery.components);
    tracing::info!(
        resolved = discovery.components.len(),
        skipped = discovery.skipped.len(),
        "component discovery finished"
    );
    discovery
}

/// Finds the resolved component named `name` under `root`.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or no buildable
/// component has that name.
pub fn find_component(root: &Path, name: &str) -> Result<Component> {
    let manifest = Manifest::load(root)?;
    resolve(root, &manifest)
        .components
        .into_iter()
        .find(|c| c.name == name)
        .ok_or_else(|| MonopackError::NotFound {
            kind: "component",
            id: name.to_string(),
        })
}

fn resolve_declaration(
    root: &Path,
    decl: Declaration,
) -> std::result::Result<Component, SkippedComponent> {
    let dir = root.join(&decl.path);

    let Some(config_file) = find_config_file(&dir) else {
        return Err(SkippedComponent {
            name: decl.name,
            path: decl.path,
            reason: SkipReason::MissingConfig,
        });
    };

    let kind = decl.kind.unwrap_or_else(|| detect_kind(&dir));

    let Some(component_file) = find_component_file(&dir, kind) else {
        return Err(SkippedComponent {
            name: decl.name,
            path: decl.path,
            reason: SkipReason::MissingSource { kind },
        });
    };

    Ok(Component {
        name: decl.name,
        path: decl.path,
        kind,
        config_file: Some(config_file),
        component_file: Some(component_file),
    })
}

/// Returns the component's config file, preferring the script form.
#[must_use]
pub fn find_config_file(component_dir: &Path) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| component_dir.join(format!("{CONFIG_STEM}.{ext}")))
        .find(|p| p.is_file())
}

/// Returns the conventional source file for `kind`, if present.
#[must_use]
pub fn find_component_file(component_dir: &Path, kind: ComponentKind) -> Option<PathBuf> {
    let path = component_dir.join(SOURCE_DIR).join(kind.source_file());
    path.is_file().then_some(path)
}

/// Infers a component's kind from the files under its directory.
///
/// Probes the element, section, and plugin source files in that order, then
/// the component's own descriptor, and defaults to [`ComponentKind::Element`].
#[must_use]
pub fn detect_kind(component_dir: &Path) -> ComponentKind {
    ComponentKind::PROBE_ORDER
        .into_iter()
        .find(|kind| find_component_file(component_dir, *kind).is_some())
        .or_else(|| manifest::local_declared_kind(component_dir))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, "").expect("write");
    }

    fn write_manifest(root: &Path, content: &str) {
        fs::write(root.join("package.json"), content).expect("write manifest");
    }

    #[test]
    fn empty_path_never_resolves_to_the_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(
            root,
            r#"{"weweb":{"components":[{"path":""},{"name":"x","path":""}]}}"#,
        );
        touch(root, "ww-config.json");
        touch(root, "src/wwElement.vue");

        let discovery = discover(root);
        assert!(discovery.components.is_empty());
        assert!(discovery.skipped.is_empty());
    }

    #[test]
    fn end_to_end_mapping_example() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(
            root,
            r#"{"version":"1.0.0","weweb":{"components":{
                "a":{"path":"comp/a"},
                "b":{"path":"comp/b","type":"plugin"}
            }}}"#,
        );
        touch(root, "comp/a/ww-config.json");
        touch(root, "comp/a/src/wwElement.vue");
        touch(root, "comp/b/ww-config.js");
        touch(root, "comp/b/src/wwPlugin.js");

        let discovery = discover(root);
        assert!(discovery.skipped.is_empty());
        let summary: Vec<_> = discovery
            .components
            .iter()
            .map(|c| (c.name.as_str(), c.path.as_str(), c.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", "comp/a", ComponentKind::Element),
                ("b", "comp/b", ComponentKind::Plugin),
            ]
        );
        assert!(discovery.components.iter().all(Component::is_buildable));
    }

    #[test]
    fn script_config_wins_over_data_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "ww-config.js");
        touch(dir.path(), "ww-config.json");
        let found = find_config_file(dir.path()).expect("config");
        assert!(found.ends_with("ww-config.js"));
    }

    #[test]
    fn detect_kind_probe_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "src/wwPlugin.js");
        assert_eq!(detect_kind(dir.path()), ComponentKind::Plugin);
        touch(dir.path(), "src/wwSection.vue");
        assert_eq!(detect_kind(dir.path()), ComponentKind::Section);
        touch(dir.path(), "src/wwElement.vue");
        assert_eq!(detect_kind(dir.path()), ComponentKind::Element);
    }

    #[test]
    fn detect_kind_falls_back_to_local_descriptor_then_element() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(detect_kind(dir.path()), ComponentKind::Element);
        fs::write(
            dir.path().join("package.json"),
            r#"{"weweb":{"type":"plugin"}}"#,
        )
        .expect("write");
        assert_eq!(detect_kind(dir.path()), ComponentKind::Plugin);
    }

    #[test]
    fn missing_config_skips_before_inference() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(root, r#"{"weweb":{"components":["comp/a","comp/b"]}}"#);
        touch(root, "comp/a/src/wwElement.vue");
        touch(root, "comp/b/ww-config.json");
        touch(root, "comp/b/src/wwElement.vue");

        let discovery = discover(root);
        assert_eq!(discovery.components.len(), 1);
        assert_eq!(discovery.components[0].name, "b");
        assert_eq!(discovery.skipped.len(), 1);
        assert_eq!(discovery.skipped[0].name, "a");
        assert_eq!(discovery.skipped[0].reason, SkipReason::MissingConfig);
    }

    #[test]
    fn missing_source_skips_exactly_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(
            root,
            r#"{"weweb":{"components":[
                {"name":"broken","path":"comp/broken"},
                {"name":"fine","path":"comp/fine"}
            ]}}"#,
        );
        touch(root, "comp/broken/ww-config.json");
        touch(root, "comp/fine/ww-config.json");
        touch(root, "comp/fine/src/wwSection.vue");

        let discovery = discover(root);
        assert_eq!(discovery.skipped.len(), 1);
        assert_eq!(discovery.skipped[0].name, "broken");
        assert_eq!(
            discovery.skipped[0].reason,
            SkipReason::MissingSource {
                kind: ComponentKind::Element
            }
        );
        assert_eq!(discovery.components.len(), 1);
        assert_eq!(discovery.components[0].kind, ComponentKind::Section);
    }

    #[test]
    fn declared_kind_without_its_source_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(
            root,
            r#"{"weweb":{"components":[{"path":"comp/x","type":"plugin"}]}}"#,
        );
        touch(root, "comp/x/ww-config.js");
        touch(root, "comp/x/src/wwElement.vue");

        let discovery = discover(root);
        assert!(discovery.components.is_empty());
        assert_eq!(
            discovery.skipped[0].reason,
            SkipReason::MissingSource {
                kind: ComponentKind::Plugin
            }
        );
    }

    #[test]
    fn declaration_order_is_preserved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(root, r#"{"weweb":{"components":["c/zeta","c/alpha","c/mid"]}}"#);
        for name in ["zeta", "alpha", "mid"] {
            touch(root, &format!("c/{name}/ww-config.json"));
            touch(root, &format!("c/{name}/src/wwElement.vue"));
        }
        let names: Vec<_> = discover(root)
            .components
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicates_are_kept_and_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(
            root,
            r#"{"weweb":{"components":[
                {"name":"dup","path":"c/one"},
                {"name":"dup","path":"c/two"}
            ]}}"#,
        );
        for name in ["one", "two"] {
            touch(root, &format!("c/{name}/ww-config.json"));
            touch(root, &format!("c/{name}/src/wwElement.vue"));
        }
        let discovery = discover(root);
        assert_eq!(discovery.components.len(), 2);
        assert_eq!(discovery.duplicates, vec!["dup"]);
    }

    #[test]
    fn missing_manifest_yields_empty_discovery() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(discover(dir.path()), Discovery::default());
    }

    #[test]
    fn find_component_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write_manifest(root, r#"{"weweb":{"components":["comp/card"]}}"#);
        touch(root, "comp/card/ww-config.js");
        touch(root, "comp/card/src/wwElement.vue");

        let found = find_component(root, "card").expect("card");
        assert_eq!(found.path, "comp/card");

        let err = find_component(root, "nope").unwrap_err();
        assert!(matches!(err, MonopackError::NotFound { .. }));
    }
}
