//! Aggregation module synthesis.

use std::fmt::Write as _;
use std::path::Path;

use monopack_discovery::component::Component;

use crate::paths::import_specifier;
use crate::routine::{RegistrationRoutine, js_string};

/// First line of every synthesized module.
pub const BANNER: &str = "// Auto-generated monorepo bundle. Do not edit.";

/// Renders the aggregation module for `components`, to be written at
/// `entry_path`, using the default host binding.
///
/// Pure: only path arithmetic is performed, and identical inputs produce
/// byte-identical output. Components without both a config file and a
/// source file are left out.
#[must_use]
pub fn synthesize(components: &[Component], version: &str, entry_path: &Path) -> String {
    synthesize_with(
        components,
        version,
        entry_path,
        &RegistrationRoutine::default(),
    )
}

/// Same as [`synthesize`], with an explicit registration routine.
#[must_use]
pub fn synthesize_with(
    components: &[Component],
    version: &str,
    entry_path: &Path,
    routine: &RegistrationRoutine,
) -> String {
    let entry_dir = entry_path.parent().unwrap_or_else(|| Path::new(""));

    let mut imports = String::new();
    let mut records = String::new();

    let buildable = components.iter().filter_map(|c| {
        let content = c.component_file.as_deref()?;
        let config = c.config_file.as_deref()?;
        Some((c, content, config))
    });

    for (index, (component, content, config)) in buildable.enumerate() {
        let content_spec = js_string(&import_specifier(entry_dir, content));
        let config_spec = js_string(&import_specifier(entry_dir, config));
        let _ = writeln!(imports, "import component_{index} from {content_spec};");
        let _ = writeln!(imports, "import config_{index} from {config_spec};");

        records.push_str("    {\n");
        let _ = writeln!(records, "        name: {},", js_string(&component.name));
        let _ = writeln!(records, "        type: {},", js_string(component.kind.as_str()));
        let _ = writeln!(records, "        content: component_{index},");
        let _ = writeln!(records, "        config: config_{index},");
        records.push_str("    },\n");
    }

    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&imports);
    out.push('\n');
    out.push_str("const components = [\n");
    out.push_str(&records);
    out.push_str("];\n");
    out.push('\n');
    out.push_str(&routine.render(version));
    out.push('\n');
    out.push_str("export default components;\n");
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use monopack_common::types::ComponentKind;

    use super::*;

    fn component(name: &str, kind: ComponentKind, config_ext: &str) -> Component {
        let dir = PathBuf::from("/repo/comp").join(name);
        Component {
            name: name.into(),
            path: format!("comp/{name}"),
            kind,
            config_file: Some(dir.join(format!("ww-config.{config_ext}"))),
            component_file: Some(dir.join("src").join(kind.source_file())),
        }
    }

    fn entry() -> PathBuf {
        PathBuf::from("/repo/.monopack-build-abc/index.js")
    }

    #[test]
    fn imports_are_relative_to_the_entry() {
        let source = synthesize(
            &[component("a", ComponentKind::Element, "json")],
            "1.0.0",
            &entry(),
        );
        assert!(source.contains(r#"import component_0 from "../comp/a/src/wwElement.vue";"#));
        assert!(source.contains(r#"import config_0 from "../comp/a/ww-config.json";"#));
    }

    #[test]
    fn metadata_follows_component_order() {
        let source = synthesize(
            &[
                component("b", ComponentKind::Plugin, "js"),
                component("a", ComponentKind::Section, "json"),
            ],
            "2.0.0",
            &entry(),
        );
        let b = source.find(r#"name: "b","#).expect("b record");
        let a = source.find(r#"name: "a","#).expect("a record");
        assert!(b < a);
        assert!(source.contains(r#"type: "plugin","#));
        assert!(source.contains("content: component_1,"));
        assert!(source.contains("config: config_1,"));
    }

    #[test]
    fn output_is_deterministic() {
        let list = vec![
            component("a", ComponentKind::Element, "json"),
            component("b", ComponentKind::Plugin, "js"),
        ];
        let first = synthesize(&list, "3.1.4", &entry());
        let second = synthesize(&list, "3.1.4", &entry());
        assert_eq!(first, second);
    }

    #[test]
    fn version_is_stamped_once_for_all_components() {
        let list = vec![
            component("a", ComponentKind::Element, "json"),
            component("b", ComponentKind::Element, "json"),
        ];
        let source = synthesize(&list, "9.9.9", &entry());
        assert_eq!(source.matches("9.9.9").count(), 1);
        assert!(source.contains("            version,\n"));
    }

    #[test]
    fn unbuildable_components_are_left_out() {
        let mut broken = component("broken", ComponentKind::Element, "json");
        broken.component_file = None;
        let source = synthesize(
            &[broken, component("ok", ComponentKind::Element, "json")],
            "1.0.0",
            &entry(),
        );
        assert!(!source.contains("broken"));
        assert!(source.contains(r#"name: "ok","#));
        assert!(source.contains("import component_0 from"));
        assert!(!source.contains("component_1"));
    }

    #[test]
    fn names_are_escaped() {
        let source = synthesize(
            &[component("it's", ComponentKind::Element, "json")],
            "1.0.0",
            &entry(),
        );
        assert!(source.contains(r#"name: "it's","#));
    }

    #[test]
    fn module_shape() {
        let source = synthesize(&[], "1.0.0", &entry());
        assert!(source.starts_with(BANNER));
        assert!(source.contains("const components = [\n];"));
        assert!(source.ends_with("export default components;\n"));
    }
}
