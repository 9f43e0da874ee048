//! Semantic checks over the resolved component list.

use std::collections::HashSet;

use crate::component::Component;

/// Returns every name declared more than once, each reported once, in the
/// order the duplicate was first seen.
///
/// Duplicates are a caller error. They are logged as warnings and left in
/// the list; merging them is not this crate's decision.
#[must_use]
pub fn duplicate_names(components: &[Component]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for comp in components {
        if !seen.insert(comp.name.as_str()) && !duplicates.contains(&comp.name) {
            tracing::warn!(component = %comp.name, "component name declared more than once");
            duplicates.push(comp.name.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use monopack_common::types::ComponentKind;

    use super::*;

    fn component(name: &str) -> Component {
        Component {
            name: name.into(),
            path: format!("comp/{name}"),
            kind: ComponentKind::Element,
            config_file: None,
            component_file: None,
        }
    }

    #[test]
    fn unique_names_pass() {
        let list = vec![component("a"), component("b")];
        assert!(duplicate_names(&list).is_empty());
    }

    #[test]
    fn duplicates_reported_once_each() {
        let list = vec![
            component("a"),
            component("b"),
            component("a"),
            component("a"),
            component("b"),
        ];
        assert_eq!(duplicate_names(&list), vec!["a", "b"]);
    }
}
