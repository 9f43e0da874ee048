//! Formatted output helpers for CLI commands.
//!
//! Pure string builders so commands stay thin and the layout is testable.

use std::path::Path;

use monopack_discovery::component::{Component, SkippedComponent};

/// Formats the pre-build summary: a header and one `- name (type)` line
/// per component.
#[must_use]
pub fn build_summary(components: &[Component]) -> String {
    let mut out = format!(
        "Building monorepo bundle with {} components...\n",
        components.len()
    );
    for c in components {
        out.push_str(&format!("  - {} ({})\n", c.name, c.kind));
    }
    out
}

/// Formats resolved components as an aligned table.
#[must_use]
pub fn component_table(components: &[Component]) -> String {
    let name_width = column_width("NAME", components.iter().map(|c| c.name.as_str()));
    let path_width = column_width("PATH", components.iter().map(|c| c.path.as_str()));

    let mut out = format!("{:<name_width$} {:<8} {:<path_width$}\n", "NAME", "TYPE", "PATH");
    for c in components {
        out.push_str(&format!(
            "{:<name_width$} {:<8} {:<path_width$}\n",
            c.name,
            c.kind.as_str(),
            c.path
        ));
    }
    out
}

/// Formats one `skipped: ...` line per excluded component.
#[must_use]
pub fn skipped_lines(skipped: &[SkippedComponent]) -> String {
    skipped.iter().map(|s| format!("skipped: {s}\n")).collect()
}

/// Formats the detail view of one component.
#[must_use]
pub fn component_detail(component: &Component, root: &Path) -> String {
    format!(
        "Name:        {}\nType:        {}\nPath:        {}\nConfig:      {}\nSource:      {}\n",
        component.name,
        component.kind,
        component.dir(root).display(),
        display_opt(component.config_file.as_deref()),
        display_opt(component.component_file.as_deref()),
    )
}

fn display_opt(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(str::len).fold(header.len(), usize::max)
}
