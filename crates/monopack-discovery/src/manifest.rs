//! Repository descriptor loading and component declaration normalization.
//!
//! The components field may be written in three shapes:
//!
//! 1. an array of path strings: `["components/button"]`
//! 2. an array of objects: `[{ "name": "btn", "path": "components/button", "type": "element" }]`
//! 3. an object keyed by name: `{ "btn": { "path": "components/button" } }`
//!
//! All three are normalized into [`Declaration`] records here and never
//! travel further into the pipeline.

use std::path::{Path, PathBuf};

use monopack_common::constants::{
    COMPONENTS_KEY, MANIFEST_FILE, MANIFEST_SECTION, MONOREPO_KEY, TYPE_KEY,
};
use monopack_common::error::{MonopackError, Result};
use monopack_common::types::ComponentKind;
use serde_json::{Map, Value};

/// One declared component, normalized from any accepted manifest shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Registration name.
    pub name: String,
    /// Repository-relative component directory.
    pub path: String,
    /// Explicitly declared kind, if any.
    pub kind: Option<ComponentKind>,
}

/// The parsed repository-root package descriptor.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    version: Option<String>,
    monorepo: bool,
    components: Option<Value>,
}

impl Manifest {
    /// Loads the descriptor from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`MonopackError::ManifestUnreadable`] if the file is missing,
    /// unreadable, or not a JSON object.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        tracing::debug!(path = %path.display(), "loading manifest");

        let content = std::fs::read_to_string(&path).map_err(|e| unreadable(&path, e))?;
        Self::parse(&content, path)
    }

    /// Parses descriptor content that was read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MonopackError::ManifestUnreadable`] if the content is not a
    /// JSON object.
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let value: Value = serde_json::from_str(content).map_err(|e| unreadable(&path, e))?;
        let Value::Object(mut root) = value else {
            return Err(unreadable(&path, "top-level value is not an object"));
        };

        let version = root
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let (monorepo, components) = match root.remove(MANIFEST_SECTION) {
            Some(Value::Object(mut section)) => (
                section.get(MONOREPO_KEY) == Some(&Value::Bool(true)),
                section.remove(COMPONENTS_KEY).filter(|v| !v.is_null()),
            ),
            _ => (false, None),
        };

        Ok(Self {
            path,
            version,
            monorepo,
            components,
        })
    }

    /// Path the descriptor was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared package version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether the repository is a component monorepo: either explicitly
    /// flagged or declaring a components field.
    #[must_use]
    pub const fn is_monorepo(&self) -> bool {
        self.monorepo || self.components.is_some()
    }

    /// Normalizes the components field into declarations, in declaration order.
    ///
    /// Malformed entries are skipped with a warning.
    #[must_use]
    pub fn declarations(&self) -> Vec<Declaration> {
        match &self.components {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| declare_listed(index, entry))
                .collect(),
            Some(Value::Object(named)) => named
                .iter()
                .filter_map(|(name, entry)| declare_named(name, entry))
                .collect(),
            Some(other) => {
                tracing::warn!(
                    found = %json_type(other),
                    "components field must be an array or an object; ignoring it"
                );
                Vec::new()
            }
        }
    }
}

/// Reads the `type` declared in a component's own package descriptor.
///
/// Returns `None` if the descriptor is absent, unparseable, or declares no
/// recognized type.
#[must_use]
pub fn local_declared_kind(component_dir: &Path) -> Option<ComponentKind> {
    let content = std::fs::read_to_string(component_dir.join(MANIFEST_FILE)).ok()?;
    let value: Value = serde_json::from_str(&content).ok()?;
    value
        .get(MANIFEST_SECTION)?
        .get(TYPE_KEY)?
        .as_str()?
        .parse()
        .ok()
}

/// Derives a component name from the last segment of its path.
#[must_use]
pub fn name_from_path(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned())
}

fn declare_listed(index: usize, entry: &Value) -> Option<Declaration> {
    match entry {
        Value::String(path) => Some(Declaration {
            name: name_from_path(path),
            path: path.clone(),
            kind: None,
        }),
        Value::Object(fields) => {
            let Some(path) = fields
                .get("path")
                .and_then(Value::as_str)
                .filter(|p| !p.is_empty())
            else {
                tracing::warn!(index, "component entry has no path; ignoring it");
                return None;
            };
            let name = fields
                .get("name")
                .and_then(Value::as_str)
                .filter(|n| !n.is_empty())
                .map_or_else(|| name_from_path(path), str::to_owned);
            let kind = declared_kind(fields, &name);
            Some(Declaration {
                name,
                path: path.to_string(),
                kind,
            })
        }
        other => {
            tracing::warn!(index, found = %json_type(other), "unsupported component entry; ignoring it");
            None
        }
    }
}

fn declare_named(name: &str, entry: &Value) -> Option<Declaration> {
    let Some(path) = entry
        .get("path")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
    else {
        tracing::warn!(component = %name, "component entry has no path; ignoring it");
        return None;
    };
    let kind = entry
        .as_object()
        .and_then(|fields| declared_kind(fields, name));
    Some(Declaration {
        name: name.to_string(),
        path: path.to_string(),
        kind,
    })
}

fn declared_kind(fields: &Map<String, Value>, name: &str) -> Option<ComponentKind> {
    let raw = fields.get(TYPE_KEY)?.as_str()?;
    match raw.parse() {
        Ok(kind) => Some(kind),
        Err(e) => {
            tracing::warn!(component = %name, error = %e, "falling back to type inference");
            None
        }
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unreadable(path: &Path, reason: impl ToString) -> MonopackError {
    MonopackError::ManifestUnreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
