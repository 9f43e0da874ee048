//! Domain primitive types used across the monopack workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for one build invocation.
///
/// Used as the uniqueness token in log spans so that concurrent builds of
/// the same repository can be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildId(String);

impl BuildId {
    /// Generates a random build ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Runtime category of a component.
///
/// Each kind expects one conventional source file inside the component's
/// `src` directory and is registered under the same category by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// A single UI element.
    #[default]
    Element,
    /// A page section.
    Section,
    /// A non-visual plugin.
    Plugin,
}

impl ComponentKind {
    /// Probe order used when the kind is not declared.
    pub const PROBE_ORDER: [Self; 3] = [Self::Element, Self::Section, Self::Plugin];

    /// Conventional source filename for this kind, relative to `src/`.
    #[must_use]
    pub const fn source_file(self) -> &'static str {
        match self {
            Self::Element => "wwElement.vue",
            Self::Section => "wwSection.vue",
            Self::Plugin => "wwPlugin.js",
        }
    }

    /// Lowercase identifier as written in manifests and emitted modules.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Section => "section",
            Self::Plugin => "plugin",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`ComponentKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component type \"{0}\"")]
pub struct UnknownKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "element" => Ok(Self::Element),
            "section" => Ok(Self::Section),
            "plugin" => Ok(Self::Plugin),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
