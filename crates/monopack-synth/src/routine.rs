//! The registration routine emitted into the artifact.
//!
//! This is the only place that names the concrete host global. Everything
//! else talks to the host through [`HostRegistrar`](crate::handshake::HostRegistrar).

use std::fmt::Write as _;
use std::time::Duration;

use monopack_common::constants::{HOST_REGISTER_GLOBAL, REGISTRATION_POLL_MS};

/// Host binding and polling cadence of the emitted handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRoutine {
    /// Name of the host-provided global registration function.
    pub global: String,
    /// Delay between registration attempts while the host is not ready.
    pub interval: Duration,
}

impl Default for RegistrationRoutine {
    fn default() -> Self {
        Self {
            global: HOST_REGISTER_GLOBAL.to_string(),
            interval: Duration::from_millis(REGISTRATION_POLL_MS),
        }
    }
}

impl RegistrationRoutine {
    /// Renders the routine.
    ///
    /// Expects a `components` array in scope. The routine registers the
    /// whole array in order as soon as the host function exists, polling on
    /// a fixed interval until it does, and stops polling after the first
    /// successful batch.
    #[must_use]
    pub fn render(&self, version: &str) -> String {
        let global = &self.global;
        let interval = self.interval.as_millis();
        let version = js_string(version);

        let mut out = String::new();
        let _ = writeln!(out, "const version = {version};");
        out.push('\n');
        out.push_str("function addComponents() {\n");
        let _ = writeln!(out, "    if (typeof window.{global} !== 'function') {{");
        out.push_str("        return false;\n");
        out.push_str("    }\n");
        out.push_str("    components.forEach(component => {\n");
        let _ = writeln!(out, "        window.{global}({{");
        out.push_str("            name: component.name,\n");
        out.push_str("            version,\n");
        out.push_str("            content: component.content,\n");
        out.push_str("            type: component.type,\n");
        out.push_str("            config: { ...component.config, name: component.name },\n");
        out.push_str("        });\n");
        out.push_str("    });\n");
        out.push_str("    return true;\n");
        out.push_str("}\n");
        out.push('\n');
        out.push_str("if (!addComponents()) {\n");
        out.push_str("    const registrationInterval = setInterval(() => {\n");
        out.push_str("        if (addComponents()) {\n");
        out.push_str("            clearInterval(registrationInterval);\n");
        out.push_str("        }\n");
        let _ = writeln!(out, "    }}, {interval});");
        out.push_str("}\n");
        out
    }
}

/// Renders `value` as a quoted string literal.
///
/// JSON string syntax is valid module-source string syntax, so escaping is
/// delegated to `serde_json`.
#[must_use]
pub fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
