//! Host-side model of the registration handshake.
//!
//! The artifact cannot assume the host runtime is ready when it is first
//! evaluated. It attempts to register the whole batch immediately and, if
//! the host is absent, retries the whole batch on a fixed interval until one
//! attempt succeeds. There is no retry cap and no backoff.
//!
//! [`RegistrationHandshake`] reproduces that contract against an abstract
//! [`HostRegistrar`], so hosts embedding the artifact and tests can reason
//! about it without a script engine.

use std::time::Duration;

use monopack_common::types::ComponentKind;
use monopack_discovery::component::Component;
use serde::Serialize;
use serde_json::Value;
use tokio::time::{Instant, MissedTickBehavior};

use crate::routine::RegistrationRoutine;

/// One component as handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    /// Registration key.
    pub name: String,
    /// Version shared by every component of the artifact.
    pub version: String,
    /// Runtime category.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Component settings with the `name` field injected.
    pub config: Value,
}

impl Registration {
    /// Builds the registration record of `component` with its parsed config.
    #[must_use]
    pub fn new(component: &Component, version: &str, config: Value) -> Self {
        Self {
            name: component.name.clone(),
            version: version.to_string(),
            kind: component.kind,
            config: with_name(config, &component.name),
        }
    }
}

/// Returns `config` with `name` set.
///
/// Object configs keep their fields, matching `{ ...config, name }` in the
/// emitted routine. Any other value contributes no fields, which differs
/// from a script spread of arrays or strings into index keys.
#[must_use]
pub fn with_name(config: Value, name: &str) -> Value {
    let mut fields = match config {
        Value::Object(fields) => fields,
        _ => serde_json::Map::new(),
    };
    let _ = fields.insert("name".to_string(), Value::from(name));
    Value::Object(fields)
}

/// Capability to register a batch of components with a host runtime.
pub trait HostRegistrar {
    /// Attempts to register the whole batch, in order.
    ///
    /// Returns `false` when the host is not ready and nothing was
    /// registered. Per-component failures inside a ready host are the
    /// host's concern and still count as success.
    fn try_register(&mut self, batch: &[Registration]) -> bool;
}

/// Drives the polling handshake against a [`HostRegistrar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationHandshake {
    interval: Duration,
}

impl RegistrationHandshake {
    /// Creates a handshake polling every `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Poll interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Registers `batch`, waiting for the host as long as necessary.
    ///
    /// Returns the number of polling ticks that elapsed before the batch
    /// was accepted (zero when the first attempt succeeded).
    pub async fn run<R: HostRegistrar>(&self, registrar: &mut R, batch: &[Registration]) -> u64 {
        if registrar.try_register(batch) {
            return 0;
        }

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0;
        loop {
            let _ = ticker.tick().await;
            ticks += 1;
            if registrar.try_register(batch) {
                tracing::debug!(ticks, "host accepted registration batch");
                return ticks;
            }
        }
    }
}

impl Default for RegistrationHandshake {
    fn default() -> Self {
        Self::new(RegistrationRoutine::default().interval)
    }
}
