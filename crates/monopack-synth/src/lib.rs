//! # monopack-synth
//!
//! Generates the aggregation module that imports every component and
//! registers it with the host runtime once the artifact is loaded.
//!
//! - [`module::synthesize`] renders the module source.
//! - [`paths::import_specifier`] turns file paths into module-system
//!   specifiers relative to the module's location.
//! - [`routine::RegistrationRoutine`] renders the polling handshake that is
//!   emitted into the artifact.
//! - [`handshake`] models that same handshake against an abstract
//!   [`HostRegistrar`](handshake::HostRegistrar).

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod handshake;
pub mod module;
pub mod paths;
pub mod routine;

pub use module::synthesize;
