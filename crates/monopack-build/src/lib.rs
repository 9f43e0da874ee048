//! Build orchestration for monopack.
//!
//! Writes the synthesized aggregation module into a private temporary
//! workspace, hands it to a [`Toolchain`](toolchain::Toolchain), classifies
//! the outcome, and always removes the workspace before returning.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod error;
pub mod orchestrator;
pub mod toolchain;
pub mod workspace;
