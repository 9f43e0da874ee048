//! # monopack-discovery
//!
//! Finds the components a monorepo declares and normalizes them into
//! buildable records.
//!
//! Handles:
//! - **Manifest**: Loading the repository descriptor and normalizing the three
//!   accepted shapes of the components field into one declaration record.
//! - **Component**: The resolved component record and skip diagnostics.
//! - **Resolver**: Config gating, type inference, and source-file lookup.
//! - **Validator**: Duplicate-name detection.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod component;
pub mod manifest;
pub mod resolver;
pub mod validator;
