//! Test helpers shared across crates in the workspace.
//!
//! The crate provides sample structures, accessor builders that record their
//! calls, and wrappers around `figment::Jail` for option-loading tests.

pub mod accessors;
pub mod figment;
pub mod fixtures;
