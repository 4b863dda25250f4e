//! GitStore domain types and pure logic.
//!
//! This crate has zero internal dependencies (no HTTP, no async, no I/O) so
//! it can be used by every other workspace crate: the catalog query engine,
//! the error taxonomy, role derivation, session identity, and repository-URL
//! parsing all live here.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod repo_url;
pub mod roles;
pub mod sample;
pub mod types;
