//! The repository import workflow.
//!
//! A strictly sequential three-step wizard: enter a repository URL, preview
//! the fetched metadata, persist it. One [`workflow::ImportWorkflow`]
//! instance owns one run; nothing is shared between instances.

pub mod sources;
pub mod workflow;

pub use sources::{BackendStore, MetadataSource, RepositoryStore};
pub use workflow::{ImportStep, ImportWorkflow};
