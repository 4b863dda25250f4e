//! Client for the code-hosting platform's public read API.
//!
//! Two reads are needed by the import workflow: repository metadata by
//! owner/repo, and an existence probe for the `.GitStore` manifest file at
//! the repository root.

pub mod client;
pub mod metadata;

pub use client::{GitHubClient, GitHubConfig, GitHubError};
pub use metadata::{RepositoryMetadata, MANIFEST_FILE_NAME};
