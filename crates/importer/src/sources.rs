//! Collaborator seams for the import workflow.
//!
//! The workflow talks to the outside world through two traits so tests can
//! substitute both ends. Production wiring: [`gitstore_github::GitHubClient`]
//! reads, [`BackendStore`] writes.

use async_trait::async_trait;

use gitstore_core::error::{CoreError, CoreResult};
use gitstore_core::types::UserId;
use gitstore_github::{GitHubClient, GitHubError, RepositoryMetadata};

use gitstore_backend::rpc::{RpcClient, RpcError, UpsertRepository};

/// Read side: fetch the import-preview metadata for a repository.
#[async_trait]
pub trait MetadataSource {
    async fn fetch(&self, owner: &str, repo: &str) -> CoreResult<RepositoryMetadata>;
}

/// Write side: persist an imported repository for its owning user.
#[async_trait]
pub trait RepositoryStore {
    async fn upsert(&self, user_id: UserId, metadata: &RepositoryMetadata) -> CoreResult<()>;
}

// ── Production impls ─────────────────────────────────────────────────

/// Map read-API failures into the domain taxonomy: API rejections keep
/// their status, transport failures carry none.
fn map_github_error(err: GitHubError) -> CoreError {
    match err {
        GitHubError::Api { status, body } => CoreError::Upstream {
            status: Some(status),
            message: body,
        },
        GitHubError::Request(err) => CoreError::Upstream {
            status: None,
            message: err.to_string(),
        },
    }
}

#[async_trait]
impl MetadataSource for GitHubClient {
    async fn fetch(&self, owner: &str, repo: &str) -> CoreResult<RepositoryMetadata> {
        self.fetch_metadata(owner, repo)
            .await
            .map_err(map_github_error)
    }
}

/// Persists imports through the backend's repository-upsert procedure.
///
/// Holds the bearer token of the session that started the import; one
/// store is built per workflow instance from the current session snapshot.
pub struct BackendStore {
    rpc: RpcClient,
    access_token: String,
}

impl BackendStore {
    pub fn new(rpc: RpcClient, access_token: impl Into<String>) -> Self {
        Self {
            rpc,
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl RepositoryStore for BackendStore {
    async fn upsert(&self, user_id: UserId, metadata: &RepositoryMetadata) -> CoreResult<()> {
        let params = UpsertRepository::from_metadata(user_id, metadata);
        self.rpc
            .insert_github_repo(&self.access_token, &params)
            .await
            .map_err(|err| match err {
                RpcError::Api { status, body } => {
                    CoreError::Persistence(format!("upsert rejected ({status}): {body}"))
                }
                RpcError::Request(err) => CoreError::Persistence(err.to_string()),
            })
    }
}
