//! Remote procedure calls against the backend's data API.
//!
//! The only procedure the client invokes is `insert_github_repo`, which
//! upserts an imported repository record owned by the calling user.

use serde::Serialize;

use gitstore_core::types::UserId;
use gitstore_github::RepositoryMetadata;

use crate::config::BackendConfig;

/// Name of the repository-upsert procedure.
pub const INSERT_GITHUB_REPO: &str = "insert_github_repo";

/// Parameters for `insert_github_repo`, serialized with the procedure's
/// `p_`-prefixed argument names.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertRepository {
    pub p_user_id: UserId,
    /// The platform's numeric repo id, passed as a string.
    pub p_repo_id: String,
    pub p_name: String,
    pub p_full_name: String,
    pub p_description: String,
    pub p_html_url: String,
    pub p_stars: u64,
    pub p_forks: u64,
    pub p_language: String,
    pub p_topics: Vec<String>,
    pub p_owner_login: String,
    pub p_owner_avatar_url: String,
    pub p_has_gitstore_file: bool,
    pub p_license_key: Option<String>,
    pub p_license_name: Option<String>,
}

impl UpsertRepository {
    /// Map fetched metadata plus the owning identity into call parameters.
    pub fn from_metadata(user_id: UserId, metadata: &RepositoryMetadata) -> Self {
        Self {
            p_user_id: user_id,
            p_repo_id: metadata.id.to_string(),
            p_name: metadata.name.clone(),
            p_full_name: metadata.full_name.clone(),
            p_description: metadata.description.clone(),
            p_html_url: metadata.url.clone(),
            p_stars: metadata.star_count,
            p_forks: metadata.fork_count,
            p_language: metadata.primary_language.clone(),
            p_topics: metadata.topics.clone(),
            p_owner_login: metadata.owner.login.clone(),
            p_owner_avatar_url: metadata.owner.avatar_url.clone(),
            p_has_gitstore_file: metadata.has_manifest_file,
            p_license_key: metadata.license.as_ref().map(|l| l.key.clone()),
            p_license_name: metadata.license.as_ref().map(|l| l.name.clone()),
        }
    }
}

/// Errors from the RPC layer.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the call.
    #[error("RPC error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },
}

/// HTTP client for the backend's RPC endpoints.
pub struct RpcClient {
    client: reqwest::Client,
    config: BackendConfig,
}

impl RpcClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    /// Upsert an imported repository record.
    ///
    /// `POST /rest/v1/rpc/insert_github_repo` with the caller's bearer
    /// token; row-level security ties the record to the owning user.
    pub async fn insert_github_repo(
        &self,
        access_token: &str,
        params: &UpsertRepository,
    ) -> Result<(), RpcError> {
        let response = self
            .client
            .post(
                self.config
                    .endpoint(&format!("/rest/v1/rpc/{INSERT_GITHUB_REPO}")),
            )
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .json(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "repository upsert rejected");
            return Err(RpcError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(repo = %params.p_full_name, "repository upserted");
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
