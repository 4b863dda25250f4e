//! REST client for the code-hosting read API, using [`reqwest`].

use serde::de::DeserializeOwned;

use crate::metadata::{RepoResponse, RepositoryMetadata, MANIFEST_FILE_NAME};

/// Default public API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The platform asks API clients to identify themselves.
const USER_AGENT: &str = concat!("gitstore/", env!("CARGO_PKG_VERSION"));

/// Client configuration.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Base API URL (default: `https://api.github.com`).
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl GitHubConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var          | Default                  |
    /// |------------------|--------------------------|
    /// | `GITHUB_API_URL` | `https://api.github.com` |
    pub fn from_env() -> Self {
        let api_url = std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self { api_url }
    }
}

/// Errors from the read API layer.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The read API returned a non-2xx status code.
    #[error("Repository API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },
}

/// HTTP client for the code-hosting read API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client for the given configuration.
    pub fn new(config: GitHubConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling across clients).
    pub fn with_client(client: reqwest::Client, config: GitHubConfig) -> Self {
        Self {
            client,
            api_url: config.api_url,
        }
    }

    /// Fetch repository metadata: `GET /repos/{owner}/{repo}`.
    pub async fn repository(&self, owner: &str, repo: &str) -> Result<RepoResponse, GitHubError> {
        let response = self
            .client
            .get(format!("{}/repos/{}/{}", self.api_url, owner, repo))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Probe for the `.GitStore` manifest file at the repository root.
    ///
    /// `GET /repos/{owner}/{repo}/contents/.GitStore`, used only as a
    /// boolean signal: any non-success status or transport failure degrades
    /// to `false` rather than an error.
    pub async fn has_manifest_file(&self, owner: &str, repo: &str) -> bool {
        let result = self
            .client
            .get(format!(
                "{}/repos/{}/{}/contents/{}",
                self.api_url, owner, repo, MANIFEST_FILE_NAME
            ))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::warn!(owner, repo, error = %err, "manifest probe failed, treating as absent");
                false
            }
        }
    }

    /// Fetch the full import-preview metadata for a repository.
    ///
    /// Combines the metadata read (whose failure is an error) with the
    /// manifest probe (whose failure only clears the flag).
    pub async fn fetch_metadata(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepositoryMetadata, GitHubError> {
        let response = self.repository(owner, repo).await?;
        let has_manifest = self.has_manifest_file(owner, repo).await;
        tracing::info!(
            full_name = %response.full_name,
            has_manifest,
            "fetched repository metadata"
        );
        Ok(RepositoryMetadata::from_response(response, has_manifest))
    }

    // ---- private helpers ----

    /// Parse a JSON response body, mapping non-success statuses to
    /// [`GitHubError::Api`].
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GitHubError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GitHubError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
