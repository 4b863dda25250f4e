//! Repository metadata as displayed in the import preview.

use serde::{Deserialize, Serialize};

/// Fixed-name manifest file looked up at the repository root. Its presence
/// signals that installation metadata is available.
pub const MANIFEST_FILE_NAME: &str = ".GitStore";

/// Fallback description for repositories without one.
const NO_DESCRIPTION: &str = "No description provided";

/// Fallback primary language for repositories without one.
const NO_LANGUAGE: &str = "Not specified";

// ── Wire types ───────────────────────────────────────────────────────

/// Subset of the `GET /repos/{owner}/{repo}` response we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoResponse {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub owner: RepoOwner,
    pub license: Option<RepoLicense>,
}

/// Repository owner as returned by the read API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: String,
}

/// SPDX license info as returned by the read API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLicense {
    pub key: String,
    pub name: String,
}

// ── Domain type ──────────────────────────────────────────────────────

/// Metadata for one import attempt.
///
/// Created transiently when the workflow fetches a repository, displayed in
/// the preview step, and discarded on reset or success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Numeric id assigned by the code-hosting platform.
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub url: String,
    pub star_count: u64,
    pub fork_count: u64,
    pub primary_language: String,
    /// Ordered as returned by the read API.
    pub topics: Vec<String>,
    pub owner: RepoOwner,
    /// Whether the `.GitStore` manifest file exists at the repository root.
    pub has_manifest_file: bool,
    pub license: Option<RepoLicense>,
}

impl RepositoryMetadata {
    /// Combine the repository response with the manifest probe result,
    /// filling in the display fallbacks for missing description/language.
    pub fn from_response(response: RepoResponse, has_manifest_file: bool) -> Self {
        Self {
            id: response.id,
            name: response.name,
            full_name: response.full_name,
            description: response
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            url: response.html_url,
            star_count: response.stargazers_count,
            fork_count: response.forks_count,
            primary_language: response
                .language
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| NO_LANGUAGE.to_string()),
            topics: response.topics,
            owner: response.owner,
            has_manifest_file,
            license: response.license,
        }
    }
}
