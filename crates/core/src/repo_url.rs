//! Repository URL parsing for the import workflow.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches `github.com/<owner>/<repo>` anywhere in the input.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/\s]+)/([^/\s]+)").expect("valid regex"));

/// Owner and repository name extracted from a code-hosting URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

/// Extract the owner and repository name from a repository URL.
///
/// Returns `None` for any input not containing the
/// `github.com/<owner>/<repo>` pattern; a trailing `.git` suffix on the
/// repository name is stripped. Callers treat `None` as a validation error
/// and never reach the network.
pub fn extract_owner_and_repo(url: &str) -> Option<RepoSlug> {
    let captures = SLUG_RE.captures(url)?;
    let owner = captures.get(1)?.as_str().to_string();
    let repo = captures
        .get(2)?
        .as_str()
        .trim_end_matches(".git")
        .to_string();
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some(RepoSlug { owner, repo })
}
