//! The three-step import workflow state machine.
//!
//! Transitions:
//!
//! ```text
//! Input ──fetch ok──▶ Preview ──import ok──▶ Success
//!   ▲                    │
//!   └──────back──────────┘        reset: any step ──▶ Input
//! ```
//!
//! Failures never move the step: a failed fetch stays in `Input`, a failed
//! import stays in `Preview` with the metadata intact so it can be retried.
//! Exclusive `&mut self` access makes every run single-flight.

use serde::{Deserialize, Serialize};

use gitstore_core::error::{CoreError, CoreResult};
use gitstore_core::identity::SessionIdentity;
use gitstore_core::repo_url::extract_owner_and_repo;
use gitstore_github::RepositoryMetadata;

use crate::sources::{MetadataSource, RepositoryStore};

/// Current step of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStep {
    /// Waiting for a repository URL.
    #[default]
    Input,
    /// Metadata fetched and displayed, awaiting Back or Import.
    Preview,
    /// Persisted. Terminal until reset.
    Success,
}

/// One run of the repository import process.
pub struct ImportWorkflow<S, P> {
    source: S,
    store: P,
    step: ImportStep,
    url: String,
    metadata: Option<RepositoryMetadata>,
}

impl<S: MetadataSource, P: RepositoryStore> ImportWorkflow<S, P> {
    /// Start a fresh run in the input step.
    pub fn new(source: S, store: P) -> Self {
        Self {
            source,
            store,
            step: ImportStep::Input,
            url: String::new(),
            metadata: None,
        }
    }

    /// Capability predicate: the workflow is only available to developer
    /// accounts. Callers render it as disabled when this is `false`.
    pub fn is_available(identity: Option<&SessionIdentity>) -> bool {
        identity.is_some_and(SessionIdentity::is_developer)
    }

    pub fn step(&self) -> ImportStep {
        self.step
    }

    /// Metadata being previewed, if any.
    pub fn metadata(&self) -> Option<&RepositoryMetadata> {
        self.metadata.as_ref()
    }

    /// The URL accepted by the last successful fetch.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Validate the URL, fetch metadata, and move to the preview step.
    ///
    /// Ordered gates, none of which touch the network:
    /// 1. the identity must hold the developer capability;
    /// 2. the run must be in the input step;
    /// 3. the URL must contain an `owner/repo` pattern.
    ///
    /// A fetch failure surfaces the error and stays in `Input`.
    pub async fn fetch(
        &mut self,
        identity: &SessionIdentity,
        url: &str,
    ) -> CoreResult<&RepositoryMetadata> {
        self.require_developer(identity)?;

        if self.step != ImportStep::Input {
            return Err(CoreError::Validation(
                "a repository has already been fetched; go back or reset first".into(),
            ));
        }

        let slug = extract_owner_and_repo(url).ok_or_else(|| {
            CoreError::Validation(
                "enter a valid repository URL (e.g. https://github.com/owner/repo)".into(),
            )
        })?;

        let metadata = self.source.fetch(&slug.owner, &slug.repo).await?;
        tracing::info!(repo = %metadata.full_name, "import preview ready");

        self.url = url.to_string();
        self.step = ImportStep::Preview;
        Ok(&*self.metadata.insert(metadata))
    }

    /// Discard the preview and return to the input step.
    pub fn back(&mut self) {
        if self.step == ImportStep::Preview {
            self.step = ImportStep::Input;
            self.metadata = None;
            self.url.clear();
        }
    }

    /// Persist the previewed repository for the given identity.
    ///
    /// In `Success` this is an idempotent no-op: a completed run cannot
    /// import again. A store failure keeps the preview intact so the call
    /// can be retried any number of times.
    pub async fn import(&mut self, identity: &SessionIdentity) -> CoreResult<()> {
        self.require_developer(identity)?;

        if self.step == ImportStep::Success {
            tracing::debug!("import ignored: run already succeeded");
            return Ok(());
        }

        let metadata = match (&self.step, &self.metadata) {
            (ImportStep::Preview, Some(metadata)) => metadata,
            _ => {
                return Err(CoreError::Validation(
                    "nothing to import: fetch a repository first".into(),
                ))
            }
        };

        self.store.upsert(identity.user_id, metadata).await?;
        tracing::info!(repo = %metadata.full_name, "repository imported");
        self.step = ImportStep::Success;
        Ok(())
    }

    /// Return to the input step from any state, clearing URL and metadata.
    pub fn reset(&mut self) {
        self.step = ImportStep::Input;
        self.metadata = None;
        self.url.clear();
    }

    fn require_developer(&self, identity: &SessionIdentity) -> CoreResult<()> {
        if !identity.is_developer() {
            return Err(CoreError::Permission(
                "a developer account is required to import repositories".into(),
            ));
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
