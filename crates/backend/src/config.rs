//! Backend connection configuration.

use url::Url;

/// Default path the OAuth provider redirects back to.
pub const DEFAULT_OAUTH_CALLBACK_PATH: &str = "/auth/callback";

/// Configuration for the hosted backend, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend project (e.g. `https://xyz.supabase.co`).
    pub base_url: Url,
    /// Public (anonymous) API key sent with every request.
    pub anon_key: String,
    /// Path appended to the caller's origin for OAuth redirects
    /// (default: `/auth/callback`).
    pub oauth_callback_path: String,
}

impl BackendConfig {
    /// Build a configuration directly (used by tests and embedders).
    pub fn new(base_url: Url, anon_key: impl Into<String>) -> Self {
        Self {
            base_url,
            anon_key: anon_key.into(),
            oauth_callback_path: DEFAULT_OAUTH_CALLBACK_PATH.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Default          |
    /// |-----------------------|----------|------------------|
    /// | `BACKEND_URL`         | **yes**  | --               |
    /// | `BACKEND_ANON_KEY`    | **yes**  | --               |
    /// | `OAUTH_CALLBACK_PATH` | no       | `/auth/callback` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or `BACKEND_URL` is not a
    /// valid URL.
    pub fn from_env() -> Self {
        let base_url = std::env::var("BACKEND_URL")
            .expect("BACKEND_URL must be set in the environment")
            .parse()
            .expect("BACKEND_URL must be a valid URL");

        let anon_key =
            std::env::var("BACKEND_ANON_KEY").expect("BACKEND_ANON_KEY must be set in the environment");
        assert!(!anon_key.is_empty(), "BACKEND_ANON_KEY must not be empty");

        let oauth_callback_path = std::env::var("OAUTH_CALLBACK_PATH")
            .unwrap_or_else(|_| DEFAULT_OAUTH_CALLBACK_PATH.into());

        Self {
            base_url,
            anon_key,
            oauth_callback_path,
        }
    }

    /// Join a path onto the base URL, e.g. `/auth/v1/token`.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        // Url::join would resolve against the last segment, so set the
        // path explicitly.
        url.set_path(path);
        url
    }
}
