//! The session state holder.
//!
//! One [`SessionManager`] owns the single current identity for the whole
//! process. Components that need identity subscribe to it or receive a
//! snapshot explicitly; nothing reads ambient global state. Provider
//! notifications are the single source of truth and overwrite whatever is
//! held locally.

use tokio::sync::watch;
use url::Url;

use gitstore_core::identity::SessionIdentity;
use gitstore_core::roles::Role;

use crate::auth::{AuthClient, AuthError, AuthSession, Credentials, Registration};

/// Holds the current session and keeps it in sync with the auth provider.
pub struct SessionManager {
    auth: AuthClient,
    /// Full provider session (tokens included); the watch channel only
    /// carries the derived identity.
    session: Option<AuthSession>,
    tx: watch::Sender<Option<SessionIdentity>>,
}

impl SessionManager {
    /// Create a holder with no active session.
    pub fn new(auth: AuthClient) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            auth,
            session: None,
            tx,
        }
    }

    /// Snapshot of the current identity, if signed in.
    pub fn identity(&self) -> Option<SessionIdentity> {
        self.tx.borrow().clone()
    }

    /// Subscribe to identity changes. The receiver yields the current value
    /// immediately and every overwrite afterwards.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionIdentity>> {
        self.tx.subscribe()
    }

    /// Current role; anonymous callers default to [`Role::User`].
    pub fn role(&self) -> Role {
        self.tx.borrow().as_ref().map(|i| i.role).unwrap_or_default()
    }

    /// `true` when the current identity carries the developer capability.
    pub fn is_developer(&self) -> bool {
        self.role() == Role::Developer
    }

    /// Bearer token of the active session, if any.
    pub fn access_token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.access_token.clone())
    }

    /// Sign in with email and password.
    ///
    /// On success the derived identity becomes current and subscribers are
    /// notified; on failure nothing changes and the provider's message is
    /// carried in the error.
    pub async fn sign_in_with_credentials(
        &mut self,
        credentials: &Credentials,
    ) -> Result<SessionIdentity, AuthError> {
        let session = self.auth.sign_in_with_password(credentials).await?;
        let identity = session.identity();
        self.session = Some(session);
        self.tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Start the redirect-based OAuth flow.
    ///
    /// Returns the URL to navigate to. Local state does not change here;
    /// the provider calls back and the resulting session arrives via
    /// [`SessionManager::apply_session_change`].
    pub fn sign_in_with_github(&self, origin: &str) -> Result<Url, AuthError> {
        self.auth.authorize_url(origin)
    }

    /// Create an account.
    ///
    /// Returns the pending identity. The session is not activated here:
    /// the account is unconfirmed until the provider notifies a session
    /// change after email confirmation.
    pub async fn sign_up_with_credentials(
        &mut self,
        registration: &Registration,
    ) -> Result<SessionIdentity, AuthError> {
        let user = self.auth.sign_up(registration).await?;
        Ok(user.identity())
    }

    /// Sign out.
    ///
    /// The local identity is cleared *before* the provider call completes
    /// (optimistic clear), so a provider-side failure can never leave a
    /// stuck session. The provider error, if any, is still returned.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        let token = self.session.take().map(|s| s.access_token);
        self.tx.send_replace(None);

        match token {
            Some(token) => {
                if let Err(err) = self.auth.sign_out(&token).await {
                    tracing::warn!(error = %err, "provider sign-out failed after local clear");
                    return Err(err);
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Apply an asynchronous session-change notification from the provider.
    ///
    /// This is the single source of truth: whatever identity was held
    /// locally is overwritten, including downgrades to `None`.
    pub fn apply_session_change(&mut self, change: Option<AuthSession>) {
        let identity = change.as_ref().map(AuthSession::identity);
        tracing::debug!(signed_in = identity.is_some(), "session change applied");
        self.session = change;
        self.tx.send_replace(identity);
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mockito::{Matcher, Server};
    use serde_json::json;

    use crate::config::BackendConfig;

    use super::*;

    const USER_ID: &str = "5f8b1a9e-3c6d-4e2f-9a1b-7c5d3e8f0a2b";

    fn manager_for(server: &Server) -> SessionManager {
        SessionManager::new(AuthClient::new(BackendConfig::new(
            server.url().parse().expect("mock server url"),
            "anon-key",
        )))
    }

    fn session_json(role: &str) -> serde_json::Value {
        json!({
            "access_token": "jwt-token",
            "refresh_token": "refresh-token",
            "expires_in": 3600,
            "user": {
                "id": USER_ID,
                "email": "dev@example.com",
                "user_metadata": { "full_name": "Dev Eloper", "role": role }
            }
        })
    }

    fn session(role: &str) -> AuthSession {
        serde_json::from_value(session_json(role)).expect("valid session json")
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "dev@example.com".to_string(),
            password: "hunter22".to_string(),
            captcha_token: None,
        }
    }

    // -- sign-in -------------------------------------------------------------

    #[tokio::test]
    async fn sign_in_stores_identity_and_notifies_subscribers() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(session_json("developer").to_string())
            .create_async()
            .await;

        let mut manager = manager_for(&server);
        let mut rx = manager.subscribe();
        assert!(rx.borrow().is_none());

        let identity = manager
            .sign_in_with_credentials(&credentials())
            .await
            .expect("sign-in should succeed");

        assert!(identity.is_developer());
        assert!(manager.is_developer());
        assert_eq!(manager.access_token().as_deref(), Some("jwt-token"));

        rx.changed().await.expect("sender alive");
        assert_eq!(rx.borrow().as_ref(), Some(&identity));
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_state_unchanged() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error_description":"Invalid login credentials"}"#)
            .create_async()
            .await;

        let mut manager = manager_for(&server);
        let result = manager.sign_in_with_credentials(&credentials()).await;
        assert_matches!(result, Err(AuthError::Provider { status: 400, .. }));
        assert!(manager.identity().is_none());
        assert!(manager.access_token().is_none());
    }

    // -- sign-out ------------------------------------------------------------

    #[tokio::test]
    async fn sign_out_clears_identity_even_when_provider_fails() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/logout")
            .with_status(500)
            .with_body(r#"{"msg":"session store unavailable"}"#)
            .create_async()
            .await;

        let mut manager = manager_for(&server);
        manager.apply_session_change(Some(session("user")));
        assert!(manager.identity().is_some());

        let result = manager.sign_out().await;
        assert_matches!(result, Err(AuthError::Provider { status: 500, .. }));
        // The local session is gone regardless of the provider error.
        assert!(manager.identity().is_none());
        assert!(manager.access_token().is_none());
    }

    #[tokio::test]
    async fn sign_out_without_session_is_a_no_op() {
        let server = Server::new_async().await;
        let mut manager = manager_for(&server);
        manager.sign_out().await.expect("nothing to do");
        assert!(manager.identity().is_none());
    }

    // -- session-change notifications ----------------------------------------

    #[tokio::test]
    async fn notification_overwrites_stale_identity() {
        let server = Server::new_async().await;
        let mut manager = manager_for(&server);

        manager.apply_session_change(Some(session("developer")));
        assert!(manager.is_developer());

        // A later notification downgrades the role; it must win.
        manager.apply_session_change(Some(session("user")));
        assert!(!manager.is_developer());
        assert_eq!(manager.role(), Role::User);

        manager.apply_session_change(None);
        assert!(manager.identity().is_none());
    }

    // -- oauth ---------------------------------------------------------------

    #[tokio::test]
    async fn github_sign_in_changes_no_local_state() {
        let server = Server::new_async().await;
        let manager = manager_for(&server);

        let url = manager
            .sign_in_with_github("https://gitstore.example")
            .expect("origin is valid");
        assert!(url.as_str().contains("provider=github"));
        assert!(manager.identity().is_none());
    }

    // -- sign-up -------------------------------------------------------------

    #[tokio::test]
    async fn sign_up_returns_pending_identity_without_activating() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(
                json!({
                    "id": USER_ID,
                    "email": "new@example.com",
                    "user_metadata": { "full_name": "New Dev", "role": "developer" }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut manager = manager_for(&server);
        let pending = manager
            .sign_up_with_credentials(&Registration {
                email: "new@example.com".to_string(),
                password: "secret-password".to_string(),
                display_name: "New Dev".to_string(),
                captcha_token: "cap".to_string(),
                role: Role::Developer,
            })
            .await
            .expect("sign-up should succeed");

        assert!(pending.is_developer());
        // Unconfirmed: the active session only arrives via a later
        // session-change notification.
        assert!(manager.identity().is_none());
    }
}
