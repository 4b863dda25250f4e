//! Auth API client: password sign-in, OAuth redirect, sign-up, sign-out.
//!
//! Credentials are validated locally before any network call; provider
//! errors carry the provider's own message so it can be shown to the user.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use gitstore_core::identity::SessionIdentity;
use gitstore_core::roles::Role;
use gitstore_core::types::UserId;

use crate::config::BackendConfig;

/// OAuth provider used for the redirect-based flow.
pub const OAUTH_PROVIDER: &str = "github";

/// Scopes requested from the OAuth provider.
pub const OAUTH_SCOPES: &str = "read:user user:email repo";

// ── Request types ────────────────────────────────────────────────────

/// Password sign-in input.
#[derive(Debug, Clone, Validate, Serialize)]
pub struct Credentials {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
    /// Optional anti-automation token forwarded to the provider.
    #[serde(skip)]
    pub captcha_token: Option<String>,
}

/// Sign-up input. The anti-automation token is mandatory here.
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub display_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub captcha_token: String,
    /// Role claim written into the profile metadata at creation.
    pub role: Role,
}

// ── Wire types ───────────────────────────────────────────────────────

/// Profile metadata embedded in the provider's user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// The provider's user record, as embedded in sessions and sign-up
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    /// Derive a [`SessionIdentity`] snapshot from this user record.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.id,
            email: self.email.clone(),
            role: Role::from_claim(self.user_metadata.role.as_deref()),
            display_name: self.user_metadata.full_name.clone(),
            expires_at: None,
        }
    }
}

/// An authenticated session issued by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    pub user: AuthUser,
}

impl AuthSession {
    /// Derive the identity snapshot, stamping the token expiry.
    pub fn identity(&self) -> SessionIdentity {
        let mut identity = self.user.identity();
        identity.expires_at = Some(Utc::now() + Duration::seconds(self.expires_in));
        identity
    }
}

/// Anti-automation envelope the provider expects alongside credentials.
#[derive(Debug, Serialize)]
struct MetaSecurity<'a> {
    captcha_token: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordGrantBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gotrue_meta_security: Option<MetaSecurity<'a>>,
}

#[derive(Debug, Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: UserMetadata,
    gotrue_meta_security: MetaSecurity<'a>,
}

/// Shape of the provider's JSON error bodies. Different endpoints use
/// different keys, so all known ones are tried.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

// ── Errors ───────────────────────────────────────────────────────────

/// Errors from the auth API layer.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Input failed local validation; no network call was made.
    #[error("Invalid credentials: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider rejected the call; `message` is the provider's own
    /// description, suitable for display.
    #[error("Auth provider error ({status}): {message}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the provider's error body.
        message: String,
    },

    /// A URL could not be constructed (malformed origin).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// ── Client ───────────────────────────────────────────────────────────

/// HTTP client for the backend's auth endpoints.
pub struct AuthClient {
    client: reqwest::Client,
    config: BackendConfig,
}

impl AuthClient {
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

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Sign in with email and password.
    ///
    /// `POST /auth/v1/token?grant_type=password`. The optional
    /// anti-automation token is forwarded in the provider's
    /// `gotrue_meta_security` envelope.
    pub async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSession, AuthError> {
        credentials.validate()?;

        let body = PasswordGrantBody {
            email: &credentials.email,
            password: &credentials.password,
            gotrue_meta_security: credentials
                .captcha_token
                .as_deref()
                .map(|captcha_token| MetaSecurity { captcha_token }),
        };

        let response = self
            .client
            .post(self.config.endpoint("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        let session: AuthSession = Self::parse_response(response).await?;
        tracing::info!(user_id = %session.user.id, "password sign-in succeeded");
        Ok(session)
    }

    /// Create an account with profile metadata.
    ///
    /// `POST /auth/v1/signup`. Returns the (unconfirmed) user record; the
    /// session only becomes active once the provider notifies a
    /// session change after email confirmation.
    pub async fn sign_up(&self, registration: &Registration) -> Result<AuthUser, AuthError> {
        registration.validate()?;

        let body = SignUpBody {
            email: &registration.email,
            password: &registration.password,
            data: UserMetadata {
                full_name: Some(registration.display_name.clone()),
                role: Some(registration.role.as_str().to_string()),
            },
            gotrue_meta_security: MetaSecurity {
                captcha_token: &registration.captcha_token,
            },
        };

        let response = self
            .client
            .post(self.config.endpoint("/auth/v1/signup"))
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        let user: AuthUser = Self::parse_response(response).await?;
        tracing::info!(user_id = %user.id, role = %registration.role, "sign-up accepted");
        Ok(user)
    }

    /// Build the redirect URL for the OAuth flow.
    ///
    /// The caller navigates to this URL; the provider redirects back to
    /// `{origin}{oauth_callback_path}`. No local state changes until the
    /// resulting session-change notification arrives.
    pub fn authorize_url(&self, origin: &str) -> Result<Url, AuthError> {
        let redirect_to = format!("{origin}{}", self.config.oauth_callback_path);
        // Validate the caller-supplied origin eagerly.
        Url::parse(&redirect_to)?;

        let mut url = self.config.endpoint("/auth/v1/authorize");
        url.query_pairs_mut()
            .append_pair("provider", OAUTH_PROVIDER)
            .append_pair("redirect_to", &redirect_to)
            .append_pair("scopes", OAUTH_SCOPES);
        Ok(url)
    }

    /// Invalidate the session server-side.
    ///
    /// `POST /auth/v1/logout` with the session's bearer token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.config.endpoint("/auth/v1/logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::extract_error_message(response).await;
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    // ---- private helpers ----

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        let status = response.status();
        if !status.is_success() {
            let message = Self::extract_error_message(response).await;
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Pull a human-readable message out of a provider error body.
    async fn extract_error_message(response: reqwest::Response) -> String {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        match serde_json::from_str::<ProviderErrorBody>(&body) {
            Ok(parsed) => parsed
                .error_description
                .or(parsed.msg)
                .or(parsed.message)
                .unwrap_or(body),
            Err(_) => body,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    const USER_ID: &str = "5f8b1a9e-3c6d-4e2f-9a1b-7c5d3e8f0a2b";

    fn client_for(server: &Server) -> AuthClient {
        AuthClient::new(BackendConfig::new(
            server.url().parse().expect("mock server url"),
            "anon-key",
        ))
    }

    fn session_body(role: &str) -> serde_json::Value {
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

    fn credentials() -> Credentials {
        Credentials {
            email: "dev@example.com".to_string(),
            password: "hunter22".to_string(),
            captcha_token: None,
        }
    }

    // -- sign_in_with_password -----------------------------------------------

    #[tokio::test]
    async fn sign_in_decodes_session_and_derives_identity() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .match_header("apikey", "anon-key")
            .with_status(200)
            .with_body(session_body("developer").to_string())
            .create_async()
            .await;

        let session = client_for(&server)
            .sign_in_with_password(&credentials())
            .await
            .expect("sign-in should succeed");

        let identity = session.identity();
        assert_eq!(identity.user_id.to_string(), USER_ID);
        assert_eq!(identity.role, Role::Developer);
        assert_eq!(identity.display_name.as_deref(), Some("Dev Eloper"));
        assert!(identity.expires_at.is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_in_forwards_captcha_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .match_body(Matcher::PartialJson(json!({
                "email": "dev@example.com",
                "gotrue_meta_security": { "captcha_token": "cap-123" }
            })))
            .with_status(200)
            .with_body(session_body("user").to_string())
            .create_async()
            .await;

        let creds = Credentials {
            captcha_token: Some("cap-123".to_string()),
            ..credentials()
        };
        client_for(&server)
            .sign_in_with_password(&creds)
            .await
            .expect("sign-in should succeed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_in_surfaces_provider_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
            .create_async()
            .await;

        let result = client_for(&server).sign_in_with_password(&credentials()).await;
        assert_matches!(
            result,
            Err(AuthError::Provider { status: 400, message }) if message == "Invalid login credentials"
        );
    }

    #[tokio::test]
    async fn sign_in_rejects_malformed_email_before_network() {
        // No mock registered: a network call would fail the test anyway,
        // but validation must short-circuit first.
        let server = Server::new_async().await;
        let creds = Credentials {
            email: "not-an-email".to_string(),
            ..credentials()
        };
        let result = client_for(&server).sign_in_with_password(&creds).await;
        assert_matches!(result, Err(AuthError::Validation(_)));
    }

    // -- sign_up -------------------------------------------------------------

    #[tokio::test]
    async fn sign_up_sends_profile_metadata_and_captcha() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/signup")
            .match_body(Matcher::PartialJson(json!({
                "email": "new@example.com",
                "data": { "full_name": "New Dev", "role": "developer" },
                "gotrue_meta_security": { "captcha_token": "cap-456" }
            })))
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

        let registration = Registration {
            email: "new@example.com".to_string(),
            password: "secret-password".to_string(),
            display_name: "New Dev".to_string(),
            captcha_token: "cap-456".to_string(),
            role: Role::Developer,
        };

        let user = client_for(&server)
            .sign_up(&registration)
            .await
            .expect("sign-up should succeed");
        assert_eq!(user.identity().role, Role::Developer);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_up_rejects_short_password_before_network() {
        let server = Server::new_async().await;
        let registration = Registration {
            email: "new@example.com".to_string(),
            password: "short".to_string(),
            display_name: "New Dev".to_string(),
            captcha_token: "cap".to_string(),
            role: Role::User,
        };
        let result = client_for(&server).sign_up(&registration).await;
        assert_matches!(result, Err(AuthError::Validation(_)));
    }

    // -- authorize_url -------------------------------------------------------

    #[tokio::test]
    async fn authorize_url_carries_provider_redirect_and_scopes() {
        let server = Server::new_async().await;
        let url = client_for(&server)
            .authorize_url("https://gitstore.example")
            .expect("origin is valid");

        assert_eq!(url.path(), "/auth/v1/authorize");
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.get("provider").map(String::as_str), Some("github"));
        assert_eq!(
            pairs.get("redirect_to").map(String::as_str),
            Some("https://gitstore.example/auth/callback")
        );
        assert_eq!(
            pairs.get("scopes").map(String::as_str),
            Some("read:user user:email repo")
        );
    }

    #[tokio::test]
    async fn authorize_url_rejects_malformed_origin() {
        let server = Server::new_async().await;
        let result = client_for(&server).authorize_url("not an origin");
        assert_matches!(result, Err(AuthError::InvalidUrl(_)));
    }

    // -- sign_out ------------------------------------------------------------

    #[tokio::test]
    async fn sign_out_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/logout")
            .match_header("authorization", "Bearer jwt-token")
            .match_header("apikey", "anon-key")
            .with_status(204)
            .create_async()
            .await;

        client_for(&server)
            .sign_out("jwt-token")
            .await
            .expect("sign-out should succeed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_out_surfaces_provider_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/logout")
            .with_status(500)
            .with_body(r#"{"msg":"session store unavailable"}"#)
            .create_async()
            .await;

        let result = client_for(&server).sign_out("jwt-token").await;
        assert_matches!(
            result,
            Err(AuthError::Provider { status: 500, message }) if message == "session store unavailable"
        );
    }
}
