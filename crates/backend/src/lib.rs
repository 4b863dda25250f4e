//! Client for the hosted backend-as-a-service.
//!
//! The backend owns authentication (password, OAuth redirect, sign-up,
//! sign-out, session-change notifications) and persistence via remote
//! procedure calls. This crate wraps its HTTP surface and holds the single
//! current session.

pub mod auth;
pub mod config;
pub mod rpc;
pub mod session;

pub use auth::{AuthClient, AuthError, AuthSession};
pub use config::BackendConfig;
pub use rpc::{RpcClient, RpcError, UpsertRepository};
pub use session::SessionManager;
