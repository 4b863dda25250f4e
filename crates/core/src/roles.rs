//! Role claims and derivation.
//!
//! The role is a tag embedded in the user's profile metadata by the auth
//! provider at sign-up; the client only ever reads it.

use serde::{Deserialize, Serialize};

/// Role claim value for regular users.
pub const ROLE_USER: &str = "user";
/// Role claim value for developer accounts.
pub const ROLE_DEVELOPER: &str = "developer";

/// A user's role as derived from the identity claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular catalog user (the default).
    #[default]
    User,
    /// Developer account: may import repositories and open the console.
    Developer,
}

impl Role {
    /// Derive a role from a raw claim value.
    ///
    /// Any missing or unrecognized claim defaults to [`Role::User`]; only
    /// the exact string `"developer"` grants developer capabilities.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(ROLE_DEVELOPER) => Role::Developer,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Developer => ROLE_DEVELOPER,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
