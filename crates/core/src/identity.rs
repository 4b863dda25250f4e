//! The authenticated identity as seen by the client.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::{Timestamp, UserId};

/// A snapshot of the currently signed-in user.
///
/// This is a plain value type; the single source of truth lives in the
/// session holder, which refreshes it on every provider notification.
/// Components needing identity receive it explicitly rather than reading
/// ambient global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Provider-issued user id.
    pub user_id: UserId,
    /// Email address, if the provider exposed one.
    pub email: Option<String>,
    /// Role derived from the profile metadata claim.
    pub role: Role,
    /// Display name from the profile metadata, if set.
    pub display_name: Option<String>,
    /// Access-token expiry, if the provider reported one.
    pub expires_at: Option<Timestamp>,
}

impl SessionIdentity {
    /// `true` when this identity carries the developer capability.
    pub fn is_developer(&self) -> bool {
        self.role == Role::Developer
    }
}
