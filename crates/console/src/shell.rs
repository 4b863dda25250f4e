//! Console access gate and view switching.

use serde::{Deserialize, Serialize};

use gitstore_core::error::{CoreError, CoreResult};
use gitstore_core::identity::SessionIdentity;

/// The panel currently shown in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Overview,
    Repositories,
    Apps,
}

/// The developer console's local state: which view is active.
#[derive(Debug, Clone, Default)]
pub struct ConsoleShell {
    view: ActiveView,
}

impl ConsoleShell {
    /// Open the console for the given identity.
    ///
    /// Anonymous callers and non-developers are refused before any view is
    /// shown, mirroring the sign-in and developer-account guards on the
    /// console route.
    pub fn open(identity: Option<&SessionIdentity>) -> CoreResult<Self> {
        let identity = identity.ok_or_else(|| {
            CoreError::Permission("please sign in to access the developer console".into())
        })?;
        if !identity.is_developer() {
            return Err(CoreError::Permission(
                "a developer account is required to access this page".into(),
            ));
        }
        tracing::debug!(user_id = %identity.user_id, "developer console opened");
        Ok(Self::default())
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn switch_to(&mut self, view: ActiveView) {
        self.view = view;
    }
}
