//! Overview panel: headline statistics and recent activity.
//!
//! Mock data stands in for a real backend query.

use serde::{Deserialize, Serialize};

use gitstore_core::identity::SessionIdentity;

/// Fallback name in the welcome line when the profile has none.
const DEFAULT_DISPLAY_NAME: &str = "Developer";

/// Headline counters shown on the overview panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperStats {
    pub apps: u64,
    pub repositories: u64,
    pub downloads: u64,
    pub users: u64,
}

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub text: String,
    pub time_ago: String,
}

/// Mock statistics.
pub fn mock_stats() -> DeveloperStats {
    DeveloperStats {
        apps: 3,
        repositories: 5,
        downloads: 1254,
        users: 87,
    }
}

/// Mock recent-activity feed.
pub fn recent_activity() -> Vec<ActivityEntry> {
    let entries = [
        ("App 'Terminal Utils' was downloaded 24 times today", "2 hours ago"),
        ("New version of 'CodeBuddy' was published", "Yesterday"),
        ("Connected 3 new repositories", "3 days ago"),
    ];
    entries
        .into_iter()
        .map(|(text, time_ago)| ActivityEntry {
            text: text.to_string(),
            time_ago: time_ago.to_string(),
        })
        .collect()
}

/// Welcome line for the overview header.
pub fn welcome_line(identity: &SessionIdentity) -> String {
    let name = identity
        .display_name
        .as_deref()
        .unwrap_or(DEFAULT_DISPLAY_NAME);
    format!("Welcome, {name}")
}
