//! Apps panel: the developer's published and draft applications.

use serde::{Deserialize, Serialize};

/// Publish state of a console app row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Published,
    Draft,
}

/// Status filter applied on top of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl StatusFilter {
    fn matches(self, status: AppStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Published => status == AppStatus::Published,
            StatusFilter::Draft => status == AppStatus::Draft,
        }
    }
}

/// An application row in the console list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperApp {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// `owner/name` of the backing repository.
    pub repository: String,
    pub category: String,
    pub download_count: u64,
    pub platform: String,
    pub status: AppStatus,
}

/// Local state of the apps panel: rows, search box, status filter.
#[derive(Debug, Clone)]
pub struct AppsPanel {
    apps: Vec<DeveloperApp>,
    pub search_text: String,
    pub status_filter: StatusFilter,
}

impl AppsPanel {
    pub fn new(apps: Vec<DeveloperApp>) -> Self {
        Self {
            apps,
            search_text: String::new(),
            status_filter: StatusFilter::default(),
        }
    }

    /// Panel seeded with the mock rows.
    pub fn with_mock_data() -> Self {
        Self::new(mock_apps())
    }

    /// Rows matching both the search box (name or description,
    /// case-insensitive) and the status filter.
    pub fn filtered(&self) -> Vec<&DeveloperApp> {
        let query = self.search_text.to_lowercase();
        self.apps
            .iter()
            .filter(|app| {
                let matches_search = query.is_empty()
                    || app.name.to_lowercase().contains(&query)
                    || app.description.to_lowercase().contains(&query);
                matches_search && self.status_filter.matches(app.status)
            })
            .collect()
    }
}

/// Mock app rows.
pub fn mock_apps() -> Vec<DeveloperApp> {
    vec![
        DeveloperApp {
            id: 1,
            name: "CodeBuddy".to_string(),
            description: "AI coding assistant for developers".to_string(),
            repository: "user/code-buddy".to_string(),
            category: "Development".to_string(),
            download_count: 876,
            platform: "Cross-platform".to_string(),
            status: AppStatus::Published,
        },
        DeveloperApp {
            id: 2,
            name: "Terminal Utils".to_string(),
            description: "A collection of useful terminal utilities".to_string(),
            repository: "user/terminal-utils".to_string(),
            category: "Utilities".to_string(),
            download_count: 324,
            platform: "macOS, Linux".to_string(),
            status: AppStatus::Published,
        },
        DeveloperApp {
            id: 3,
            name: "Web Scraper".to_string(),
            description: "Simple web scraper with proxy support".to_string(),
            repository: "user/web-scraper".to_string(),
            category: "Development".to_string(),
            download_count: 54,
            platform: "Windows, Linux".to_string(),
            status: AppStatus::Draft,
        },
    ]
}
