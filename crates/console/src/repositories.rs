//! Repositories panel: the developer's connected repositories.

use serde::{Deserialize, Serialize};

/// A repository row in the console list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedRepository {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub star_count: u64,
    pub is_connected: bool,
}

/// Local state of the repositories panel: the rows plus a search box.
#[derive(Debug, Clone)]
pub struct RepositoryPanel {
    repositories: Vec<ConnectedRepository>,
    pub search_text: String,
}

impl RepositoryPanel {
    pub fn new(repositories: Vec<ConnectedRepository>) -> Self {
        Self {
            repositories,
            search_text: String::new(),
        }
    }

    /// Panel seeded with the mock rows.
    pub fn with_mock_data() -> Self {
        Self::new(mock_repositories())
    }

    /// Rows matching the search box, case-insensitively, against name and
    /// description.
    pub fn filtered(&self) -> Vec<&ConnectedRepository> {
        let query = self.search_text.to_lowercase();
        self.repositories
            .iter()
            .filter(|repo| {
                query.is_empty()
                    || repo.name.to_lowercase().contains(&query)
                    || repo.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Flip a repository's connected flag. Returns `false` when no row has
    /// the given id.
    pub fn toggle_connection(&mut self, id: i64) -> bool {
        match self.repositories.iter_mut().find(|repo| repo.id == id) {
            Some(repo) => {
                repo.is_connected = !repo.is_connected;
                true
            }
            None => false,
        }
    }
}

fn repo(id: i64, name: &str, description: &str, star_count: u64, is_connected: bool) -> ConnectedRepository {
    ConnectedRepository {
        id,
        name: name.to_string(),
        description: description.to_string(),
        star_count,
        is_connected,
    }
}

/// Mock repository rows.
pub fn mock_repositories() -> Vec<ConnectedRepository> {
    vec![
        repo(1, "code-buddy", "AI coding assistant for developers", 127, true),
        repo(2, "terminal-utils", "A collection of useful terminal utilities", 89, true),
        repo(3, "web-scraper", "Simple web scraper with proxy support", 54, true),
        repo(4, "markdown-previewer", "Live markdown preview tool", 32, false),
        repo(5, "react-components", "Reusable React component library", 213, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_shows_all_rows() {
        let panel = RepositoryPanel::with_mock_data();
        assert_eq!(panel.filtered().len(), 5);
    }

    #[test]
    fn search_matches_name_and_description_case_insensitively() {
        let mut panel = RepositoryPanel::with_mock_data();

        panel.search_text = "BUDDY".to_string();
        let hits = panel.filtered();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "code-buddy");

        panel.search_text = "proxy".to_string();
        assert_eq!(panel.filtered()[0].name, "web-scraper");
    }

    #[test]
    fn toggle_flips_the_connected_flag() {
        let mut panel = RepositoryPanel::with_mock_data();
        assert!(panel.toggle_connection(4));
        assert!(panel.filtered().iter().find(|r| r.id == 4).expect("row").is_connected);

        assert!(panel.toggle_connection(4));
        assert!(!panel.filtered().iter().find(|r| r.id == 4).expect("row").is_connected);
    }

    #[test]
    fn toggle_unknown_id_reports_false() {
        let mut panel = RepositoryPanel::with_mock_data();
        assert!(!panel.toggle_connection(999));
    }
}
