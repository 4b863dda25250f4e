//! Catalog query engine: filtering and sorting of application records.
//!
//! The engine is pure and synchronous: given the full in-memory catalog and
//! a [`FilterState`], [`Catalog::derived_view`] produces an ordered view
//! with no side effects. Consumers own their `FilterState` and recompute
//! the view after every mutation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// ── Types ────────────────────────────────────────────────────────────

/// A listed application sourced from a code-hosting repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Unique catalog id.
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    /// Repository star count.
    pub star_count: u64,
    /// Total installs across platforms.
    pub download_count: u64,
    pub author_name: String,
    pub author_avatar_url: String,
    /// Platforms the application ships on. Never empty.
    pub platforms: BTreeSet<String>,
}

/// Active sort key for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Star count, descending (the default).
    #[default]
    Popularity,
    /// Download count, descending.
    Downloads,
    /// No timestamp exists on [`ApplicationRecord`], so this preserves the
    /// catalog's input order.
    Newest,
}

/// The three independent filter predicates owned by the catalog consumer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring matched against name, description, and
    /// author name. Empty matches everything.
    pub search_text: String,
    /// Records are included when this intersects their platform set.
    /// Empty matches everything.
    pub selected_platforms: BTreeSet<String>,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Clear search text, platform selection, and sort key back to their
    /// defaults in one atomic update.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }
}

// ── Catalog ──────────────────────────────────────────────────────────

/// The full in-memory list of application records.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ApplicationRecord>,
}

impl Catalog {
    /// Build a catalog, validating the records defensively.
    ///
    /// Rejects duplicate ids and records with an empty platform set.
    pub fn new(records: Vec<ApplicationRecord>) -> CoreResult<Self> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate application id: {}",
                    record.id
                )));
            }
            if record.platforms.is_empty() {
                return Err(CoreError::Validation(format!(
                    "application {} has no platforms",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    /// All records in input order, unfiltered.
    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    /// Union of platform values across all records.
    pub fn known_platforms(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|r| r.platforms.iter().cloned())
            .collect()
    }

    /// Toggle a platform in the filter's selection.
    ///
    /// Maintains the invariant that `selected_platforms` stays a subset of
    /// [`Catalog::known_platforms`]: toggling an unknown platform is a
    /// validation error rather than a silent no-match filter.
    pub fn toggle_platform(&self, filter: &mut FilterState, platform: &str) -> CoreResult<()> {
        if !self.known_platforms().contains(platform) {
            return Err(CoreError::Validation(format!(
                "unknown platform: {platform}"
            )));
        }
        if !filter.selected_platforms.remove(platform) {
            filter.selected_platforms.insert(platform.to_string());
        }
        Ok(())
    }

    /// Derive the filtered, sorted view for the given filter state.
    ///
    /// Pure and total: no errors are possible and the catalog is never
    /// mutated. The search and platform predicates are combined with AND;
    /// sorting is stable, so records with equal keys keep their input
    /// order.
    pub fn derived_view(&self, filter: &FilterState) -> Vec<&ApplicationRecord> {
        let query = filter.search_text.to_lowercase();

        let mut view: Vec<&ApplicationRecord> = self
            .records
            .iter()
            .filter(|record| matches_search(record, &query))
            .filter(|record| matches_platforms(record, &filter.selected_platforms))
            .collect();

        match filter.sort_key {
            SortKey::Popularity => view.sort_by(|a, b| b.star_count.cmp(&a.star_count)),
            SortKey::Downloads => view.sort_by(|a, b| b.download_count.cmp(&a.download_count)),
            SortKey::Newest => {} // input order, see SortKey::Newest
        }

        view
    }
}

// ── Predicates ───────────────────────────────────────────────────────

/// Case-insensitive substring match against name, description, and author
/// name. `query` must already be lowercased.
fn matches_search(record: &ApplicationRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(query)
        || record.description.to_lowercase().contains(query)
        || record.author_name.to_lowercase().contains(query)
}

/// Non-empty intersection with the selection, or an empty selection.
fn matches_platforms(record: &ApplicationRecord, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || record.platforms.iter().any(|p| selected.contains(p))
}

// ── Tests ────────────────────────────────────────────────────────────
