//! Sample catalog data.
//!
//! The catalog engine is fed through the [`CatalogSource`] seam so a real
//! backend query can replace this fixture without touching the engine. The
//! records here mirror the launch catalog shown on the discover page.

use std::collections::BTreeSet;

use crate::catalog::{ApplicationRecord, Catalog};
use crate::error::CoreResult;

/// Platform values offered as filter toggles.
pub const PLATFORM_OPTIONS: &[&str] = &["Windows", "macOS", "Linux", "iOS", "Android", "Web"];

/// A source of catalog records.
pub trait CatalogSource {
    /// Load the full list of application records.
    fn load(&self) -> CoreResult<Vec<ApplicationRecord>>;

    /// Load and validate into a [`Catalog`].
    fn load_catalog(&self) -> CoreResult<Catalog> {
        Catalog::new(self.load()?)
    }
}

/// The built-in sample catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleCatalog;

impl CatalogSource for SampleCatalog {
    fn load(&self) -> CoreResult<Vec<ApplicationRecord>> {
        Ok(sample_records())
    }
}

fn platforms(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|p| p.to_string()).collect()
}

fn app(
    id: &str,
    name: &str,
    description: &str,
    icon_url: &str,
    star_count: u64,
    download_count: u64,
    author_name: &str,
    author_avatar_url: &str,
    platform_list: &[&str],
) -> ApplicationRecord {
    ApplicationRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon_url: icon_url.to_string(),
        star_count,
        download_count,
        author_name: author_name.to_string(),
        author_avatar_url: author_avatar_url.to_string(),
        platforms: platforms(platform_list),
    }
}

/// The eight launch applications.
pub fn sample_records() -> Vec<ApplicationRecord> {
    vec![
        app(
            "1",
            "VSCode",
            "Code editing. Redefined. Free and open source code editor.",
            "https://cdn.icon-icons.com/icons2/2107/PNG/512/file_type_vscode_icon_130084.png",
            142_000,
            5_800_000,
            "Microsoft",
            "https://github.com/microsoft.png",
            &["Windows", "macOS", "Linux"],
        ),
        app(
            "2",
            "Figma",
            "Design, prototype, and gather feedback all in one place with Figma.",
            "https://upload.wikimedia.org/wikipedia/commons/3/33/Figma-logo.svg",
            58_000,
            3_200_000,
            "Figma, Inc.",
            "https://github.com/figma.png",
            &["Windows", "macOS", "Linux", "Web"],
        ),
        app(
            "3",
            "Signal",
            "Privacy-focused messaging app with end-to-end encryption.",
            "https://upload.wikimedia.org/wikipedia/commons/8/8d/Signal-Logo.svg",
            75_000,
            7_500_000,
            "Signal Foundation",
            "https://github.com/signalapp.png",
            &["Android", "iOS", "Windows", "macOS", "Linux"],
        ),
        app(
            "4",
            "Obsidian",
            "Powerful knowledge base that works on top of local Markdown files.",
            "https://obsidian.md/images/obsidian-logo-gradient.svg",
            42_000,
            1_800_000,
            "Obsidian",
            "https://github.com/obsidianmd.png",
            &["Windows", "macOS", "Linux", "iOS", "Android"],
        ),
        app(
            "5",
            "Insomnia",
            "The API Design Platform. Design, debug, and test APIs like a human, not a robot.",
            "https://insomnia.rest/images/insomnia-logo.svg",
            27_000,
            950_000,
            "Kong",
            "https://github.com/kong.png",
            &["Windows", "macOS", "Linux"],
        ),
        app(
            "6",
            "Discord",
            "Chat, hang out, and stay close with your friends and communities.",
            "https://assets-global.website-files.com/6257adef93867e50d84d30e2/636e0a6cc3c481a15a141738_icon_clyde_white_RGB.png",
            68_000,
            12_500_000,
            "Discord Inc.",
            "https://github.com/discord.png",
            &["Windows", "macOS", "Linux", "iOS", "Android", "Web"],
        ),
        app(
            "7",
            "Audacity",
            "Free, open source, cross-platform audio software for multi-track recording and editing.",
            "https://upload.wikimedia.org/wikipedia/commons/e/e2/Audacity_Logo_nofilter.svg",
            32_000,
            4_200_000,
            "Audacity Team",
            "https://github.com/audacity.png",
            &["Windows", "macOS", "Linux"],
        ),
        app(
            "8",
            "OBS Studio",
            "Free and open source software for video recording and live streaming.",
            "https://upload.wikimedia.org/wikipedia/commons/7/78/OBS.svg",
            44_000,
            8_900_000,
            "OBS Project",
            "https://github.com/obsproject.png",
            &["Windows", "macOS", "Linux"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FilterState;

    #[test]
    fn sample_catalog_validates() {
        let catalog = SampleCatalog.load_catalog().expect("sample data is valid");
        assert_eq!(catalog.records().len(), 8);
    }

    #[test]
    fn sample_platforms_are_all_offered_as_toggles() {
        let catalog = SampleCatalog.load_catalog().expect("sample data is valid");
        let offered: std::collections::BTreeSet<String> =
            PLATFORM_OPTIONS.iter().map(|p| p.to_string()).collect();
        assert!(catalog.known_platforms().is_subset(&offered));
    }

    #[test]
    fn default_view_leads_with_most_starred() {
        let catalog = SampleCatalog.load_catalog().expect("sample data is valid");
        let view = catalog.derived_view(&FilterState::default());
        assert_eq!(view[0].name, "VSCode");
        assert_eq!(view[1].name, "Signal");
    }
}
