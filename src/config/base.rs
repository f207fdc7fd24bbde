//! `[base]` section configuration.
//!
//! Contains basic site information like title, tagline, description, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in sportsdex.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Sports Analytics Resources"
/// description = "Sports Analytics Resources"
/// url = "https://sports-analytics.example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in the browser tab and footer.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// One-line summary shown under the page heading.
    #[serde(default = "defaults::base::tagline")]
    #[educe(Default = defaults::base::tagline())]
    pub tagline: String,

    /// Site description for SEO meta tags.
    #[serde(default)]
    pub description: String,

    /// Public URL of the site, e.g. "https://example.com".
    /// Required for sitemap generation.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "en", "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Footer copyright notice. Empty means `Copyright © <year> <title>.`
    #[serde(default)]
    pub copyright: String,

    /// Favicon path, relative to the site root.
    #[serde(default)]
    pub favicon: Option<String>,
}

impl BaseConfig {
    /// Footer line for the given year.
    pub fn copyright_line(&self, year: i32) -> String {
        if self.copyright.is_empty() {
            format!("Copyright © {year} {}.", self.title)
        } else {
            self.copyright.clone()
        }
    }
}
