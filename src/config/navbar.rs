//! `[navbar]` and `[info]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[navbar]` section in sportsdex.toml.
///
/// # Example
/// ```toml
/// [navbar]
/// title = "Sports Analytics"
/// logo = "img/logo.png"
///
/// [[navbar.links]]
/// label = "Join the discord!"
/// href = "https://discord.gg/example"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct NavbarConfig {
    /// Brand text next to the logo.
    #[serde(default = "defaults::navbar::title")]
    #[educe(Default = defaults::navbar::title())]
    pub title: String,

    /// Logo image path, relative to the site root.
    #[serde(default = "defaults::navbar::logo")]
    #[educe(Default = defaults::navbar::logo())]
    pub logo: Option<String>,

    #[serde(default = "defaults::navbar::logo_alt")]
    #[educe(Default = defaults::navbar::logo_alt())]
    pub logo_alt: String,

    /// Text of the link that opens the info modal.
    #[serde(default = "defaults::navbar::info_label")]
    #[educe(Default = defaults::navbar::info_label())]
    pub info_label: String,

    /// Outbound links on the right side.
    #[serde(default)]
    pub links: Vec<NavLink>,
}

/// One outbound navbar link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// `[info]` section: content of the "What is this?" modal.
///
/// # Example
/// ```toml
/// [info]
/// discord = "https://discord.gg/example"
/// github = "https://github.com/example/sports-analytics"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct InfoConfig {
    /// Render the modal and its navbar link.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Modal heading.
    #[serde(default = "defaults::info::title")]
    #[educe(Default = defaults::info::title())]
    pub title: String,

    /// Community invite link.
    #[serde(default = "defaults::info::link")]
    #[educe(Default = defaults::info::link())]
    pub discord: Option<String>,

    /// Source repository link.
    #[serde(default = "defaults::info::link")]
    #[educe(Default = defaults::info::link())]
    pub github: Option<String>,
}
