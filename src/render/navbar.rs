//! Site navbar: brand, info link and outbound links.

use std::fmt::Write;

use crate::{config::SiteConfig, utils::html::escape};

/// Class the client script listens for to open the info modal.
pub const INFO_LINK_CLASS: &str = "header-info-link";

pub fn render_navbar(config: &SiteConfig) -> String {
    let navbar = &config.navbar;
    let mut html = String::with_capacity(512);

    html.push_str(r#"<nav class="navbar"><div class="navbar-inner">"#);
    html.push_str(r#"<a class="navbar-brand" href="/">"#);
    if let Some(logo) = &navbar.logo {
        let _ = write!(
            html,
            r#"<img class="navbar-logo" src="{}" alt="{}">"#,
            escape(&site_path(logo)),
            escape(&navbar.logo_alt)
        );
    }
    let _ = write!(html, r#"<b class="navbar-title">{}</b></a>"#, escape(&navbar.title));

    html.push_str(r#"<div class="navbar-items">"#);
    if config.info.enable {
        let _ = write!(
            html,
            r##"<a class="navbar-link {INFO_LINK_CLASS}" href="#info" data-info-link>{}</a>"##,
            escape(&navbar.info_label)
        );
    }
    for link in &navbar.links {
        let _ = write!(
            html,
            r#"<a class="navbar-link" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape(&link.href),
            escape(&link.label)
        );
    }
    html.push_str("</div></div></nav>");
    html
}

/// Root-relative form of a configured asset path.
pub(super) fn site_path(path: &str) -> String {
    if path.contains("://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
