//! Page shell around the resource table.
//!
//! ```text
//! <html>
//! ├── <head>   title, meta description, favicon, inline stylesheet
//! └── <body>
//!     ├── navbar
//!     ├── <main>  "Resources" heading + tagline + table
//!     ├── footer  Copyright © <year> <title>.
//!     ├── info modal (hidden)
//!     └── client script
//! ```

use std::fmt::Write;

use chrono::Datelike;

use super::{modal::render_modal, navbar::render_navbar, navbar::site_path, table::render_table};
use crate::{
    config::SiteConfig,
    table::{Location, ResourceTable},
    utils::html::escape,
};

const STYLESHEET: &str = include_str!("../embed/style.css");
const CLIENT_SCRIPT: &str = include_str!("../embed/client.js");

/// Heading above the table.
pub const HEADING: &str = "Resources";

/// Render the full document for the table's current state.
pub fn render_page<L: Location>(config: &SiteConfig, table: &ResourceTable<L>) -> String {
    render_page_for_year(config, table, chrono::Local::now().year())
}

/// Like `render_page` with a fixed footer year.
pub fn render_page_for_year<L: Location>(
    config: &SiteConfig,
    table: &ResourceTable<L>,
    year: i32,
) -> String {
    let base = &config.base;
    let mut html = String::with_capacity(16 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8">"#,
        escape(&base.language)
    );
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    let _ = write!(html, "<title>{}</title>", escape(&base.title));
    let description = if base.description.is_empty() {
        &base.title
    } else {
        &base.description
    };
    let _ = write!(
        html,
        r#"<meta name="description" content="{}">"#,
        escape(description)
    );
    if let Some(favicon) = &base.favicon {
        let _ = write!(html, r#"<link rel="icon" href="{}">"#, escape(&site_path(favicon)));
    }
    if let Some(canonical) = config.absolute_url("/") {
        let _ = write!(html, r#"<link rel="canonical" href="{}">"#, escape(&canonical));
    }
    let _ = write!(html, "<style>{STYLESHEET}</style></head><body>");

    html.push_str(&render_navbar(config));

    html.push_str(r#"<main class="page"><header class="page-header">"#);
    let _ = write!(html, r#"<h1 class="page-title">{HEADING}</h1>"#);
    if !base.tagline.is_empty() {
        let _ = write!(html, r#"<p class="page-tagline">{}</p>"#, escape(&base.tagline));
    }
    html.push_str("</header>");
    html.push_str(r#"<div class="table-wrapper">"#);
    html.push_str(&render_table(table));
    html.push_str("</div></main>");

    let _ = write!(
        html,
        r#"<footer class="footer">{}</footer>"#,
        escape(&base.copyright_line(year))
    );

    html.push_str(&render_modal(config));
    let _ = write!(html, "<script>{CLIENT_SCRIPT}</script></body></html>");
    html
}
