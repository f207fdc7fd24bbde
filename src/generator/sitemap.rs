//! Sitemap generation.
//!
//! The site is a single page, so the sitemap lists the root URL with the
//! data file's modification date as `lastmod`.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::{fmt::Write, fs, path::Path};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Output file name inside `[build].output`.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Write `sitemap.xml` when enabled and `[base].url` is set.
///
/// Returns whether a sitemap was written.
pub fn build_sitemap(config: &SiteConfig) -> Result<bool> {
    if !config.build.sitemap {
        return Ok(false);
    }
    let Some(loc) = config.absolute_url("/") else {
        log!("warn"; "sitemap skipped: [base.url] is not set");
        return Ok(false);
    };

    let entry = UrlEntry {
        loc,
        lastmod: lastmod_of(&config.build.data),
    };
    let xml = Sitemap { urls: vec![entry] }.into_xml();
    let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

    let path = config.build.output.join(SITEMAP_FILE);
    fs::write(&path, &*xml)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    log!("sitemap"; "{SITEMAP_FILE}");
    Ok(true)
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    /// `YYYY-MM-DD`
    lastmod: Option<String>,
}

impl Sitemap {
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 128);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(xml, r#"<urlset xmlns="{SITEMAP_NS}">"#);
        for entry in self.urls {
            xml.push_str("  <url>\n");
            let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
            if let Some(lastmod) = entry.lastmod {
                let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
            }
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

fn lastmod_of(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).format("%Y-%m-%d").to_string())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
