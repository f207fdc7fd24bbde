//! "What is this?" modal.
//!
//! Rendered hidden; the client script toggles the `hidden` attribute.

use std::fmt::Write;

use crate::{config::SiteConfig, utils::html::escape};

const OUTBOUND: &str = r#"target="_blank" rel="noopener noreferrer""#;

const SECTIONS: [(&str, &str); 5] = [
    ("R Packages", "Statistical computing tools for sports analytics"),
    ("Python Libraries", "Data analysis and machine learning tools"),
    ("Websites", "Online resources, APIs, and data sources"),
    ("Tools", "Visualization and analysis platforms"),
    ("And much more!", ""),
];

/// Modal markup, or an empty string when `[info].enable` is off.
pub fn render_modal(config: &SiteConfig) -> String {
    let info = &config.info;
    if !info.enable {
        return String::new();
    }

    let mut html = String::with_capacity(2048);
    html.push_str(r#"<div class="modal-backdrop" data-info-modal hidden>"#);
    html.push_str(
        r#"<div class="modal-content" role="dialog" aria-modal="true" aria-labelledby="info-modal-title">"#,
    );
    html.push_str(
        r#"<button type="button" class="modal-close" data-modal-close aria-label="Close modal">×</button>"#,
    );
    let _ = write!(html, r#"<h2 id="info-modal-title">{}</h2>"#, escape(&info.title));

    html.push_str(r#"<div class="modal-body">"#);
    let _ = write!(
        html,
        "<p><strong>{}</strong> is a curated collection of tools, apps, websites and more for sports data analysis, visualization, and insights.</p>",
        escape(&config.base.title)
    );
    html.push_str("<p>This site provides a comprehensive directory of:</p><ul>");
    for (label, detail) in SECTIONS {
        if detail.is_empty() {
            let _ = write!(html, "<li><strong>{label}</strong></li>");
        } else {
            let _ = write!(html, "<li><strong>{label}</strong> - {detail}</li>");
        }
    }
    html.push_str("</ul>");
    html.push_str(
        "<p>Use the filters to find resources by sport (e.g., Basketball, Football, Soccer) or category. Click on any resource link to visit its website.</p>",
    );

    let community = match (&info.discord, &info.github) {
        (Some(discord), Some(github)) => Some(format!(
            r#"Join our <a href="{}" {OUTBOUND}>Discord community</a> or contribute on <a href="{}" {OUTBOUND}>GitHub</a>!"#,
            escape(discord),
            escape(github)
        )),
        (Some(discord), None) => Some(format!(
            r#"Join our <a href="{}" {OUTBOUND}>Discord community</a>!"#,
            escape(discord)
        )),
        (None, Some(github)) => Some(format!(
            r#"Contribute on <a href="{}" {OUTBOUND}>GitHub</a>!"#,
            escape(github)
        )),
        (None, None) => None,
    };
    if let Some(community) = community {
        let _ = write!(html, "<p>{community}</p>");
    }

    html.push_str("</div></div></div>");
    html
}
