//! HTML and XML minification, gated by `[build].minify`.

use crate::config::SiteConfig;
use std::{borrow::Cow, sync::LazyLock};

/// Content to minify, tagged by markup language.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
    Xml(&'a [u8]),
}

/// Settings for the rendered page: inline `<style>` and `<script>` are
/// minified too, closing tags stay for predictable markup.
static HTML_CFG: LazyLock<minify_html::Cfg> = LazyLock::new(|| {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg
});

/// Minify `content`, or borrow it unchanged when minification is off.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match (config.build.minify, content) {
        (false, MinifyType::Html(bytes) | MinifyType::Xml(bytes)) => Cow::Borrowed(bytes),
        (true, MinifyType::Html(html)) => Cow::Owned(minify_html::minify(html, &HTML_CFG)),
        (true, MinifyType::Xml(xml)) => Cow::Owned(collapse_xml_lines(xml)),
    }
}

/// Trim every line and drop the line breaks. Text content stays as is.
fn collapse_xml_lines(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .collect::<String>()
        .into_bytes()
}
