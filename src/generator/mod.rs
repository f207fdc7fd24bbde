//! Auxiliary output files generated next to the page.

pub mod sitemap;
