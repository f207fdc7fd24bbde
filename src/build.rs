//! Static site build.
//!
//! ```text
//! build_site()
//!     │
//!     ├── init_resources()  ──► load + validate data file
//!     ├── prepare_output()  ──► create / clean output dir
//!     │
//!     ├── rayon::join
//!     │     ├── write_page()    ──► index.html + resources.json
//!     │     └── copy_assets()   ──► [build].assets/** (parallel)
//!     │
//!     └── build_sitemap()   ──► sitemap.xml
//! ```
//!
//! There is no browser context at build time, so `index.html` holds the
//! default state: every row, unsorted. Filtered and sorted variants are
//! rendered per request by `serve`.

use crate::{
    config::SiteConfig,
    data::{ResourceStore, init_resources, resources},
    generator::sitemap::build_sitemap,
    log,
    logger::ProgressBars,
    render::render_page,
    table::ResourceTable,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

/// Rendered page file name.
pub const INDEX_FILE: &str = "index.html";
/// Machine-readable copy of the loaded data.
pub const DATA_FILE: &str = "resources.json";

/// Files never copied from the assets directory.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Build the whole site into `[build].output`.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let store = init_resources(&config.build.data)
        .with_context(|| format!("Failed to load {}", config.build.data.display()))?;
    if store.is_empty() {
        log!("warn"; "{} has no resources, the table will be empty", config.build.data.display());
    } else {
        log!("data"; "loaded {} resources", store.len());
    }

    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let asset_files = collect_all_files(&config.build.assets);
    let progress = ProgressBars::new_filtered(&[("assets", asset_files.len())]);

    let (page_result, assets_result) = rayon::join(
        || write_page(config, &store),
        || {
            copy_assets(&asset_files, config, || {
                if let Some(progress) = &progress {
                    progress.inc(0);
                }
            })
        },
    );
    if let Some(progress) = progress {
        progress.finish();
    }

    page_result?;
    assets_result?;
    build_sitemap(config)?;

    log!("build"; "done: {} rows, {} assets", store.len(), asset_files.len());
    Ok(())
}

/// Re-render `index.html` and `resources.json` from the current store.
pub fn rebuild_page(config: &SiteConfig) -> Result<()> {
    write_page(config, &resources())
}

/// Render the default-state page and the data snapshot.
fn write_page(config: &SiteConfig, store: &ResourceStore) -> Result<()> {
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let table = ResourceTable::detached(store.clone());
    let html = render_page(config, &table);
    let html = minify(MinifyType::Html(html.as_bytes()), config);
    let index = output.join(INDEX_FILE);
    fs::write(&index, &*html).with_context(|| format!("Failed to write {}", index.display()))?;

    let json = store.to_json()?;
    let data = output.join(DATA_FILE);
    fs::write(&data, json).with_context(|| format!("Failed to write {}", data.display()))?;

    Ok(())
}

/// Create the output directory, removing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

// ============================================================================
// Assets
// ============================================================================

/// Regular files under `dir`, skipping OS metadata files.
///
/// A missing directory yields nothing.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn copy_assets(files: &[PathBuf], config: &SiteConfig, on_done: impl Fn() + Sync) -> Result<()> {
    let has_error = AtomicBool::new(false);

    files.par_iter().try_for_each(|path| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = copy_asset(path, config, false) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", path.display(), e);
            }
            return Err(anyhow!("Build failed"));
        }
        on_done();
        Ok(())
    })
}

/// Copy one asset to the same relative path under the output directory.
pub fn copy_asset(path: &Path, config: &SiteConfig, log_file: bool) -> Result<()> {
    let relative = path.strip_prefix(&config.build.assets).with_context(|| {
        format!(
            "{} is outside {}",
            path.display(),
            config.build.assets.display()
        )
    })?;
    let dest = config.build.output.join(relative);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest).with_context(|| format!("Failed to copy {}", path.display()))?;

    if log_file {
        log!("assets"; "{}", relative.display());
    }
    Ok(())
}
