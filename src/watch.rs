//! File system watcher for `serve`.
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► handle_changes()
//!                                            ├── config → reload_config()
//!                                            ├── data   → reload_resources()
//!                                            ├── assets → copy_asset()
//!                                            └── rebuild index.html
//! ```
//!
//! The server renders every request from `cfg()` and `resources()`, so a
//! successful reload is visible on the next page load. A data file or
//! config that fails to parse keeps the previous version active.

use crate::{
    build::{copy_asset, rebuild_page},
    config::{SiteConfig, cfg, reload_config},
    data::reload_resources,
    log,
    logger::WatchStatus,
    utils::category::{FileCategory, categorize_path},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Editor swap and backup files.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches bursts of events; ignores events right after a rebuild.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        self.pending
            .extend(event.paths.into_iter().filter(|p| !is_temp_file(p)));
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Changed paths grouped by category.
#[derive(Debug, Default)]
struct Changes {
    config: bool,
    data: bool,
    assets: Vec<PathBuf>,
}

impl Changes {
    fn collect(paths: &[PathBuf], config: &SiteConfig) -> Self {
        let mut changes = Self::default();
        for path in paths {
            match categorize_path(path, config) {
                FileCategory::Config => changes.config = true,
                FileCategory::Data => changes.data = true,
                FileCategory::Asset => changes.assets.push(path.clone()),
                FileCategory::Unknown => {}
            }
        }
        changes
    }
}

/// Apply a batch of changes. Returns true when the page was rebuilt.
fn handle_changes(paths: &[PathBuf], status: &mut WatchStatus) -> bool {
    let config = cfg();
    let root = config.get_root().to_path_buf();
    let changes = Changes::collect(paths, &config);

    let mut page_dirty = false;

    if changes.config {
        match reload_config() {
            Ok(true) => {
                status.success("config reloaded");
                page_dirty = true;
            }
            Ok(false) => status.unchanged(&rel_path(&config.config_path, &root)),
            Err(e) => status.error("config reload failed, keeping previous", &format!("{e:#}")),
        }
    }

    // A reloaded config may point at a different data file.
    let config = cfg();
    if changes.data || page_dirty {
        let data = &config.build.data;
        match reload_resources(data) {
            Ok(true) => {
                status.success(&format!("reloaded {}", rel_path(data, &root)));
                page_dirty = true;
            }
            Ok(false) if changes.data => status.unchanged(&rel_path(data, &root)),
            Ok(false) => {}
            Err(e) => status.error(
                &format!("{} rejected, keeping previous data", rel_path(data, &root)),
                &format!("{e:#}"),
            ),
        }
    }

    for path in changes.assets.iter().filter(|p| p.is_file()) {
        match copy_asset(path, &config, false) {
            Ok(()) => status.success(&format!("copied {}", rel_path(path, &root))),
            Err(e) => status.error(&format!("copy failed: {}", rel_path(path, &root)), &format!("{e:#}")),
        }
    }

    if !page_dirty {
        return false;
    }
    match rebuild_page(&config) {
        Ok(()) => true,
        Err(e) => {
            status.error("page rebuild failed", &format!("{e:#}"));
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Directories to watch with their recursion mode.
///
/// Files are watched through their parent directory so editors that save by
/// rename still produce events.
fn watch_targets(config: &SiteConfig) -> Vec<(PathBuf, RecursiveMode)> {
    let mut seen = FxHashSet::default();
    let mut targets = Vec::new();

    let parents = [&config.config_path, &config.build.data]
        .into_iter()
        .filter_map(|file| file.parent().map(Path::to_path_buf));
    for dir in parents {
        if dir.is_dir() && seen.insert(dir.clone()) {
            targets.push((dir, RecursiveMode::NonRecursive));
        }
    }
    if config.build.assets.is_dir() && seen.insert(config.build.assets.clone()) {
        targets.push((config.build.assets.clone(), RecursiveMode::Recursive));
    }
    targets
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    for (path, mode) in watch_targets(config) {
        watcher
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
    }

    log!(
        "watch";
        "{}, {}, {}/",
        rel_path(&config.config_path, root),
        rel_path(&config.build.data, root),
        rel_path(&config.build.assets, root)
    );
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Watch config, data and assets until the event channel closes.
pub fn watch_for_changes_blocking() -> Result<()> {
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &cfg())?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut status) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
