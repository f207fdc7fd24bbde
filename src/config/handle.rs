//! Global config handle with hot reload.
//!
//! ```text
//!   request threads ──► cfg() ──┐
//!                               ├──► ArcSwap<SiteConfig>
//!   watcher thread ──► reload_config() (atomic replace)
//! ```
//!
//! Readers keep the `Arc` they loaded; a reload only affects later calls.

use super::SiteConfig;
use crate::utils::hash;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::{
    fs,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

/// Current configuration, replaced wholesale on reload.
static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content behind `CONFIG`.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

/// Current config. Lock-free.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Install the config loaded at startup.
pub fn init_config(config: SiteConfig) {
    if let Ok(content) = fs::read_to_string(&config.config_path) {
        CONFIG_HASH.store(hash::compute(content.as_bytes()), Ordering::Relaxed);
    }
    CONFIG.store(Arc::new(config));
}

/// Re-read `sportsdex.toml` and swap it in.
///
/// Returns `false` when the file content is unchanged. On a parse or
/// validation error the previous config stays active.
pub fn reload_config() -> Result<bool> {
    let current = cfg();
    let cli = current
        .cli
        .context("config was installed without CLI arguments")?;

    let content = fs::read_to_string(&current.config_path)
        .with_context(|| format!("failed to read {}", current.config_path.display()))?;
    let new_hash = hash::compute(content.as_bytes());
    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let mut config = SiteConfig::from_str(&content)?;
    config.update_with_cli(cli);
    if let Some(addr) = current.bound_addr {
        config.bind_to(addr);
    }
    config.validate()?;

    CONFIG.store(Arc::new(config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);
    Ok(true)
}
