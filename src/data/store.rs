//! Resource collection and its derived option lists.
//!
//! # Global Handle
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │               RESOURCES (ArcSwap<ResourceStore>)         │
//! │                                                          │
//! │   serve request ──► resources() ──► ResourceTable::mount │
//! │   watcher       ──► reload_resources() (atomic replace)  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A mounted table holds its own `ResourceStore` clone, so a reload never
//! changes the rows under a table that is already rendering.

use std::{
    collections::BTreeSet,
    fs,
    path::Path,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

use arc_swap::ArcSwap;

use super::{DataError, Resource};
use crate::utils::hash;

// ============================================================================
// Store
// ============================================================================

/// Sorted distinct values offered by the category and sport selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedOptions {
    pub categories: Vec<String>,
    pub sports: Vec<String>,
}

impl DerivedOptions {
    fn from_resources(resources: &[Resource]) -> Self {
        let distinct = |field: fn(&Resource) -> &str| -> Vec<String> {
            resources
                .iter()
                .map(field)
                .filter(|value| !value.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_owned)
                .collect()
        };

        Self {
            categories: distinct(|r| &r.category),
            sports: distinct(|r| &r.sport),
        }
    }
}

/// Immutable, ordered resource collection.
///
/// Cloning is cheap: both the rows and the derived options are shared.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    resources: Arc<[Resource]>,
    options: Arc<DerivedOptions>,
}

impl ResourceStore {
    /// Build a store, computing the option lists once.
    pub fn new(resources: Vec<Resource>) -> Self {
        let options = DerivedOptions::from_resources(&resources);
        Self {
            resources: resources.into(),
            options: Arc::new(options),
        }
    }

    /// Parse a JSON array of resources, rejecting non-absolute URLs.
    pub fn from_json(content: &str) -> Result<Self, DataError> {
        let resources: Vec<Resource> = serde_json::from_str(content)?;

        if let Some((index, bad)) = resources
            .iter()
            .enumerate()
            .find(|(_, r)| !r.has_absolute_url())
        {
            return Err(DataError::InvalidUrl {
                index,
                name: bad.name.clone(),
                url: bad.url.clone(),
            });
        }

        Ok(Self::new(resources))
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn categories(&self) -> &[String] {
        &self.options.categories
    }

    pub fn sports(&self) -> &[String] {
        &self.options.sports
    }

    /// Pretty JSON of the collection, written next to the built page.
    pub fn to_json(&self) -> Result<String, DataError> {
        Ok(serde_json::to_string_pretty(&*self.resources)?)
    }
}

// ============================================================================
// Global Handle
// ============================================================================

static RESOURCES: LazyLock<ArcSwap<ResourceStore>> =
    LazyLock::new(|| ArcSwap::from_pointee(ResourceStore::default()));

/// Hash of the last loaded data file content.
static RESOURCES_HASH: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Test Synchronization
// ============================================================================

/// Test-only mutex serializing tests that install a global store.
///
/// `init_resources` and `reload_resources` replace process-wide state, so
/// parallel tests touching it must not interleave.
#[cfg(test)]
static STORE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn acquire_test_lock() -> std::sync::MutexGuard<'static, ()> {
    STORE_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Currently loaded store.
#[inline]
pub fn resources() -> Arc<ResourceStore> {
    RESOURCES.load_full()
}

/// Load the data file and install it as the current store.
pub fn init_resources(path: &Path) -> Result<Arc<ResourceStore>, DataError> {
    let content =
        fs::read_to_string(path).map_err(|err| DataError::Io(path.to_path_buf(), err))?;
    let store = Arc::new(ResourceStore::from_json(&content)?);

    RESOURCES.store(Arc::clone(&store));
    RESOURCES_HASH.store(hash::compute(content.as_bytes()), Ordering::Relaxed);

    Ok(store)
}

/// Reload the data file if its content changed.
///
/// Returns `true` when a new store was installed. A file that fails to parse
/// leaves the current store in place.
pub fn reload_resources(path: &Path) -> Result<bool, DataError> {
    let content =
        fs::read_to_string(path).map_err(|err| DataError::Io(path.to_path_buf(), err))?;
    let new_hash = hash::compute(content.as_bytes());

    if new_hash == RESOURCES_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let store = ResourceStore::from_json(&content)?;
    RESOURCES.store(Arc::new(store));
    RESOURCES_HASH.store(new_hash, Ordering::Relaxed);

    Ok(true)
}

// ============================================================================
// Tests
// ============================================================================
