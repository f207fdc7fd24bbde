//! Resource data for the directory table.
//!
//! The collection is loaded once from a JSON array and never mutated while a
//! table is mounted on it. In serve mode the loaded store sits behind an
//! atomic handle so the watcher can swap in a fresh one when the file changes.
//!
//! # Data File
//!
//! ```json
//! [
//!   {
//!     "name": "Basketball Analytics",
//!     "category": "Sports",
//!     "sport": "Basketball",
//!     "url": "https://example.com/basketball",
//!     "description": "Shot charts and lineup data"
//!   }
//! ]
//! ```

mod error;
mod store;
mod types;

pub use error::DataError;
pub use store::{ResourceStore, init_resources, reload_resources, resources};
pub use types::Resource;

#[cfg(test)]
pub(crate) use store::acquire_test_lock;
