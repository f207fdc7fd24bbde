//! Data loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the resource data file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Data file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Resource #{index} (`{name}`) has invalid url `{url}`, expected an absolute http(s) URL")]
    InvalidUrl {
        index: usize,
        name: String,
        url: String,
    },
}
