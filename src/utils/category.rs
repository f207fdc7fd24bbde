//! Classify watched paths by what a change to them invalidates.
//!
//! | Category | Path                     | Reaction                         |
//! |----------|--------------------------|----------------------------------|
//! | Data     | `[build].data`           | reload store, rebuild page       |
//! | Config   | `sportsdex.toml`         | reload config, rebuild page      |
//! | Asset    | under `[build].assets`   | copy the file                    |
//! | Unknown  | anything else            | ignored                          |

use crate::config::SiteConfig;
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Data,
    Config,
    Asset,
    Unknown,
}

pub fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    let path = normalize_path(path);

    if path == config.config_path {
        FileCategory::Config
    } else if path == config.build.data {
        FileCategory::Data
    } else if path.starts_with(&config.build.assets) {
        FileCategory::Asset
    } else {
        FileCategory::Unknown
    }
}

/// Absolute form of `path`, canonical when it exists.
///
/// Config paths are canonicalized on load; watcher events must match them.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> SiteConfig {
        let root = dir.canonicalize().unwrap();
        let mut config = SiteConfig::default();
        config.config_path = root.join("sportsdex.toml");
        config.build.data = root.join("data/resources.json");
        config.build.assets = root.join("static");
        config
    }

    #[test]
    fn test_categorize_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static/img")).unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("static/img/logo.png"), b"png").unwrap();
        let config = config_in(dir.path());

        assert_eq!(
            categorize_path(&dir.path().join("sportsdex.toml"), &config),
            FileCategory::Config
        );
        assert_eq!(
            categorize_path(&dir.path().join("data/resources.json"), &config),
            FileCategory::Data
        );
        assert_eq!(
            categorize_path(&dir.path().join("static/img/logo.png"), &config),
            FileCategory::Asset
        );
        assert_eq!(
            categorize_path(&dir.path().join("data/notes.txt"), &config),
            FileCategory::Unknown
        );
    }

    #[test]
    fn test_normalize_relative_path() {
        let normalized = normalize_path(Path::new("does-not-exist.json"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("does-not-exist.json"));
    }
}
