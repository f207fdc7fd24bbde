//! Site scaffolding for `sportsdex init`.
//!
//! ```text
//! <root>/
//! ├── sportsdex.toml
//! ├── data/resources.json   (sample records)
//! ├── static/
//! └── .gitignore
//! ```

use crate::{
    config::{NavLink, SiteConfig},
    data::{Resource, ResourceStore},
    log,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Sample records: (name, sport, description).
const SAMPLE_RESOURCES: &[(&str, &str, &str)] = &[
    ("Basketball Analytics", "Basketball", "Shot charts and lineup efficiency"),
    ("Football Metrics", "Football", "Play-by-play expected points models"),
    ("Baseball Stats", "Baseball", "Pitch tracking and batted ball data"),
    ("Soccer Analysis", "Soccer", "Expected goals and passing networks"),
    ("Tennis Tracker", "Tennis", "Point-level serve and return statistics"),
    ("Hockey Data", "Hockey", "Shot location and possession metrics"),
    ("Golf Performance", "Golf", "Strokes gained breakdowns"),
    ("Swimming Records", "Swimming", "Historical race times by event"),
    ("Track & Field", "Athletics", "Results and split times"),
    ("Volleyball Stats", "Volleyball", "Rotation and serve receive analysis"),
];

const SAMPLE_CATEGORY: &str = "Sports";

/// Create a new site at the configured root.
///
/// Without an explicit name the target directory must be empty.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `sportsdex init <SITE_NAME>` to create in a subdirectory."
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_default_config(config)?;
    init_sample_data(&config.build.data)?;
    fs::create_dir_all(&config.build.assets)
        .with_context(|| format!("Failed to create {}", config.build.assets.display()))?;
    init_ignored_files(root, &config.build.output)?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write `sportsdex.toml` with the defaults plus a sample navbar link.
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let mut template = SiteConfig::default();
    template.navbar.links.push(NavLink {
        label: "Join the discord!".into(),
        href: "https://discord.gg/example".into(),
    });

    let content = toml::to_string_pretty(&template)?;
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))?;
    Ok(())
}

fn init_sample_data(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let resources = SAMPLE_RESOURCES
        .iter()
        .map(|&(name, sport, description)| Resource {
            name: name.into(),
            category: SAMPLE_CATEGORY.into(),
            sport: sport.into(),
            url: format!("https://example.com/{}", slug(name)),
            description: description.into(),
        })
        .collect();
    let json = ResourceStore::new(resources).to_json()?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Lowercase ASCII words joined by `-`.
fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Ignore the build output in `.gitignore`.
fn init_ignored_files(root: &Path, output: &Path) -> Result<()> {
    let path = root.join(".gitignore");
    if path.exists() {
        return Ok(());
    }
    let output = output.strip_prefix(root).unwrap_or(output);
    fs::write(&path, format!("/{}/\n", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ResourceTable;
    use tempfile::TempDir;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.config_path = root.join("sportsdex.toml");
        config.build.data = root.join("data/resources.json");
        config.build.assets = root.join("static");
        config.build.output = root.join("build");
        config
    }

    #[test]
    fn test_new_site_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("hoops");
        let config = config_at(&root);

        new_site(&config, true).unwrap();

        assert!(root.join("static").is_dir());
        assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "/build/\n");

        let written = SiteConfig::from_path(&root.join("sportsdex.toml")).unwrap();
        assert_eq!(written.base.title, "Sports Analytics Resources");
        assert_eq!(written.navbar.links[0].label, "Join the discord!");
    }

    #[test]
    fn test_sample_data_loads() {
        let dir = TempDir::new().unwrap();
        let config = config_at(dir.path());
        new_site(&config, false).unwrap();

        let json = fs::read_to_string(&config.build.data).unwrap();
        let store = ResourceStore::from_json(&json).unwrap();
        assert_eq!(store.len(), 10);
        assert_eq!(store.categories(), ["Sports"]);
        assert_eq!(store.resources()[8].url, "https://example.com/track-field");

        let mut table = ResourceTable::detached(store);
        table.set_name_filter("basket");
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_rejects_non_empty_directory_without_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let config = config_at(dir.path());

        let err = new_site(&config, false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Track & Field"), "track-field");
        assert_eq!(slug("Basketball Analytics"), "basketball-analytics");
    }
}
