//! Site configuration management for `sportsdex.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site metadata (title, tagline, url, copyright)   |
//! | `[build]`   | Data file, output and assets paths, minify       |
//! | `[navbar]`  | Brand, logo and outbound links                   |
//! | `[info]`    | "What is this?" modal content                    |
//! | `[serve]`   | Development server (port, interface, watch)      |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Sports Analytics Resources"
//! url = "https://sports-analytics.example.com"
//!
//! [build]
//! data = "data/resources.json"
//! output = "build"
//!
//! [[navbar.links]]
//! label = "Join the discord!"
//! href = "https://discord.gg/example"
//!
//! [serve]
//! port = 3000
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod handle;
mod navbar;
mod serve;

pub use handle::{cfg, init_config, reload_config};
pub use navbar::NavLink;

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use navbar::{InfoConfig, NavbarConfig};
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing sportsdex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Navigation bar
    #[serde(default)]
    pub navbar: NavbarConfig,

    /// Info modal
    #[serde(default)]
    pub info: InfoConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Address the dev server actually bound (set by `serve`)
    #[serde(skip)]
    pub bound_addr: Option<SocketAddr>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, apply CLI overrides and validate for the current command.
    ///
    /// `init` starts from defaults because the config does not exist yet.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = match (cli.is_init(), config_path.exists()) {
            (false, true) => Self::from_path(&config_path)?,
            (false, false) => bail!(
                "Config file `{}` not found. Run `sportsdex init` first.",
                config_path.display()
            ),
            (true, _) => Self::default(),
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Public URL of `path` on the site, when `[base].url` is set.
    pub fn absolute_url(&self, path: &str) -> Option<String> {
        let base = self.base.url.as_deref()?.trim_end_matches('/');
        Some(format!("{base}/{}", path.trim_start_matches('/')))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base_root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base_root.join(name),
            _ => base_root,
        };

        Self::update_option(&mut self.build.data, cli.data.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.sitemap, args.sitemap.as_ref());
            if args.base_url.is_some() {
                self.base.url = args.base_url.clone();
            }
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }
    }

    /// Record the address the dev server bound.
    ///
    /// The site URL follows it unless `--base-url` was given, so links point
    /// at the port in use even after a fallback.
    pub fn bind_to(&mut self, addr: SocketAddr) {
        self.bound_addr = Some(addr);

        let explicit = self
            .cli
            .and_then(Cli::build_args)
            .is_some_and(|args| args.base_url.is_some());
        if !explicit {
            self.base.url = Some(format!("http://{addr}"));
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path against `root` and make it absolute
    fn update_path_with_root(&mut self, root: &Path, config_file: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_file));
        self.build.data = Self::normalize_path(&root.join(&self.build.data));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.serve.port == 0 {
            bail!(ConfigError::Validation("[serve.port] must not be 0".into()));
        }

        let is_init = self.cli.is_some_and(Cli::is_init);
        if is_init {
            if self.config_path.exists() {
                bail!(
                    "Config file `{}` already exists. Remove it manually or init in a different path.",
                    self.config_path.display()
                );
            }
            return Ok(());
        }

        if !self.build.data.is_file() {
            bail!(ConfigError::Validation(format!(
                "[build.data] `{}` not found",
                self.build.data.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    fn site_with_data() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/resources.json"), "[]").unwrap();
        fs::write(dir.path().join("sportsdex.toml"), "[base]\ntitle = \"Hoops\"\n").unwrap();
        dir
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str("[base]\ntitle = \"Hoops\"").unwrap();
        assert_eq!(config.base.title, "Hoops");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let err = SiteConfig::from_str("[base\ntitle = \"x\"").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/sportsdex.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(..))
        ));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.get_root(), Path::new("./"));
        assert!(config.build.minify);
        assert_eq!(config.serve.port, 3000);
        assert!(config.info.enable);
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str("[deploy]\nprovider = \"github\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_absolute_url() {
        let mut config = SiteConfig::default();
        assert_eq!(config.absolute_url("/"), None);

        config.base.url = Some("https://example.com/".into());
        assert_eq!(config.absolute_url("/").as_deref(), Some("https://example.com/"));
        assert_eq!(
            config.absolute_url("resources.json").as_deref(),
            Some("https://example.com/resources.json")
        );
    }

    #[test]
    fn test_update_with_cli_resolves_paths() {
        let dir = site_with_data();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&["sportsdex", "-r", root, "-o", "dist", "build", "--minify", "false"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.config_path, root.join("sportsdex.toml"));
        assert_eq!(config.build.data, root.join("data/resources.json"));
        assert_eq!(config.build.output, root.join("dist"));
        assert!(!config.build.minify);
    }

    #[test]
    fn test_update_with_cli_serve_keeps_url_until_bound() {
        let cli = leak_cli(&["sportsdex", "serve", "-p", "8080"]);
        let mut config = SiteConfig::default();
        config.base.url = Some("https://hoops.dev".into());
        config.update_with_cli(cli);

        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.base.url.as_deref(), Some("https://hoops.dev"));
        assert_eq!(config.bound_addr, None);
    }

    #[test]
    fn test_bind_to_uses_bound_port() {
        let cli = leak_cli(&["sportsdex", "serve", "-p", "8080"]);
        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        // 8080 was taken, the server fell back to 8081
        let addr: SocketAddr = "127.0.0.1:8081".parse().unwrap();
        config.bind_to(addr);

        assert_eq!(config.bound_addr, Some(addr));
        assert_eq!(config.base.url.as_deref(), Some("http://127.0.0.1:8081"));
    }

    #[test]
    fn test_bind_to_keeps_explicit_base_url() {
        let cli = leak_cli(&["sportsdex", "serve", "--base-url", "https://x.dev"]);
        let mut config = SiteConfig::default();
        config.update_with_cli(cli);
        config.bind_to("127.0.0.1:5277".parse().unwrap());

        assert_eq!(config.base.url.as_deref(), Some("https://x.dev"));
        assert!(config.bound_addr.is_some());
    }

    #[test]
    fn test_load_build() {
        let dir = site_with_data();
        let cli = leak_cli(&["sportsdex", "-r", dir.path().to_str().unwrap(), "build"]);

        let config = SiteConfig::load(cli).unwrap();
        assert_eq!(config.base.title, "Hoops");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let cli = leak_cli(&["sportsdex", "-r", dir.path().to_str().unwrap(), "build"]);

        let err = SiteConfig::load(cli).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_missing_data_file() {
        let dir = site_with_data();
        fs::remove_file(dir.path().join("data/resources.json")).unwrap();
        let cli = leak_cli(&["sportsdex", "-r", dir.path().to_str().unwrap(), "build"]);

        let err = SiteConfig::load(cli).unwrap_err();
        assert!(err.to_string().contains("[build.data]"));
    }

    #[test]
    fn test_load_init_rejects_existing_site() {
        let dir = site_with_data();
        let cli = leak_cli(&["sportsdex", "-r", dir.path().to_str().unwrap(), "init"]);

        let err = SiteConfig::load(cli).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_load_init_new_directory() {
        let dir = TempDir::new().unwrap();
        let cli = leak_cli(&["sportsdex", "-r", dir.path().to_str().unwrap(), "init", "hoops"]);

        let config = SiteConfig::load(cli).unwrap();
        assert!(config.get_root().ends_with("hoops"));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = SiteConfig::default();
        config.base.url = Some("example.com".into());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[base.url]"));
    }
}
