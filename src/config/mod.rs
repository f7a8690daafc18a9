//! Site configuration management for `postbase.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── collection # [collections.*]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

pub use util::extract_url_path;
use util::find_config_file;

pub use section::{BLOG, CollectionConfig, CollectionsConfig, SiteSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    address::PathResolver,
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the current directory.
pub const CONFIG_FILE: &str = "postbase.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing postbase.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub collections: CollectionsConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. When the default
    /// `postbase.toml` is absent, defaults rooted at cwd are used.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, root) = match Self::locate(&cli.config, &cwd)? {
            Some(path) => {
                let config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                (
                    Self {
                        config_path: path,
                        ..config
                    },
                    root,
                )
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                (Self::default(), cwd)
            }
        };
        if !config.config_path.as_os_str().is_empty() {
            debug!("config"; "loaded {}", config.config_path.display());
        }

        config.apply_cli(cli);
        config.finalize(&root);
        config.validate(&cli.command)?;
        Ok(config)
    }

    /// Find the config file for `config_name`.
    ///
    /// Only the implicit default name may be absent. A path given with
    /// `-C` that cannot be found is an error.
    fn locate(config_name: &Path, cwd: &Path) -> Result<Option<PathBuf>> {
        let found = find_config_file(config_name, cwd);
        let explicit = config_name.is_absolute() || config_name != Path::new(CONFIG_FILE);
        if found.is_none() && explicit {
            return Err(ConfigError::Io(
                config_name.to_path_buf(),
                io::Error::new(io::ErrorKind::NotFound, "config file not found"),
            )
            .into());
        }
        Ok(found)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// CLI flags override config values.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.site_url {
            self.site.url = Some(url.clone());
        }
        if let Some(base) = &cli.base {
            self.site.base = Some(base.clone());
        }
    }

    /// Normalize all paths relative to root directory.
    fn finalize(&mut self, root: &Path) {
        let root = crate::utils::normalize_path(root);
        self.site.public = crate::utils::normalize_path(&root.join(&self.site.public));
        self.collections.normalize(&root);
        self.root = root;
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Path resolver built from the effective base prefix.
    ///
    /// The single place where the base prefix enters link generation.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.site.base_prefix())
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, command: &Commands) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.collections.validate(&mut diag);

        // Only commands that read content need the directories
        if command.reads_content() {
            self.site.validate_dirs(&mut diag);
            self.collections.validate_dirs(&mut diag);
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests),
/// and finalize it against `root`.
#[cfg(test)]
pub fn test_config(content: &str, root: &Path) -> SiteConfig {
    let (mut parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.finalize(root);
    parsed
}

// ============================================================================
// tests
// ============================================================================
