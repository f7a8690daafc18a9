//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://user.github.io/fedaipaca.com"
//! base = "/fedaipaca.com"
//! public = "public"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::address::BasePrefix;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Field paths of `[site]`, for diagnostics.
pub struct SiteFields {
    pub url: FieldPath,
    pub base: FieldPath,
    pub public: FieldPath,
}

/// Site-wide addressing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public site URL. Its path is the base prefix unless `base` is set.
    pub url: Option<String>,

    /// Base URL prefix for sub-path deployments (e.g. "/fedaipaca.com").
    pub base: Option<String>,

    /// Static asset directory, served at `/`.
    pub public: PathBuf,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            base: None,
            public: "public".into(),
        }
    }
}

impl SiteSectionConfig {
    pub const FIELDS: SiteFields = SiteFields {
        url: FieldPath::new("site.url"),
        base: FieldPath::new("site.base"),
        public: FieldPath::new("site.public"),
    };

    /// Effective base prefix: `base` wins over the path of `url`.
    pub fn base_prefix(&self) -> BasePrefix {
        if let Some(base) = &self.base {
            return BasePrefix::new(Some(base));
        }
        self.url
            .as_deref()
            .and_then(BasePrefix::from_site_url)
            .unwrap_or_default()
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be an http(s) URL with a host
    /// - `base` must be a path, not a URL
    /// - `base` differing from the path of `url` is a warning
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        if let Some(base) = &self.base {
            if base.contains("://") {
                diag.error_with_hint(
                    Self::FIELDS.base,
                    format!("expected a path, found URL '{base}'"),
                    format!("put the full URL in {} instead", Self::FIELDS.url),
                );
            } else if let Some(from_url) = self.url.as_deref().and_then(BasePrefix::from_site_url)
                && from_url != BasePrefix::new(Some(base))
            {
                diag.warn(
                    Self::FIELDS.base,
                    format!(
                        "'{}' overrides the path of site.url ('{}')",
                        BasePrefix::new(Some(base)),
                        from_url
                    ),
                );
            }
        }
    }

    /// Check the public directory that absolute `heroImage` paths point into.
    ///
    /// Missing is only a warning: a blog without site-wide images needs none.
    pub fn validate_dirs(&self, diag: &mut ConfigDiagnostics) {
        if !self.public.is_dir() {
            diag.warn(
                Self::FIELDS.public,
                format!(
                    "directory not found: {}, absolute heroImage paths cannot resolve",
                    self.public.display()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(url: Option<&str>, base: Option<&str>) -> SiteSectionConfig {
        SiteSectionConfig {
            url: url.map(Into::into),
            base: base.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_prefix_precedence() {
        assert!(site(None, None).base_prefix().is_root());
        assert_eq!(
            site(Some("https://x.github.io/blog/"), None)
                .base_prefix()
                .as_str(),
            "/blog"
        );
        assert_eq!(
            site(Some("https://x.github.io/blog/"), Some("/other"))
                .base_prefix()
                .as_str(),
            "/other"
        );
        assert!(site(Some("https://x.github.io/blog/"), Some("/"))
            .base_prefix()
            .is_root());
    }

    #[test]
    fn test_invalid_url_is_error() {
        let mut diag = ConfigDiagnostics::new();
        site(Some("not a url"), None).validate(&mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        site(Some("ftp://example.com"), None).validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_base_must_be_path() {
        let mut diag = ConfigDiagnostics::new();
        site(None, Some("https://example.com/blog")).validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_base_mismatch_warns() {
        let mut diag = ConfigDiagnostics::new();
        site(Some("https://example.com/a"), Some("/b")).validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);

        let mut diag = ConfigDiagnostics::new();
        site(Some("https://example.com/a/"), Some("a")).validate(&mut diag);
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_missing_public_dir_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = site(None, None);
        config.public = dir.path().join("public");

        let mut diag = ConfigDiagnostics::new();
        config.validate_dirs(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].field, SiteSectionConfig::FIELDS.public);

        std::fs::create_dir(&config.public).unwrap();
        let mut diag = ConfigDiagnostics::new();
        config.validate_dirs(&mut diag);
        assert!(diag.warnings().is_empty());
    }
}
