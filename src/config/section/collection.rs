//! `[collections]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [collections.blog]
//! base = "src/content/blog"
//! extensions = ["md"]
//! route = "/blog"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Identifier of the blog collection.
pub const BLOG: &str = "blog";

/// All configured content collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub blog: CollectionConfig,
}

impl CollectionsConfig {
    /// Iterate `(name, config)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CollectionConfig)> {
        std::iter::once((BLOG, &self.blog))
    }

    pub fn get(&self, name: &str) -> Option<&CollectionConfig> {
        self.iter().find(|(n, _)| *n == name).map(|(_, c)| c)
    }

    pub fn normalize(&mut self, root: &Path) {
        self.blog.normalize(root);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.blog.validate(BlogFields::FIELDS, diag);
    }

    /// Check that every collection directory exists.
    pub fn validate_dirs(&self, diag: &mut ConfigDiagnostics) {
        self.blog.validate_dir(BlogFields::FIELDS, diag);
    }
}

/// Field paths of one `[collections.<name>]` table.
#[derive(Clone, Copy)]
pub struct CollectionFields {
    pub base: FieldPath,
    pub extensions: FieldPath,
    pub route: FieldPath,
}

struct BlogFields;

impl BlogFields {
    const FIELDS: CollectionFields = CollectionFields {
        base: FieldPath::new("collections.blog.base"),
        extensions: FieldPath::new("collections.blog.extensions"),
        route: FieldPath::new("collections.blog.route"),
    };
}

/// Loader settings for one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Directory holding the entries (relative to project root).
    pub base: PathBuf,

    /// File extensions loaded as entries, without the dot.
    pub extensions: Vec<String>,

    /// URL mount point of the entries (e.g. "/blog").
    pub route: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            base: "src/content/blog".into(),
            extensions: vec!["md".into()],
            route: "/blog".into(),
        }
    }
}

impl CollectionConfig {
    fn normalize(&mut self, root: &Path) {
        self.base = crate::utils::normalize_path(&root.join(&self.base));
        for ext in &mut self.extensions {
            *ext = ext.trim_start_matches('.').to_ascii_lowercase();
        }
    }

    /// Whether `path` has one of the configured extensions.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    fn validate(&self, fields: CollectionFields, diag: &mut ConfigDiagnostics) {
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            diag.error_with_hint(
                fields.extensions,
                "no file extensions configured",
                "use extensions = [\"md\"]",
            );
        }

        if !self.route.starts_with('/') {
            diag.error_with_hint(
                fields.route,
                format!("route '{}' must start with `/`", self.route),
                format!("use \"/{}\"", self.route.trim_start_matches('/')),
            );
        }
    }

    fn validate_dir(&self, fields: CollectionFields, diag: &mut ConfigDiagnostics) {
        if !self.base.is_dir() {
            diag.error_with_hint(
                fields.base,
                format!("directory not found: {}", self.base.display()),
                format!("create it or point {} at your posts", fields.base),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CollectionsConfig::default();
        assert_eq!(config.blog.base, PathBuf::from("src/content/blog"));
        assert_eq!(config.blog.extensions, vec!["md"]);
        assert_eq!(config.blog.route, "/blog");
        assert!(config.get(BLOG).is_some());
        assert!(config.get("docs").is_none());
    }

    #[test]
    fn test_matches_extension() {
        let config = CollectionConfig::default();
        assert!(config.matches(Path::new("a/post.md")));
        assert!(config.matches(Path::new("a/POST.MD")));
        assert!(!config.matches(Path::new("a/post.mdx")));
        assert!(!config.matches(Path::new("a/README")));
    }

    #[test]
    fn test_normalize_strips_dots() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CollectionConfig {
            extensions: vec![".MD".into(), "markdown".into()],
            ..Default::default()
        };
        config.normalize(dir.path());
        assert_eq!(config.extensions, vec!["md", "markdown"]);
        assert!(config.base.is_absolute());
    }

    #[test]
    fn test_validate_route_and_extensions() {
        let config = CollectionsConfig {
            blog: CollectionConfig {
                extensions: vec![],
                route: "blog".into(),
                ..Default::default()
            },
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
    }

    #[test]
    fn test_validate_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = CollectionsConfig {
            blog: CollectionConfig {
                base: dir.path().join("missing"),
                ..Default::default()
            },
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate_dirs(&mut diag);
        assert!(diag.has_errors());
        assert!(diag.errors()[0].hint.is_some());
    }
}
