//! Path resolution against the base URL prefix.
//!
//! ```text
//! BasePrefix ("/site")
//!     │
//!     └── PathResolver
//!             ├── resolve("/about/")            → /site/about
//!             ├── entry_url("/blog", "hello")   → /site/blog/hello
//!             └── asset_url("/img/a.png")       → /site/img/a.png
//! ```
//!
//! Resolution is applied exactly once. [`ResolvedUrl`] is an output-only
//! type: feeding its string back into [`PathResolver::resolve`] prefixes
//! twice.

use std::fmt;

use serde::Serialize;

use super::BasePrefix;

/// A path that already carries the base prefix. Safe to emit into HTML.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedUrl(String);

impl ResolvedUrl {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prefixes site-relative paths with the configured base.
///
/// Pure: the prefix is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    base: BasePrefix,
}

impl PathResolver {
    #[inline]
    pub const fn new(base: BasePrefix) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &BasePrefix {
        &self.base
    }

    /// Resolve a site-relative path (expected to start with `/`).
    ///
    /// - root base: input returned unchanged
    /// - otherwise: `prefix + path` with trailing slashes stripped
    ///
    /// Input is not validated; `""` resolves to the bare prefix.
    pub fn resolve(&self, path: &str) -> ResolvedUrl {
        if self.base.is_root() {
            return ResolvedUrl(path.to_string());
        }

        let joined = format!("{}{}", self.base.as_str(), path);
        ResolvedUrl(joined.trim_end_matches('/').to_string())
    }

    /// Public URL of a collection entry, without a trailing slash.
    ///
    /// `route` is the collection mount point (e.g. `/blog`). The shape is
    /// the same under every base: `/blog/x` at the root, `/site/blog/x`
    /// under `/site`.
    pub fn entry_url(&self, route: &str, id: &str) -> ResolvedUrl {
        let route = route.trim_end_matches('/');
        self.resolve(&format!("{route}/{id}"))
    }

    /// Resolve an asset reference from front-matter.
    ///
    /// Only absolute site paths are prefixed; external URLs and relative
    /// paths (colocated with the document) are returned as-is.
    pub fn asset_url(&self, src: &str) -> ResolvedUrl {
        if src.starts_with('/') && !src.starts_with("//") {
            self.resolve(src)
        } else {
            ResolvedUrl(src.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(base: Option<&str>) -> PathResolver {
        PathResolver::new(BasePrefix::new(base))
    }

    #[test]
    fn test_root_base_returns_input() {
        assert_eq!(resolver(Some("/")).resolve("/about").as_str(), "/about");
    }

    #[test]
    fn test_unset_base_returns_input() {
        assert_eq!(resolver(None).resolve("/about").as_str(), "/about");
    }

    #[test]
    fn test_root_base_keeps_trailing_slash() {
        assert_eq!(resolver(None).resolve("/about/").as_str(), "/about/");
    }

    #[test]
    fn test_prefix_is_prepended() {
        assert_eq!(
            resolver(Some("/site")).resolve("/about").as_str(),
            "/site/about"
        );
    }

    #[test]
    fn test_trailing_slash_removed() {
        assert_eq!(
            resolver(Some("/site")).resolve("/about/").as_str(),
            "/site/about"
        );
        assert_eq!(
            resolver(Some("/site")).resolve("/about///").as_str(),
            "/site/about"
        );
    }

    #[test]
    fn test_root_path_with_prefix() {
        assert_eq!(resolver(Some("/site")).resolve("/").as_str(), "/site");
    }

    #[test]
    fn test_prefix_trailing_slash_normalized() {
        // "/site/" behaves exactly like "/site"
        assert_eq!(
            resolver(Some("/site/")).resolve("/about").as_str(),
            "/site/about"
        );
        assert_eq!(resolver(Some("/site/")).resolve("/").as_str(), "/site");
    }

    #[test]
    fn test_malformed_input_does_not_panic() {
        let r = resolver(Some("/site"));
        assert_eq!(r.resolve("").as_str(), "/site");
        assert_eq!(r.resolve("about").as_str(), "/siteabout");
        assert_eq!(resolver(None).resolve("").as_str(), "");
    }

    #[test]
    fn test_resolve_is_applied_once() {
        let r = resolver(Some("/site"));
        let once = r.resolve("/about");
        let twice = r.resolve(once.as_str());
        assert_eq!(twice.as_str(), "/site/site/about");
        assert_ne!(once, twice);
    }

    #[test]
    fn test_entry_url() {
        assert_eq!(
            resolver(Some("/site")).entry_url("/blog", "hello-world").as_str(),
            "/site/blog/hello-world"
        );
        assert_eq!(
            resolver(None).entry_url("/blog/", "2024/intro").as_str(),
            "/blog/2024/intro"
        );
    }

    #[test]
    fn test_entry_url_shape_independent_of_base() {
        for base in [None, Some("/"), Some("/site")] {
            let url = resolver(base).entry_url("/blog", "first");
            assert!(url.as_str().ends_with("/blog/first"), "{url}");
        }
    }

    #[test]
    fn test_asset_url() {
        let r = resolver(Some("/site"));
        assert_eq!(r.asset_url("/images/a.png").as_str(), "/site/images/a.png");
        assert_eq!(r.asset_url("./cover.jpg").as_str(), "./cover.jpg");
        assert_eq!(
            r.asset_url("https://cdn.example.com/a.png").as_str(),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            r.asset_url("//cdn.example.com/a.png").as_str(),
            "//cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_resolved_url_serializes_as_string() {
        let url = resolver(Some("/site")).resolve("/x");
        assert_eq!(serde_json::to_string(&url).unwrap(), "\"/site/x\"");
    }
}
