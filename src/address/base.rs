//! Base URL prefix for sub-path deployments.

use std::fmt;

/// Normalized base URL prefix.
///
/// Invariants:
/// - `None` means the site is served from the root
/// - `Some(p)`: `p` starts with `/` and never ends with `/`
///
/// `"site"`, `"/site"` and `"/site/"` all normalize to `/site`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BasePrefix(Option<String>);

impl BasePrefix {
    /// Root prefix (no prefixing at all).
    pub const fn root() -> Self {
        Self(None)
    }

    /// Build from a raw configured value.
    ///
    /// `None`, `""` and slash-only values are the root.
    pub fn new(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::root();
        };

        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::root();
        }

        if trimmed.starts_with('/') {
            Self(Some(trimmed.to_string()))
        } else {
            Self(Some(format!("/{trimmed}")))
        }
    }

    /// Derive prefix from the path component of a site URL.
    ///
    /// ```ignore
    /// from_site_url("https://user.github.io/fedaipaca.com/") -> /fedaipaca.com
    /// from_site_url("https://example.com")                   -> root
    /// from_site_url("not a url")                             -> None
    /// ```
    pub fn from_site_url(url: &str) -> Option<Self> {
        let path = crate::config::extract_url_path(url)?;
        Some(Self::new(Some(&path)))
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }

    /// Prefix string, `/` for root.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("/")
    }
}

impl fmt::Display for BasePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BasePrefix {
    fn from(s: &str) -> Self {
        Self::new(Some(s))
    }
}
