//! Path and slug utilities.
//!
//! Pure functions for path manipulation. No side effects beyond
//! `canonicalize()` in [`normalize_path`].

use std::path::{Component, Path, PathBuf};

use deunicode::deunicode;

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Slugify one path segment.
///
/// Transliterates to ASCII, lowercases, and collapses every run of
/// non-alphanumeric characters into a single `-`.
///
/// ```ignore
/// slugify("Hello World!")  -> "hello-world"
/// slugify("Café Crème")    -> "cafe-creme"
/// slugify("  --  ")        -> ""
/// ```
pub fn slugify(segment: &str) -> String {
    let ascii = deunicode(segment);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slugify a relative file path into an entry id.
///
/// The extension is dropped, every segment is slugified, and a trailing
/// `index` segment maps to its parent.
///
/// ```ignore
/// slugify_path("2024/Hello World.md") -> "2024/hello-world"
/// slugify_path("guides/index.md")     -> "guides"
/// slugify_path("index.md")            -> "index"
/// ```
pub fn slugify_path(rel: &Path) -> String {
    let stem_path = rel.with_extension("");
    let mut segments: Vec<String> = stem_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(slugify(&s.to_string_lossy())),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    segments.join("/")
}
