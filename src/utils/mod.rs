//! Shared utilities.
//!
//! - [`date`]: `DateTimeUtc` for front-matter dates
//! - [`path`]: path normalization and slugs

pub mod date;
pub mod path;

pub use date::DateTimeUtc;
pub use path::{normalize_path, slugify_path};

/// Return "s" suffix for plural counts
///
/// `plural_s(1)` -> `""`, `plural_s(0)` / `plural_s(5)` -> `"s"`
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
