//! Site addressing: base prefix and link resolution.
//!
//! - [`base`]: [`BasePrefix`], the normalized sub-path the site is served from
//! - [`resolve`]: [`PathResolver`], turns site-relative paths into public URLs

mod base;
mod resolve;

pub use base::BasePrefix;
pub use resolve::PathResolver;
