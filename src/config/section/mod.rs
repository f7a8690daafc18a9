//! Configuration section definitions.
//!
//! Each module corresponds to a section in `postbase.toml`:
//!
//! | Module       | TOML Section        | Purpose                          |
//! |--------------|---------------------|----------------------------------|
//! | `site`       | `[site]`            | Site URL, base prefix, public dir|
//! | `collection` | `[collections.*]`   | Content collection loaders       |

mod collection;
mod site;

pub use collection::{BLOG, CollectionConfig, CollectionsConfig};
pub use site::SiteSectionConfig;
