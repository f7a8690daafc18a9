//! Content collections.
//!
//! # Module Structure
//!
//! - [`frontmatter`]: split `---`/`+++` blocks and parse them to JSON
//! - [`schema`]: the `blog` schema ([`BlogPost`], [`schema::ImageRef`])
//! - [`loader`]: walk a collection directory and load its entries
//! - [`collection`]: [`Collection`], [`Entry`] and the [`Collections`] registry
//! - [`report`]: per-file errors and warnings
//!
//! # Usage
//!
//! ```ignore
//! let (collections, report) = Collections::load(&config)?;
//! report.print();
//!
//! let blog = collections.get("blog").unwrap();
//! for entry in blog.published() {
//!     let url = config.resolver().entry_url(blog.route(), &entry.id);
//! }
//! ```

mod collection;
mod error;
pub mod frontmatter;
mod loader;
mod report;
pub mod schema;

pub use collection::{Collection, Collections, Entry};
pub use error::ContentError;
pub use frontmatter::JsonMap;
pub use loader::load_collection;
pub use report::CollectionReport;
pub use schema::BlogPost;
