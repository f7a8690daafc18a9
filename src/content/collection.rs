//! Loaded collections and their entries.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use super::{BlogPost, CollectionReport, load_collection};
use crate::config::{BLOG, SiteConfig};

/// One loaded document.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Slug derived from the path inside the collection base.
    pub id: String,
    /// Absolute source path.
    pub path: PathBuf,
    pub data: BlogPost,
    /// Markdown after the front-matter, unparsed.
    pub body: String,
}

impl Entry {
    #[inline]
    pub fn is_draft(&self) -> bool {
        self.data.is_draft
    }
}

/// A named, schema-validated set of entries.
///
/// Entries are ordered newest first, ties broken by id.
#[derive(Debug, Clone)]
pub struct Collection {
    name: &'static str,
    route: String,
    entries: Vec<Entry>,
}

impl Collection {
    pub(super) fn new(name: &'static str, route: String, mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| {
            b.data
                .pub_date
                .cmp(&a.data.pub_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Self {
            name,
            route,
            entries,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// URL mount point of the entries.
    #[inline]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// All entries, drafts included.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries that are not drafts.
    pub fn published(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.is_draft())
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Tag usage counts, ordered by tag.
    pub fn tags(&self) -> BTreeMap<&str, usize> {
        let mut tags = BTreeMap::new();
        for tag in self.entries.iter().flat_map(|e| &e.data.tags) {
            *tags.entry(tag.as_str()).or_insert(0) += 1;
        }
        tags
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(move |e| e.data.tags.iter().any(|t| t == tag))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn draft_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_draft()).count()
    }
}

/// Registry of all configured collections, looked up by name.
#[derive(Debug, Clone)]
pub struct Collections {
    blog: Collection,
}

impl Collections {
    /// Load every configured collection.
    ///
    /// Per-entry problems land in the report; only a missing collection
    /// directory is fatal.
    pub fn load(config: &SiteConfig) -> Result<(Self, CollectionReport)> {
        let (blog, report) = load_collection(BLOG, config)?;
        Ok((Self { blog }, report))
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.iter().find(|c| c.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        std::iter::once(&self.blog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DateTimeUtc;

    fn entry(id: &str, date: &str, tags: &[&str], draft: bool) -> Entry {
        Entry {
            id: id.into(),
            path: PathBuf::from(format!("/blog/{id}.md")),
            data: BlogPost {
                title: id.to_uppercase(),
                pub_date: DateTimeUtc::parse(date).unwrap(),
                description: String::new(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                hero_image: None,
                is_draft: draft,
            },
            body: String::new(),
        }
    }

    fn sample() -> Collection {
        Collection::new(
            BLOG,
            "/blog".into(),
            vec![
                entry("old", "2023-01-01", &["rust"], false),
                entry("new", "2024-06-01", &["rust", "web"], false),
                entry("draft", "2024-07-01", &["web"], true),
                entry("also-new", "2024-06-01", &[], false),
            ],
        )
    }

    #[test]
    fn test_sorted_newest_first() {
        let ids: Vec<_> = sample().entries().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["draft", "also-new", "new", "old"]);
    }

    #[test]
    fn test_published_skips_drafts() {
        let collection = sample();
        assert_eq!(collection.published().count(), 3);
        assert_eq!(collection.draft_count(), 1);
        assert_eq!(collection.len(), 4);
    }

    #[test]
    fn test_get_and_tags() {
        let collection = sample();
        assert_eq!(collection.get("new").map(|e| e.data.title.as_str()), Some("NEW"));
        assert!(collection.get("missing").is_none());

        let tags = collection.tags();
        assert_eq!(tags.get("rust"), Some(&2));
        assert_eq!(tags.get("web"), Some(&2));
        assert_eq!(collection.with_tag("rust").count(), 2);
        assert_eq!(collection.with_tag("none").count(), 0);
    }

    #[test]
    fn test_registry_lookup() {
        let collections = Collections { blog: sample() };
        assert_eq!(collections.get("blog").map(Collection::name), Some("blog"));
        assert!(collections.get("docs").is_none());
    }
}
