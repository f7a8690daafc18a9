//! Collection loader.
//!
//! ```text
//! base dir ──jwalk──▶ matching files ──rayon──▶ load_entry() ──▶ Collection
//!                                                    │
//!                                                    └── failures ──▶ CollectionReport
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use jwalk::WalkDir;
use rayon::prelude::*;

use super::frontmatter;
use super::schema::ImageLocation;
use super::{BlogPost, Collection, CollectionReport, ContentError, Entry};
use crate::config::{CollectionConfig, SiteConfig};
use crate::utils::slugify_path;
use crate::{debug, utils::plural_s};

/// Load one configured collection.
///
/// Fails only when the collection is unknown or its directory is missing.
pub fn load_collection(
    name: &'static str,
    config: &SiteConfig,
) -> Result<(Collection, CollectionReport)> {
    let collection = config
        .collections
        .get(name)
        .ok_or_else(|| anyhow!("unknown collection `{name}`"))?;

    if !collection.base.is_dir() {
        return Err(ContentError::MissingDir {
            name,
            dir: collection.base.clone(),
        }
        .into());
    }

    let files = scan_files(collection);
    debug!("loader"; "{name}: found {} file{}", files.len(), plural_s(files.len()));

    let results: Vec<_> = files
        .par_iter()
        .map(|path| load_entry(path, &collection.base, &config.site.public))
        .collect();

    let mut report = CollectionReport::default();
    let mut entries = Vec::with_capacity(files.len());
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    // Sequential pass keeps duplicate detection deterministic (sorted paths)
    for (path, result) in files.iter().zip(results) {
        let source = config.root_relative(path).display().to_string();
        match result {
            Ok((entry, warnings)) => {
                for warning in warnings {
                    report.add_warning(source.clone(), warning);
                }
                if let Some(first) = seen.get(&entry.id) {
                    let err = ContentError::DuplicateId {
                        id: entry.id,
                        first: config.root_relative(first).display().to_string(),
                    };
                    report.add_error(source, err.to_string());
                    continue;
                }
                seen.insert(entry.id.clone(), entry.path.clone());
                entries.push(entry);
            }
            Err(err) => report.add_error(source, err.to_string()),
        }
    }

    Ok((
        Collection::new(name, collection.route.clone(), entries),
        report,
    ))
}

/// Collect matching files under the collection base, sorted by path.
///
/// Hidden files and directories are skipped.
fn scan_files(collection: &CollectionConfig) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(&collection.base)
        .skip_hidden(true)
        .sort(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("loader"; "skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| collection.matches(path))
        .collect();

    files.sort();
    files
}

/// Read, split, and validate one document.
fn load_entry(
    path: &Path,
    base: &Path,
    public_dir: &Path,
) -> Result<(Entry, Vec<String>), ContentError> {
    let source =
        std::fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;

    let fm = frontmatter::split(&source)?.ok_or(ContentError::MissingFrontmatter)?;
    let validated = BlogPost::from_frontmatter(fm.parse()?)?;

    if let Some(image) = &validated.post.hero_image {
        let doc_dir = path.parent().unwrap_or(base);
        if let ImageLocation::Local(image_path) = image.locate(doc_dir, public_dir)
            && !image_path.is_file()
        {
            return Err(ContentError::MissingImage {
                src: image.src.clone(),
                path: image_path,
            });
        }
    }

    let rel = path.strip_prefix(base).unwrap_or(path);
    let id = slugify_path(rel);
    if id.is_empty() {
        return Err(ContentError::EmptyId(rel.display().to_string()));
    }

    let entry = Entry {
        id,
        path: path.to_path_buf(),
        data: validated.post,
        body: fm.body.to_string(),
    };
    Ok((entry, validated.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::fs;

    const POST: &str = "---\ntitle: Hello\npubDate: 2024-01-15\ndescription: First\ntags: [rust]\n---\n\n# Hello\n";

    fn site() -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/content/blog")).unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        let config = test_config("", dir.path());
        (dir, config)
    }

    fn write(dir: &tempfile::TempDir, rel: &str, content: &str) {
        let path = dir.path().join("src/content/blog").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_valid_entries() {
        let (dir, config) = site();
        write(&dir, "Hello World.md", POST);
        write(
            &dir,
            "2024/second.md",
            "---\ntitle: Second\npubDate: 2024-02-01\ndescription: d\n---\nbody",
        );

        let (collection, report) = load_collection("blog", &config).unwrap();
        assert!(report.is_empty(), "{report:?}");
        assert_eq!(collection.len(), 2);

        let ids: Vec<_> = collection.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2024/second", "hello-world"]);

        let hello = collection.get("hello-world").unwrap();
        assert_eq!(hello.data.title, "Hello");
        assert_eq!(hello.body, "# Hello\n");
    }

    #[test]
    fn test_yaml_timestamps_order_in_utc() {
        let (dir, config) = site();
        write(
            &dir,
            "late.md",
            "---\ntitle: Late\npubDate: 2024-06-15 14:30:00 +02:00\ndescription: d\n---\n",
        );
        write(
            &dir,
            "later.md",
            "---\ntitle: Later\npubDate: 2024-06-15T13:00:00.250Z\ndescription: d\n---\n",
        );

        let (collection, report) = load_collection("blog", &config).unwrap();
        assert!(report.is_empty(), "{report:?}");
        let ids: Vec<_> = collection.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["later", "late"]);
        let late = collection.get("late").unwrap();
        assert_eq!(late.data.pub_date.to_string(), "2024-06-15T12:30:00Z");
    }

    #[test]
    fn test_only_configured_extensions_and_visible_files() {
        let (dir, config) = site();
        write(&dir, "post.md", POST);
        write(&dir, "notes.txt", POST);
        write(&dir, ".hidden.md", POST);
        write(&dir, ".drafts/secret.md", POST);

        let (collection, _) = load_collection("blog", &config).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.get("post").is_some());
    }

    #[test]
    fn test_invalid_entries_are_reported() {
        let (dir, config) = site();
        write(&dir, "good.md", POST);
        write(&dir, "no-fm.md", "# No front-matter");
        write(
            &dir,
            "missing.md",
            "---\ntitle: x\npubDate: 2024-01-01\n---\n",
        );
        write(
            &dir,
            "bad-date.md",
            "---\ntitle: x\npubDate: someday\ndescription: d\n---\n",
        );

        let (collection, report) = load_collection("blog", &config).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(report.error_count(), 3);

        let missing = report
            .errors
            .iter()
            .find(|(k, _)| k.ends_with("missing.md"))
            .map(|(_, v)| v[0].clone())
            .unwrap();
        assert!(missing.contains("missing field `description`"));
    }

    #[test]
    fn test_schema_drift_is_warning() {
        let (dir, config) = site();
        write(
            &dir,
            "legacy.md",
            "---\ntitle: x\npubDate: 2024-01-01\ndescription: d\nimage:\n  src: /a.png\n  alt: A\n---\n",
        );

        let (collection, report) = load_collection("blog", &config).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 1);
        let warning = report.warnings.values().next().unwrap()[0].clone();
        assert!(warning.contains("schema drift"));
    }

    #[test]
    fn test_hero_image_must_exist() {
        let (dir, config) = site();
        fs::write(dir.path().join("public/cover.png"), b"png").unwrap();
        write(&dir, "local.png", "png");
        write(
            &dir,
            "public-ok.md",
            "---\ntitle: a\npubDate: 2024-01-01\ndescription: d\nheroImage: /cover.png\n---\n",
        );
        write(
            &dir,
            "local-ok.md",
            "---\ntitle: b\npubDate: 2024-01-01\ndescription: d\nheroImage:\n  src: ./local.png\n  alt: L\n---\n",
        );
        write(
            &dir,
            "external-ok.md",
            "---\ntitle: c\npubDate: 2024-01-01\ndescription: d\nheroImage: https://cdn.example.com/x.png\n---\n",
        );
        write(
            &dir,
            "broken.md",
            "---\ntitle: d\npubDate: 2024-01-01\ndescription: d\nheroImage: ./nope.png\n---\n",
        );

        let (collection, report) = load_collection("blog", &config).unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(report.error_count(), 1);
        let (source, errors) = report.errors.iter().next().unwrap();
        assert!(source.ends_with("broken.md"));
        assert!(errors[0].contains("hero image not found"));
    }

    #[test]
    fn test_duplicate_ids() {
        let (dir, config) = site();
        write(&dir, "Hello World.md", POST);
        write(&dir, "hello-world.md", POST);

        let (collection, report) = load_collection("blog", &config).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(report.error_count(), 1);
        let (source, errors) = report.errors.iter().next().unwrap();
        assert!(source.ends_with("hello-world.md"));
        assert!(errors[0].contains("duplicate id `hello-world`"));
    }

    #[test]
    fn test_missing_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config("", dir.path());
        let err = load_collection("blog", &config).unwrap_err();
        assert!(err.to_string().contains("directory not found"));
    }

    #[test]
    fn test_unknown_collection() {
        let (_dir, config) = site();
        assert!(load_collection("docs", &config).is_err());
    }
}
