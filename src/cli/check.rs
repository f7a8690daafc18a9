//! `check` command: load every collection and report front-matter problems.

use anyhow::{Result, bail};

use crate::cli::CheckArgs;
use crate::config::SiteConfig;
use crate::content::{CollectionReport, Collections};
use crate::log;
use crate::utils::plural_s;

/// Validate all collections against their schema.
///
/// Fails when any entry was rejected, unless `--warn-only` is set.
pub fn check_site(args: &CheckArgs, config: &SiteConfig) -> Result<()> {
    let report = run_check(config)?;
    report.print();

    if !report.is_empty() {
        eprintln!();
    }
    log!("check"; "{}", report);

    if report.has_errors() && !args.warn_only {
        let n = report.error_count();
        bail!("check failed: {} invalid entr{}", n, if n == 1 { "y" } else { "ies" });
    }
    Ok(())
}

/// Load collections, logging a one-line summary per collection.
fn run_check(config: &SiteConfig) -> Result<CollectionReport> {
    let (collections, report) = Collections::load(config)?;

    for collection in collections.iter() {
        if collection.is_empty() {
            log!("warning"; "{}: no entries found", collection.name());
            continue;
        }
        let drafts = collection.draft_count();
        let tags = collection.tags().len();
        log!("check"; "{}: {} entr{} ({} published, {} draft{}), {} tag{}",
            collection.name(),
            collection.len(),
            if collection.len() == 1 { "y" } else { "ies" },
            collection.published().count(),
            drafts,
            plural_s(drafts),
            tags,
            plural_s(tags));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::fs;

    fn site(posts: &[(&str, &str)]) -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("src/content/blog");
        fs::create_dir_all(&blog).unwrap();
        for (name, content) in posts {
            fs::write(blog.join(name), content).unwrap();
        }
        let config = test_config("", dir.path());
        (dir, config)
    }

    const GOOD: &str = "---\ntitle: Ok\npubDate: 2024-01-01\ndescription: d\n---\n";
    const BAD: &str = "---\ntitle: Bad\n---\n";

    #[test]
    fn test_check_passes_on_valid_collection() {
        let (_dir, config) = site(&[("ok.md", GOOD)]);
        let args = CheckArgs { warn_only: false };
        assert!(check_site(&args, &config).is_ok());
    }

    #[test]
    fn test_check_fails_on_invalid_entry() {
        let (_dir, config) = site(&[("ok.md", GOOD), ("bad.md", BAD)]);
        let err = check_site(&CheckArgs { warn_only: false }, &config).unwrap_err();
        assert!(err.to_string().contains("1 invalid entry"));
    }

    #[test]
    fn test_warn_only_does_not_fail() {
        let (_dir, config) = site(&[("bad.md", BAD)]);
        assert!(check_site(&CheckArgs { warn_only: true }, &config).is_ok());
    }
}
