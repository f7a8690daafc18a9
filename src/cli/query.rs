//! `query` command: emit collection entries as JSON for templates.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use serde_json::{Map, Value as JsonValue};

use crate::address::PathResolver;
use crate::cli::QueryArgs;
use crate::config::SiteConfig;
use crate::content::schema::{ImageLocation, ImageRef};
use crate::content::{Collection, Collections, Entry, JsonMap};
use crate::log;
use crate::utils::plural_s;

pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let (collections, report) = Collections::load(config)?;
    if report.has_errors() {
        let n = report.error_count();
        log!("warning"; "skipped {} invalid file{}, run `postbase check` for details", n, plural_s(n));
    }

    let collection = collections
        .get(&args.collection)
        .ok_or_else(|| anyhow!("unknown collection `{}`", args.collection))?;

    let resolver = config.resolver();
    let rows: Vec<JsonMap> = select(collection, args)
        .into_iter()
        .map(|entry| entry_json(entry, collection, config, &resolver, args.body))
        .collect::<Result<_>>()?;

    let output = match &args.fields {
        Some(fields) => filter_fields(&rows, fields, args.filter_empty),
        None => format_rows(&rows, args.filter_empty),
    };

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        writeln!(file, "{formatted}")?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{formatted}");
    }

    Ok(())
}

/// Entries matching the id, tag and draft filters, newest first.
///
/// An explicit `--id` returns the entry even when it is a draft.
fn select<'a>(collection: &'a Collection, args: &'a QueryArgs) -> Vec<&'a Entry> {
    if let Some(id) = &args.id {
        return collection.get(id).into_iter().collect();
    }

    let mut entries: Vec<&Entry> = match &args.tag {
        Some(tag) => collection.with_tag(tag).collect(),
        None => collection.entries().iter().collect(),
    };
    if !args.drafts {
        entries.retain(|e| !e.is_draft());
    }
    entries
}

/// JSON object of one entry: `id`, `path`, `url` first, then front-matter.
///
/// `heroImage.src` is rewritten by [`hero_src`]. With `body`, the raw
/// markdown is appended as `body`.
fn entry_json(
    entry: &Entry,
    collection: &Collection,
    config: &SiteConfig,
    resolver: &PathResolver,
    body: bool,
) -> Result<JsonMap> {
    let mut obj = Map::new();
    obj.insert("id".into(), JsonValue::String(entry.id.clone()));
    obj.insert(
        "path".into(),
        JsonValue::String(config.root_relative(&entry.path).display().to_string()),
    );
    obj.insert(
        "url".into(),
        JsonValue::String(
            resolver
                .entry_url(collection.route(), &entry.id)
                .into_string(),
        ),
    );

    if let JsonValue::Object(data) = serde_json::to_value(&entry.data)? {
        obj.extend(data);
    }

    if let Some(image) = &entry.data.hero_image
        && let Some(JsonValue::Object(hero)) = obj.get_mut("heroImage")
    {
        hero.insert(
            "src".into(),
            JsonValue::String(hero_src(entry, image, config, resolver)),
        );
    }

    if body {
        obj.insert("body".into(), JsonValue::String(entry.body.clone()));
    }

    Ok(obj)
}

/// Public form of a hero image source.
///
/// Site paths get the base prefix, external URLs pass through, and
/// document-relative paths are given from the project root.
fn hero_src(
    entry: &Entry,
    image: &ImageRef,
    config: &SiteConfig,
    resolver: &PathResolver,
) -> String {
    let doc_dir = entry.path.parent().unwrap_or(config.root.as_path());
    match image.locate(doc_dir, &config.site.public) {
        ImageLocation::Local(path) if !image.src.trim_start().starts_with('/') => {
            // Re-collecting drops the inner `.` of `blog/./cover.png`
            let path: PathBuf = path.components().collect();
            config.root_relative(path).display().to_string()
        }
        _ => resolver.asset_url(&image.src).into_string(),
    }
}

/// Format all rows, optionally filtering empty fields
fn format_rows(rows: &[JsonMap], filter_empty: bool) -> JsonValue {
    rows.iter()
        .map(|row| {
            JsonValue::Object(
                row.iter()
                    .filter(|(_, v)| !filter_empty || !is_empty_value(v))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
        })
        .collect()
}

/// Filter to specific fields, with id/path/url always included first
fn filter_fields(rows: &[JsonMap], fields: &[String], filter_empty: bool) -> JsonValue {
    const ALWAYS: [&str; 3] = ["id", "path", "url"];

    rows.iter()
        .map(|row| {
            let mut obj = Map::new();
            for key in ALWAYS {
                if let Some(value) = row.get(key) {
                    obj.insert(key.to_string(), value.clone());
                }
            }
            for field in fields {
                match row.get(field) {
                    Some(value) if !filter_empty || !is_empty_value(value) => {
                        obj.insert(field.clone(), value.clone());
                    }
                    Some(_) => {}
                    // Requested but absent: show null when not filtering
                    None if !filter_empty => {
                        obj.insert(field.clone(), JsonValue::Null);
                    }
                    None => {}
                }
            }
            JsonValue::Object(obj)
        })
        .collect()
}

/// Check if a JSON value is considered "empty" (null, "", or [])
fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(arr) => arr.is_empty(),
        _ => false,
    }
}
