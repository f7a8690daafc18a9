//! `blog` collection schema.
//!
//! # Fields
//!
//! | Key           | Type          | Required | Default |
//! |---------------|---------------|----------|---------|
//! | `title`       | `String`      | yes      |         |
//! | `pubDate`     | date          | yes      |         |
//! | `description` | `String`      | yes      |         |
//! | `tags`        | `Vec<String>` | no       | `[]`    |
//! | `heroImage`   | [`ImageRef`]  | no       |         |
//! | `isDraft`     | `bool`        | no       | `false` |
//!
//! This is the only active schema. Posts written against the older
//! `image: { src, alt }` shape are flagged, not merged into `heroImage`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value as JsonValue;

use super::{ContentError, JsonMap};
use crate::utils::DateTimeUtc;

/// Front-matter key of the drifted hero image shape.
const LEGACY_IMAGE_KEY: &str = "image";

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Validated front-matter of a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub pub_date: DateTimeUtc,
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<ImageRef>,
    #[serde(default)]
    pub is_draft: bool,
}

/// Image descriptor: source path plus alt text.
///
/// A bare string is shorthand for `{ src, alt: "" }`. Unknown keys inside
/// the table are skipped through `IgnoredAny`, so they surface as
/// `heroImage.<key>` warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ImageVisitor;

        impl<'de> de::Visitor<'de> for ImageVisitor {
            type Value = ImageRef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an image path or a table with `src` and `alt`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ImageRef {
                    src: v.to_string(),
                    alt: String::new(),
                })
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut src: Option<String> = None;
                let mut alt: Option<String> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "src" if src.is_some() => return Err(de::Error::duplicate_field("src")),
                        "src" => src = Some(map.next_value()?),
                        "alt" if alt.is_some() => return Err(de::Error::duplicate_field("alt")),
                        "alt" => alt = Some(map.next_value()?),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(ImageRef {
                    src: src.ok_or_else(|| de::Error::missing_field("src"))?,
                    alt: alt.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ImageVisitor)
    }
}

/// Where an image reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    /// `http(s)://` or protocol-relative, not checked.
    External,
    /// Local file that must exist.
    Local(PathBuf),
}

impl ImageRef {
    /// Locate the image on disk.
    ///
    /// - `/x.png`: under the public dir
    /// - `./x.png`, `x.png`: next to the document
    pub fn locate(&self, doc_dir: &Path, public_dir: &Path) -> ImageLocation {
        let src = self.src.trim();
        if src.starts_with("//") || src.contains("://") {
            ImageLocation::External
        } else if let Some(rel) = src.strip_prefix('/') {
            ImageLocation::Local(public_dir.join(rel))
        } else {
            ImageLocation::Local(doc_dir.join(src))
        }
    }
}

/// A schema-checked post plus the non-fatal findings about it.
#[derive(Debug, Clone)]
pub struct Validated {
    pub post: BlogPost,
    pub warnings: Vec<String>,
}

impl BlogPost {
    /// Check parsed front-matter against the schema.
    ///
    /// Unknown keys are dropped and reported as warnings. The legacy
    /// `image` key gets a dedicated schema-drift warning.
    pub fn from_frontmatter(map: JsonMap) -> Result<Validated, ContentError> {
        let mut warnings = Vec::new();

        let post: Self = serde_ignored::deserialize(JsonValue::Object(map), |path| {
            let key = path.to_string();
            if key == LEGACY_IMAGE_KEY {
                warnings.push(
                    "schema drift: `image` is not part of the blog schema, use `heroImage` \
                     (value ignored)"
                        .to_string(),
                );
            } else {
                warnings.push(format!("unknown field `{key}` ignored"));
            }
        })
        .map_err(ContentError::Schema)?;

        Ok(Validated { post, warnings })
    }
}
