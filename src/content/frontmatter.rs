//! Front-matter extraction from YAML (`---`) or TOML (`+++`) blocks.
//!
//! Both formats are converted to a JSON object so the schema has a single
//! deserialization path. TOML datetimes become their string form.

use serde_json::{Map, Value as JsonValue};

use super::ContentError;

pub type JsonMap = Map<String, JsonValue>;

/// Front-matter syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    const fn fence(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Raw front-matter block split off a document.
#[derive(Debug, Clone, Copy)]
pub struct Frontmatter<'a> {
    pub format: Format,
    pub raw: &'a str,
    pub body: &'a str,
}

impl Frontmatter<'_> {
    /// Parse the block into a JSON object.
    pub fn parse(&self) -> Result<JsonMap, ContentError> {
        if self.raw.trim().is_empty() {
            return Ok(JsonMap::new());
        }

        let value = match self.format {
            Format::Yaml => serde_yaml::from_str::<JsonValue>(self.raw)?,
            Format::Toml => toml_to_json(toml::Value::Table(toml::from_str(self.raw)?)),
        };

        match value {
            JsonValue::Object(map) => Ok(map),
            // Comment-only YAML block
            JsonValue::Null => Ok(JsonMap::new()),
            _ => Err(ContentError::NotAMapping),
        }
    }
}

/// Split a document into front-matter and body.
///
/// Returns `Ok(None)` when the document has no front-matter block.
pub fn split(content: &str) -> Result<Option<Frontmatter<'_>>, ContentError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for format in [Format::Yaml, Format::Toml] {
        if let Some((raw, body)) = split_block(trimmed, format.fence())? {
            return Ok(Some(Frontmatter { format, raw, body }));
        }
    }

    Ok(None)
}

/// Split on a fence line. The opening fence must be alone on its line.
fn split_block<'a>(
    content: &'a str,
    fence: &'static str,
) -> Result<Option<(&'a str, &'a str)>, ContentError> {
    let Some(rest) = content.strip_prefix(fence) else {
        return Ok(None);
    };
    let Some(rest) = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))
    else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let raw = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Ok(Some((raw, body)));
        }
        offset += line.len();
    }

    Err(ContentError::Unterminated(fence))
}

/// Convert a TOML value to JSON, stringifying datetimes.
fn toml_to_json(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(s) => JsonValue::String(s),
        toml::Value::Integer(i) => JsonValue::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        toml::Value::Boolean(b) => JsonValue::Bool(b),
        toml::Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        toml::Value::Array(arr) => JsonValue::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => JsonValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
