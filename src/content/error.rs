//! Content loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a collection or one of its entries.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("collection `{name}` directory not found: {}", dir.display())]
    MissingDir { name: &'static str, dir: PathBuf },

    #[error("no front-matter block (expected `---` or `+++` on the first line)")]
    MissingFrontmatter,

    #[error("unterminated front-matter block (missing closing `{0}`)")]
    Unterminated(&'static str),

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("front-matter must be a key/value mapping")]
    NotAMapping,

    // No #[source]: the message already carries serde's text
    #[error("{0}")]
    Schema(serde_json::Error),

    #[error("hero image not found: {src} (looked at {})", path.display())]
    MissingImage { src: String, path: PathBuf },

    #[error("file name `{0}` produces an empty id")]
    EmptyId(String),

    #[error("duplicate id `{id}`, already used by {first}")]
    DuplicateId { id: String, first: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ContentError::MissingDir {
            name: "blog",
            dir: PathBuf::from("src/content/blog"),
        };
        assert_eq!(
            err.to_string(),
            "collection `blog` directory not found: src/content/blog"
        );

        let err = ContentError::DuplicateId {
            id: "hello".into(),
            first: "src/content/blog/hello.md".into(),
        };
        assert!(err.to_string().contains("`hello`"));
        assert!(err.to_string().contains("src/content/blog/hello.md"));
    }
}
