//! YAML front-matter splitting and parsing.
//!
//! Front-matter is the YAML block delimited by `---` lines at the very top
//! of a Markdown file. Fields are kept as raw YAML values so consumers can
//! tell a missing field from one of the wrong type.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

use crate::ContentError;

/// Front-matter delimiter line.
const DELIMITER: &str = "---";

/// Alternative closing delimiter allowed by YAML documents.
const END_OF_DOCUMENT: &str = "...";

/// Structured metadata attached to a content page.
///
/// Known keys are exposed as raw values; everything else lands in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub author: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
    #[serde(default)]
    pub featured: Option<Value>,
    /// Any remaining keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FrontMatter {
    /// Page title, rendered as text for scalar values.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self.title.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Author, if set to a non-empty string.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        match self.author.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// True only when `featured` is the boolean `true`.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        matches!(self.featured, Some(Value::Bool(true)))
    }
}

/// Split a document into its front-matter block and body.
///
/// Returns `(None, content)` when the document does not open with a `---`
/// line or the block is never closed.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(first_line_end) = content.find('\n') else {
        return (None, content);
    };
    if content[..first_line_end].trim_end() != DELIMITER {
        return (None, content);
    }

    let block_start = first_line_end + 1;
    let mut offset = block_start;
    for line in content[block_start..].split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == DELIMITER || trimmed == END_OF_DOCUMENT {
            let yaml = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse a YAML front-matter block.
///
/// Empty content returns a default instance.
///
/// # Errors
///
/// Returns a parse error if the YAML is malformed or not a mapping.
pub fn parse_front_matter(yaml: &str) -> Result<FrontMatter, ContentError> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(trimmed).map_err(ContentError::parse)
}
