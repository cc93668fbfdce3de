//! Tag normalisation and statistics.

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

/// Normalise a raw `tags` front-matter value into a tag list.
///
/// - a sequence is used as is (scalar items rendered as text)
/// - a non-blank string becomes a one-element list
/// - anything else, including a sequence with no scalar items, becomes
///   `[untagged]`
pub fn normalize_tags(value: Option<&Value>, untagged: &str) -> Vec<String> {
    let tags: Vec<String> = match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(tag)) if !tag.trim().is_empty() => vec![tag.clone()],
        _ => Vec::new(),
    };
    if tags.is_empty() {
        vec![untagged.to_owned()]
    } else {
        tags
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Tag occurrence statistics.
///
/// Every tag of every post appears exactly once in `stats`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TagIndex {
    /// Tag names by descending count; ties keep discovery order.
    pub names: Vec<String>,
    /// Occurrence count per tag, in discovery order.
    pub stats: IndexMap<String, usize>,
    /// Visibility per tag, in `names` order. Every tag starts visible.
    pub status: IndexMap<String, bool>,
}

impl TagIndex {
    /// Build statistics from per-post tag lists.
    pub fn from_tag_lists<'a>(lists: impl IntoIterator<Item = &'a [String]>) -> Self {
        let mut stats: IndexMap<String, usize> = IndexMap::new();
        for tag in lists.into_iter().flatten() {
            *stats.entry(tag.clone()).or_default() += 1;
        }

        let mut names: Vec<String> = stats.keys().cloned().collect();
        // Stable sort keeps discovery order for equal counts
        names.sort_by(|a, b| stats[b].cmp(&stats[a]));

        let status = names.iter().map(|tag| (tag.clone(), true)).collect();

        Self {
            names,
            stats,
            status,
        }
    }

    /// Total number of tag occurrences across all posts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.stats.values().sum()
    }
}
