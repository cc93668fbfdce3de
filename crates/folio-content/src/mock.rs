//! Mock content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without filesystem access.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::front_matter::parse_front_matter;
use crate::source::{AssetLookup, ContentSource, PageRecord};
use crate::ContentError;

/// Mock content source for testing.
///
/// Stores pages and asset paths in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use folio_content::{ContentSource, MockContentSource};
///
/// let source = MockContentSource::new()
///     .with_page("/posts/a.html", "title: A\ndate: 2024-01-01")
///     .with_asset("/posts/a.png");
///
/// let pages = source.list().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockContentSource {
    pages: Vec<PageRecord>,
    assets: HashSet<String>,
}

impl MockContentSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given URL and YAML front-matter.
    ///
    /// # Panics
    ///
    /// Panics if the front-matter is not valid YAML.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, yaml: &str) -> Self {
        let url = url.into();
        let front_matter = parse_front_matter(yaml).expect("mock front-matter must be valid YAML");
        self.pages.push(PageRecord {
            path: PathBuf::from(url.trim_start_matches('/')),
            url,
            front_matter,
        });
        self
    }

    /// Register an existing asset path (e.g., "/posts/a.png").
    #[must_use]
    pub fn with_asset(mut self, rel_path: impl Into<String>) -> Self {
        self.assets.insert(rel_path.into());
        self
    }
}

impl AssetLookup for MockContentSource {
    fn asset_exists(&self, rel_path: &str) -> bool {
        self.assets.contains(rel_path)
    }
}

impl ContentSource for MockContentSource {
    fn list(&self) -> Result<Vec<PageRecord>, ContentError> {
        Ok(self.pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_lists_pages_in_insertion_order() {
        let source = MockContentSource::new()
            .with_page("/posts/b.html", "title: B")
            .with_page("/posts/a.html", "title: A");

        let pages = source.list().unwrap();
        assert_eq!(pages[0].url, "/posts/b.html");
        assert_eq!(pages[1].front_matter.title(), Some("A".to_owned()));
    }

    #[test]
    fn test_mock_assets() {
        let source = MockContentSource::new().with_asset("/posts/a.png");
        assert!(source.asset_exists("/posts/a.png"));
        assert!(!source.asset_exists("/posts/b.png"));
    }
}
