//! Content source trait and page records.

use std::path::PathBuf;

use crate::{ContentError, FrontMatter};

/// A content page with its parsed front-matter.
///
/// Read-only input to the listing transforms.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRecord {
    /// Site URL (e.g., "/posts/hello.html").
    pub url: String,
    /// Source file path.
    pub path: PathBuf,
    /// Parsed front-matter.
    pub front_matter: FrontMatter,
}

/// Existence checks for static assets next to content pages.
pub trait AssetLookup {
    /// Check whether an asset exists at a site-relative path (e.g.,
    /// "/posts/hello.png").
    ///
    /// Returns `false` on errors.
    fn asset_exists(&self, rel_path: &str) -> bool;
}

/// Abstraction over a collection of Markdown pages.
///
/// Provides a unified interface for listing pages regardless of backend.
pub trait ContentSource: AssetLookup + Send + Sync {
    /// List every page of the collection with parsed front-matter.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if listing fails (e.g., permission denied).
    fn list(&self) -> Result<Vec<PageRecord>, ContentError>;
}
