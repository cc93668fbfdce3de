//! Page discovery by directory listing.
//!
//! This module separates the listing phase (finding files) from the parsing
//! phase (reading front-matter). The Scanner only identifies Markdown files,
//! returning lightweight references for `FsContentSource` to process.

use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a page's source file.
///
/// Contains only the file location and URL - no content is read at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Site URL (e.g., "/posts/", "/posts/hello.html").
    pub url: String,
    /// Absolute path to the Markdown file.
    pub path: PathBuf,
}

/// Lists Markdown pages of one content collection.
///
/// A collection is a single directory below the source directory (e.g.
/// `posts`). Only files directly inside it are listed; hidden files are
/// skipped and results are sorted by file name.
pub struct Scanner {
    source_dir: PathBuf,
    collection: String,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Content source directory (site root)
    /// * `collection` - Collection directory relative to `source_dir`
    pub fn new(source_dir: PathBuf, collection: impl Into<String>) -> Self {
        Self {
            source_dir,
            collection: collection.into(),
        }
    }

    /// Directory being listed.
    #[must_use]
    pub fn collection_dir(&self) -> PathBuf {
        self.source_dir.join(&self.collection)
    }

    /// List page references.
    ///
    /// Returns an empty Vec if the collection directory doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory exists but cannot be read.
    pub fn scan(&self) -> std::io::Result<Vec<PageRef>> {
        let dir = self.collection_dir();
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "Collection directory missing");
            return Ok(Vec::new());
        }

        let mut entries: Vec<_> = fs::read_dir(&dir)?
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .map(|e| e.path())
            .filter(|p| is_markdown(p) && !is_hidden(p))
            .collect();
        entries.sort();

        Ok(entries
            .into_iter()
            .filter_map(|path| {
                let rel = path.strip_prefix(&self.source_dir).ok()?.to_path_buf();
                Some(PageRef {
                    url: file_path_to_url(&rel),
                    path,
                })
            })
            .collect())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "md")
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

/// Convert a source-relative Markdown path to a site URL.
///
/// Examples:
/// - `index.md` -> `"/"`
/// - `posts/index.md` -> `"/posts/"`
/// - `posts/hello.md` -> `"/posts/hello.html"`
pub fn file_path_to_url(rel_path: &Path) -> String {
    let path_str = rel_path.to_string_lossy().replace('\\', "/");

    // Remove .md extension
    let without_ext = path_str.strip_suffix(".md").unwrap_or(&path_str);

    if without_ext == "index" {
        "/".to_owned()
    } else if let Some(dir) = without_ext.strip_suffix("/index") {
        format!("/{dir}/")
    } else {
        format!("/{without_ext}.html")
    }
}
