//! Filesystem content source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::front_matter::{FrontMatter, parse_front_matter, split_front_matter};
use crate::scanner::{PageRef, Scanner};
use crate::source::{AssetLookup, ContentSource, PageRecord};
use crate::{ContentError, ContentErrorKind};

/// Filesystem-backed content source.
///
/// Lists `*.md` files of one collection and parses their front-matter.
/// Files with malformed front-matter are logged and skipped so a single bad
/// page doesn't fail the build.
pub struct FsContentSource {
    source_dir: PathBuf,
    scanner: Scanner,
}

impl FsContentSource {
    /// Create a content source for `<source_dir>/<collection>`.
    #[must_use]
    pub fn new(source_dir: PathBuf, collection: impl Into<String>) -> Self {
        let scanner = Scanner::new(source_dir.clone(), collection);
        Self {
            source_dir,
            scanner,
        }
    }

    /// Content source directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Read and parse a single page.
    fn load_page(page_ref: PageRef) -> Result<PageRecord, ContentError> {
        let content = fs::read_to_string(&page_ref.path)
            .map_err(|e| ContentError::io(e, Some(page_ref.path.clone())))?;

        let front_matter = match split_front_matter(&content) {
            (Some(yaml), _) => {
                parse_front_matter(yaml).map_err(|e| e.with_path(page_ref.path.clone()))?
            }
            (None, _) => FrontMatter::default(),
        };

        Ok(PageRecord {
            url: page_ref.url,
            path: page_ref.path,
            front_matter,
        })
    }
}

impl AssetLookup for FsContentSource {
    fn asset_exists(&self, rel_path: &str) -> bool {
        let rel = rel_path.trim_start_matches('/');
        if rel.is_empty() || rel.split('/').any(|segment| segment == "..") {
            return false;
        }
        self.source_dir.join(rel).is_file()
    }
}

impl ContentSource for FsContentSource {
    fn list(&self) -> Result<Vec<PageRecord>, ContentError> {
        let refs = self.scanner.scan().map_err(|e| {
            ContentError::io(e, Some(self.scanner.collection_dir()))
                .with_message("cannot list collection")
        })?;

        let mut pages = Vec::with_capacity(refs.len());
        for page_ref in refs {
            tracing::debug!(url = %page_ref.url, "Loading page");
            match Self::load_page(page_ref) {
                Ok(page) => pages.push(page),
                Err(e) if e.kind == ContentErrorKind::Parse => {
                    tracing::warn!(error = %e, "Skipping page with invalid front-matter");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(pages)
    }
}
