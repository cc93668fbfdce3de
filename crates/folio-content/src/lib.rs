//! Front-matter content loading for Folio.
//!
//! This crate provides a [`ContentSource`] trait for reading page records
//! (URL + parsed front-matter) from a content collection. Loading is split
//! into two composable stages:
//!
//! 1. **Listing** ([`Scanner`]): find Markdown files and derive their URLs
//! 2. **Parsing** ([`split_front_matter`], [`parse_front_matter`]): extract
//!    the YAML block at the top of each file
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_content::{ContentSource, FsContentSource};
//!
//! let source = FsContentSource::new(PathBuf::from("pages"), "posts");
//! for page in source.list()? {
//!     println!("{}: {:?}", page.url, page.front_matter.title());
//! }
//! ```

mod error;
mod front_matter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod scanner;
mod source;

pub use error::{ContentError, ContentErrorKind};
pub use front_matter::{FrontMatter, parse_front_matter, split_front_matter};
pub use fs::FsContentSource;
#[cfg(feature = "mock")]
pub use mock::MockContentSource;
pub use scanner::{PageRef, Scanner, file_path_to_url};
pub use source::{AssetLookup, ContentSource, PageRecord};
