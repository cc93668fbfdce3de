//! Theme glue and static site artifacts for Folio.
//!
//! Wires the content, posts and demo crates into what a site theme consumes:
//!
//! - [`Theme`] registers the [`DemoBlock`] component on a
//!   [`ComponentRegistry`]
//! - [`SiteData`] is the theme-facing view of the configuration
//! - [`build_sitemap`] renders `sitemap.xml` with a per-item
//!   [`SitemapTransform`]
//! - [`SiteBuilder`] writes the JSON and XML artifacts of a build
//!
//! # Example
//!
//! ```ignore
//! use folio_config::Config;
//! use folio_content::FsContentSource;
//! use folio_site::SiteBuilder;
//!
//! let config = Config::load(None, None)?;
//! let source = FsContentSource::new(
//!     config.paths_resolved.source_dir.clone(),
//!     config.posts.dir.clone(),
//! );
//! let report = SiteBuilder::new(&config).build(&source)?;
//! ```

mod builder;
mod component;
mod demo_block;
mod error;
mod site_data;
mod sitemap;
mod theme;

pub use builder::{BuildReport, SiteBuilder, discover_demos, discover_pages, posts_options};
pub use component::{Component, ComponentRegistry, Props};
pub use demo_block::{DemoBlock, DemoBlockOptions};
pub use error::SiteError;
pub use site_data::{SearchOptions, SiteData};
pub use sitemap::{ConfigTransform, SitemapItem, SitemapTransform, build_sitemap};
pub use theme::Theme;
