//! Post listing transforms for Folio.
//!
//! Turns front-matter page records into the data a blog theme renders:
//!
//! - [`PostSummary`] list sorted newest first
//! - [`TagIndex`] with per-tag counts and display order
//! - the featured subset ([`select_featured`])
//!
//! All transforms are pure functions of their inputs. Defaults such as the
//! fallback author are passed in through [`PostsOptions`].

mod date;
mod excerpt;
mod featured;
mod tags;
mod transform;

pub use date::{PostDate, format_date, parse_date};
pub use excerpt::{truncate, truncate_text};
pub use featured::select_featured;
pub use tags::{TagIndex, normalize_tags};
pub use transform::{PostSummary, PostsData, PostsOptions, build_posts, image_path, load_posts};
