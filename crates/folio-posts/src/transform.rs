//! Page records to post listing data.

use std::cmp::Ordering;

use serde::Serialize;

use folio_content::{AssetLookup, ContentError, ContentSource, PageRecord};

use crate::date::{PostDate, format_date};
use crate::excerpt::truncate_text;
use crate::featured::select_featured;
use crate::tags::{TagIndex, normalize_tags};

/// Options for the post listing transform.
#[derive(Clone, Debug)]
pub struct PostsOptions {
    /// URL of the collection index page, excluded from the listing.
    pub index_url: String,
    /// Maximum excerpt length in characters.
    pub excerpt_length: usize,
    /// Author used when a post declares none.
    pub default_author: String,
    /// Minimum featured set size when enough posts exist.
    pub featured_min: usize,
    /// Maximum featured set size.
    pub featured_max: usize,
    /// Tag used for posts without tags.
    pub untagged_label: String,
    /// Cover image extension (without dot).
    pub image_extension: String,
}

impl Default for PostsOptions {
    fn default() -> Self {
        Self {
            index_url: "/posts/".to_owned(),
            excerpt_length: 150,
            default_author: "PDan".to_owned(),
            featured_min: 3,
            featured_max: 10,
            untagged_label: "-/-".to_owned(),
            image_extension: "png".to_owned(),
        }
    }
}

/// Listing view of one post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub title: Option<String>,
    pub excerpt: String,
    /// Cover image path, when one exists next to the post.
    pub image: Option<String>,
    pub author: String,
    pub href: String,
    pub date: PostDate,
    pub tags: Vec<String>,
    pub featured: bool,
}

/// Everything a listing template needs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PostsData {
    pub tags: TagIndex,
    pub posts: Vec<PostSummary>,
    pub featured: Vec<PostSummary>,
}

/// Derive the cover image path for a post URL.
///
/// `/posts/hello.html` maps to `/posts/hello.<ext>`; the path is returned
/// only when the asset exists.
pub fn image_path(url: &str, extension: &str, assets: &dyn AssetLookup) -> Option<String> {
    let (stem, _) = url.rsplit_once('.')?;
    if stem.ends_with('/') || stem.is_empty() {
        return None;
    }
    let candidate = format!("{stem}.{extension}");
    assets.asset_exists(&candidate).then_some(candidate)
}

fn summarize(page: &PageRecord, options: &PostsOptions, assets: &dyn AssetLookup) -> PostSummary {
    let fm = &page.front_matter;
    PostSummary {
        title: fm.title(),
        excerpt: truncate_text(fm.description.as_ref(), options.excerpt_length),
        image: image_path(&page.url, &options.image_extension, assets),
        author: fm
            .author()
            .map_or_else(|| options.default_author.clone(), str::to_owned),
        href: page.url.clone(),
        date: format_date(fm.date.as_ref()),
        tags: normalize_tags(fm.tags.as_ref(), &options.untagged_label),
        featured: fm.is_featured(),
    }
}

/// Newest first; undated posts last.
fn by_date_desc(a: &PostSummary, b: &PostSummary) -> Ordering {
    match (a.date.ts, b.date.ts) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Build listing data from page records.
///
/// The index page is excluded. Posts are sorted by descending date with a
/// stable sort, so equal and missing dates keep their input order.
pub fn build_posts(
    pages: &[PageRecord],
    options: &PostsOptions,
    assets: &dyn AssetLookup,
) -> PostsData {
    let mut posts: Vec<PostSummary> = pages
        .iter()
        .filter(|page| page.url != options.index_url)
        .map(|page| summarize(page, options, assets))
        .collect();
    posts.sort_by(by_date_desc);

    let tags = TagIndex::from_tag_lists(posts.iter().map(|p| p.tags.as_slice()));
    let featured = select_featured(&posts, options.featured_min, options.featured_max);

    tracing::debug!(
        posts = posts.len(),
        tags = tags.names.len(),
        featured = featured.len(),
        "Built post listing"
    );

    PostsData {
        tags,
        posts,
        featured,
    }
}

/// List a content source and build listing data from it.
///
/// # Errors
///
/// Returns [`ContentError`] if the source cannot be listed.
pub fn load_posts(
    source: &dyn ContentSource,
    options: &PostsOptions,
) -> Result<PostsData, ContentError> {
    let pages = source.list()?;
    Ok(build_posts(&pages, options, source))
}
