//! Featured post selection.

use crate::PostSummary;

/// Select the featured subset of sorted posts.
///
/// Explicitly flagged posts come first, in sort order. When fewer than `min`
/// are flagged, the most recent unflagged posts are appended until the set
/// holds `min` posts or the collection runs out. The set never exceeds `max`
/// posts and never contains a post twice.
pub fn select_featured(posts: &[PostSummary], min: usize, max: usize) -> Vec<PostSummary> {
    let mut featured: Vec<&PostSummary> = posts.iter().filter(|p| p.featured).take(max).collect();

    if featured.len() < min {
        let target = min.min(max);
        let backfill: Vec<&PostSummary> = posts
            .iter()
            .filter(|p| !p.featured)
            .take(target - featured.len())
            .collect();
        featured.extend(backfill);
    }

    featured.into_iter().cloned().collect()
}
