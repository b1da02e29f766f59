//! Derived views over a fetched article collection.

use super::model::Article;
use crate::constants::{CARD_EXCERPT_LENGTH, FEATURED_EXCERPT_FALLBACK};
use crate::format::truncate;

/// The first article flagged as featured, in collection order.
///
/// The collection arrives newest first, so with several flagged articles the
/// most recent one wins.
pub fn featured(posts: &[Article]) -> Option<&Article> {
    posts.iter().find(|post| post.featured)
}

/// Every article except the featured one.
pub fn regular(posts: &[Article]) -> Vec<&Article> {
    match featured(posts) {
        Some(feature) => posts.iter().filter(|post| post.id != feature.id).collect(),
        None => posts.iter().collect(),
    }
}

/// Regular articles whose title or excerpt contains `term`, ignoring case.
///
/// A blank term matches everything. Otherwise the term is matched as given,
/// surrounding whitespace included.
pub fn search<'a>(posts: &'a [Article], term: &str) -> Vec<&'a Article> {
    let regular = regular(posts);
    if term.trim().is_empty() {
        return regular;
    }

    let needle = term.to_lowercase();
    regular
        .into_iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post
                    .excerpt
                    .as_deref()
                    .map(|excerpt| excerpt.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}

/// Excerpt for a card, cut to the card length.
pub fn card_excerpt(post: &Article) -> Option<String> {
    post.excerpt()
        .map(|excerpt| truncate(&excerpt, CARD_EXCERPT_LENGTH))
}

/// Excerpt for the featured slot, with a fixed fallback.
pub fn featured_excerpt(post: &Article) -> String {
    post.excerpt()
        .unwrap_or_else(|| FEATURED_EXCERPT_FALLBACK.to_string())
}
