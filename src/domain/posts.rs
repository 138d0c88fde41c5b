//! Pure queries and ordering over the captured working set.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use time::OffsetDateTime;

use crate::domain::entities::PostRecord;
use crate::domain::types::{CategoryFilter, SortOrder};
use crate::util::text;

/// The inclusion predicate: a record is visible iff the category filter
/// admits it and the search text (already lower-cased) occurs in its
/// title, excerpt, or any tag.
pub fn matches_filter(post: &PostRecord, category: &CategoryFilter, search: &str) -> bool {
    let category_match = category.matches(&post.category);
    let search_match = search.is_empty()
        || text::contains_ignore_case(&post.title, search)
        || text::contains_ignore_case(&post.excerpt, search)
        || post
            .tags
            .iter()
            .any(|tag| text::contains_ignore_case(tag, search));

    category_match && search_match
}

/// Comparator for the active sort order. `Unordered` reports every pair
/// equal; combined with a stable sort that preserves the current order.
pub fn compare(order: SortOrder, a: &PostRecord, b: &PostRecord) -> Ordering {
    match order {
        SortOrder::Newest => chronological(a.published_at, b.published_at, true),
        SortOrder::Oldest => chronological(a.published_at, b.published_at, false),
        SortOrder::Popular => b.views.cmp(&a.views),
        SortOrder::Liked => b.likes.cmp(&a.likes),
        SortOrder::Unordered => Ordering::Equal,
    }
}

/// Missing dates are the degradation sentinel and sort last under both
/// chronological directions.
fn chronological(
    a: Option<OffsetDateTime>,
    b: Option<OffsetDateTime>,
    newest_first: bool,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if newest_first {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn find_by_slug<'a>(posts: &'a [PostRecord], slug: &str) -> Option<&'a PostRecord> {
    posts.iter().find(|post| post.slug == slug)
}

/// Posts flagged for the home-page selection, newest first.
pub fn featured(posts: &[PostRecord]) -> Vec<&PostRecord> {
    let mut selected: Vec<&PostRecord> = posts.iter().filter(|post| post.featured).collect();
    selected.sort_by(|a, b| compare(SortOrder::Newest, a, b));
    selected
}

pub fn known_categories(posts: &[PostRecord]) -> BTreeSet<&str> {
    posts.iter().map(|post| post.category.as_str()).collect()
}

pub fn known_tags(posts: &[PostRecord]) -> BTreeSet<&str> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().map(String::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn post(id: u64, category: &str, title: &str) -> PostRecord {
        PostRecord {
            id,
            slug: format!("post-{id}"),
            title: title.to_string(),
            excerpt: String::new(),
            category: category.to_string(),
            tags: Vec::new(),
            published_at: None,
            views: 0,
            likes: 0,
            comments: 0,
            bookmarked: false,
            featured: false,
            author: None,
        }
    }

    #[test]
    fn filter_requires_both_category_and_search() {
        let mut record = post(1, "news", "Moonlight launch");
        record.tags = vec!["Design".to_string()];

        let all = CategoryFilter::All;
        let news = CategoryFilter::parse("news");
        let other = CategoryFilter::parse("events");

        assert!(matches_filter(&record, &all, ""));
        assert!(matches_filter(&record, &news, "moonlight"));
        assert!(matches_filter(&record, &news, "design"));
        assert!(!matches_filter(&record, &other, "moonlight"));
        assert!(!matches_filter(&record, &news, "quantum"));
    }

    #[test]
    fn category_comparison_is_case_sensitive() {
        let record = post(1, "News", "title");
        assert!(!matches_filter(&record, &CategoryFilter::parse("news"), ""));
        assert!(matches_filter(&record, &CategoryFilter::parse("News"), ""));
    }

    #[test]
    fn undated_posts_sort_last_in_both_directions() {
        let mut dated = post(1, "news", "dated");
        dated.published_at = Some(datetime!(2025-06-01 10:00 UTC));
        let undated = post(2, "news", "undated");

        assert_eq!(
            compare(SortOrder::Newest, &dated, &undated),
            Ordering::Less
        );
        assert_eq!(
            compare(SortOrder::Oldest, &dated, &undated),
            Ordering::Less
        );
        assert_eq!(
            compare(SortOrder::Newest, &undated, &dated),
            Ordering::Greater
        );
    }

    #[test]
    fn featured_selection_is_newest_first() {
        let mut a = post(1, "news", "older feature");
        a.featured = true;
        a.published_at = Some(datetime!(2025-01-01 0:00 UTC));
        let mut b = post(2, "news", "newer feature");
        b.featured = true;
        b.published_at = Some(datetime!(2025-03-01 0:00 UTC));
        let c = post(3, "news", "not featured");

        let posts = vec![a, b, c];
        let ids: Vec<u64> = featured(&posts).iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn known_values_deduplicate() {
        let mut a = post(1, "news", "a");
        a.tags = vec!["web".to_string(), "ai".to_string()];
        let mut b = post(2, "news", "b");
        b.tags = vec!["web".to_string()];

        let posts = vec![a, b];
        assert_eq!(known_categories(&posts).len(), 1);
        let tags: Vec<&str> = known_tags(&posts).into_iter().collect();
        assert_eq!(tags, vec!["ai", "web"]);
    }
}
