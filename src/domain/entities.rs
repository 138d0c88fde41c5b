//! Post and category records mirrored from the collaborator's rendered metadata.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::slug::{self, SlugError};

/// One post in the working set.
///
/// The controller owns structured metadata only; the renderable fragment
/// stays with the external presentation layer, keyed by `id`. A missing
/// `published_at` is the degradation sentinel for unparseable dates and
/// sorts last under every chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub published_at: Option<OffsetDateTime>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub bookmarked: bool,
    pub featured: bool,
    pub author: Option<String>,
}

/// A bilingual category with its URL-friendly slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    pub slug: String,
    pub name_en: String,
    pub name_fa: String,
}

impl CategoryRecord {
    /// Build a category, deriving the slug from the English name. The
    /// `is_unique` predicate lets the caller reject slugs already in use;
    /// collisions are resolved with monotonic suffixes.
    pub fn derive<F>(
        name_en: impl Into<String>,
        name_fa: impl Into<String>,
        is_unique: F,
    ) -> Result<Self, SlugError>
    where
        F: FnMut(&str) -> bool,
    {
        let name_en = name_en.into();
        let slug = slug::generate_unique_slug(&name_en, is_unique)?;
        Ok(Self {
            slug,
            name_en,
            name_fa: name_fa.into(),
        })
    }
}
