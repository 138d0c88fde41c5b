//! Capture of the collaborator's server-rendered post metadata.
//!
//! The rendered listing page exposes one `blog-card` element per post.
//! Its `data-*` attributes carry the listing metadata and the
//! `blog-title` / `blog-excerpt` descendants carry the display text used
//! for search matching. Collaborators that emit a side-channel JSON
//! manifest instead are served by [`from_manifest`], which applies the
//! same field-absence defaults: missing counters become 0, missing tags an
//! empty list, missing flags false, and an unparseable publish date the
//! sorts-last sentinel. Cards without a parseable id are skipped with a
//! warning rather than failing the capture.

use std::cell::RefCell;
use std::rc::Rc;

use lol_html::{RewriteStrSettings, element, rewrite_str, text};
use serde::Deserialize;
use thiserror::Error;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::warn;

use crate::domain::entities::PostRecord;

const DATE_ONLY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to walk rendered markup: {0}")]
    Markup(#[from] lol_html::errors::RewritingError),
    #[error("failed to parse post manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Capture every rendered `blog-card` in document order.
pub fn from_markup(html: &str) -> Result<Vec<PostRecord>, IngestError> {
    let captures: Rc<RefCell<Vec<CardCapture>>> = Rc::new(RefCell::new(Vec::new()));

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!(".blog-card", {
                    let captures = Rc::clone(&captures);
                    move |el| {
                        let capture = CardCapture {
                            id: el.get_attribute("data-id"),
                            slug: el.get_attribute("data-slug"),
                            category: el.get_attribute("data-category"),
                            tags: el.get_attribute("data-tags"),
                            // Older templates emitted the all-lowercase form.
                            publish_date: el
                                .get_attribute("data-publish-date")
                                .or_else(|| el.get_attribute("data-publishdate")),
                            views: el.get_attribute("data-views"),
                            likes: el.get_attribute("data-likes"),
                            comments: el.get_attribute("data-comments"),
                            bookmarked: el.get_attribute("data-bookmarked"),
                            featured: el.get_attribute("data-featured"),
                            author: el.get_attribute("data-author"),
                            ..CardCapture::default()
                        };
                        captures.borrow_mut().push(capture);
                        Ok(())
                    }
                }),
                text!(".blog-card .blog-title", {
                    let captures = Rc::clone(&captures);
                    move |chunk| {
                        if let Some(capture) = captures.borrow_mut().last_mut() {
                            capture.title.push_str(chunk.as_str());
                        }
                        Ok(())
                    }
                }),
                text!(".blog-card .blog-excerpt", {
                    let captures = Rc::clone(&captures);
                    move |chunk| {
                        if let Some(capture) = captures.borrow_mut().last_mut() {
                            capture.excerpt.push_str(chunk.as_str());
                        }
                        Ok(())
                    }
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )?;

    let collected = captures.take();
    Ok(collected.into_iter().filter_map(CardCapture::finish).collect())
}

/// Parse a JSON manifest of the same metadata.
pub fn from_manifest(json: &str) -> Result<Vec<PostRecord>, IngestError> {
    let raw: Vec<RawPostMetadata> = serde_json::from_str(json)?;
    Ok(raw.into_iter().filter_map(RawPostMetadata::finish).collect())
}

#[derive(Debug, Default)]
struct CardCapture {
    id: Option<String>,
    slug: Option<String>,
    category: Option<String>,
    tags: Option<String>,
    publish_date: Option<String>,
    views: Option<String>,
    likes: Option<String>,
    comments: Option<String>,
    bookmarked: Option<String>,
    featured: Option<String>,
    author: Option<String>,
    title: String,
    excerpt: String,
}

impl CardCapture {
    fn finish(self) -> Option<PostRecord> {
        let id = match self
            .id
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            Some(id) => id,
            None => {
                warn!(
                    raw = self.id.as_deref().unwrap_or(""),
                    "skipping rendered card without a parseable id"
                );
                return None;
            }
        };

        Some(PostRecord {
            id,
            slug: self.slug.unwrap_or_default().trim().to_string(),
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            category: self.category.unwrap_or_default().trim().to_string(),
            tags: parse_tags(self.tags.as_deref()),
            published_at: parse_publish_date(self.publish_date.as_deref()),
            views: parse_count(self.views.as_deref()),
            likes: parse_count(self.likes.as_deref()),
            comments: parse_count(self.comments.as_deref()),
            bookmarked: parse_flag(self.bookmarked.as_deref()),
            featured: parse_flag(self.featured.as_deref()),
            author: normalize_author(self.author),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPostMetadata {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    views: u64,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    comments: u64,
    #[serde(default)]
    bookmarked: bool,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    author: Option<String>,
}

impl RawPostMetadata {
    fn finish(self) -> Option<PostRecord> {
        let Some(id) = self.id else {
            warn!("skipping manifest entry without an id");
            return None;
        };

        Some(PostRecord {
            id,
            slug: self.slug.trim().to_string(),
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            category: self.category.trim().to_string(),
            tags: self
                .tags
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
            published_at: parse_publish_date(self.publish_date.as_deref()),
            views: self.views,
            likes: self.likes,
            comments: self.comments,
            bookmarked: self.bookmarked,
            featured: self.featured,
            author: normalize_author(self.author),
        })
    }
}

fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("true"))
}

fn parse_publish_date(raw: Option<&str>) -> Option<OffsetDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(instant);
    }
    if let Ok(date) = Date::parse(raw, DATE_ONLY_FORMAT) {
        return Some(date.midnight().assume_utc());
    }
    warn!(raw, "unparseable publish date; treating post as undated");
    None
}

fn normalize_author(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
