//! Web-Share payload construction for post detail links.

use thiserror::Error;
use url::Url;

use crate::domain::entities::PostRecord;

/// What the share control hands to the host environment: title, excerpt,
/// and the listing page URL anchored at the post's fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Url,
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid page url: {0}")]
    InvalidPageUrl(#[from] url::ParseError),
}

/// Build the share payload for `id`. Unknown ids yield `None`, matching
/// the share control's silent behavior; only a malformed page URL is an
/// error. Clipboard and share-sheet interaction stay with the host.
pub fn share_payload(
    posts: &[PostRecord],
    page_url: &str,
    id: u64,
) -> Result<Option<SharePayload>, ShareError> {
    let Some(post) = posts.iter().find(|post| post.id == id) else {
        return Ok(None);
    };

    let mut url = Url::parse(page_url)?;
    url.set_fragment(Some(&format!("post-{id}")));

    Ok(Some(SharePayload {
        title: post.title.clone(),
        text: post.excerpt.clone(),
        url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64) -> PostRecord {
        PostRecord {
            id,
            slug: format!("post-{id}"),
            title: format!("Title {id}"),
            excerpt: format!("Excerpt {id}"),
            category: "news".to_string(),
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
    fn payload_anchors_the_page_url() {
        let posts = vec![post(7)];
        let payload = share_payload(&posts, "https://example.com/blog/", 7)
            .expect("valid url")
            .expect("known id");

        assert_eq!(payload.title, "Title 7");
        assert_eq!(payload.text, "Excerpt 7");
        assert_eq!(payload.url.as_str(), "https://example.com/blog/#post-7");
    }

    #[test]
    fn unknown_id_is_silent() {
        let posts = vec![post(7)];
        let payload = share_payload(&posts, "https://example.com/blog/", 9).expect("valid url");
        assert!(payload.is_none());
    }

    #[test]
    fn malformed_page_url_is_an_error() {
        let posts = vec![post(7)];
        let result = share_payload(&posts, "not a url", 7);
        assert!(matches!(result, Err(ShareError::InvalidPageUrl(_))));
    }
}
