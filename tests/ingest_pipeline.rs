//! The capture path end to end: server-rendered markup (or a JSON
//! manifest) through ingestion into a live controller.

use vetrina::application::listing::ListingController;
use vetrina::application::share;
use vetrina::config::{LogFormat, LoggingSettings};
use vetrina::infra::{fragments, telemetry};
use vetrina::presentation::surface::CommandLog;

fn card(id: u64, category: &str, title: &str, date: &str, views: u64, featured: bool) -> String {
    format!(
        r#"<article class="blog-card" data-id="{id}" data-slug="{slug}"
                data-category="{category}" data-tags="design, موشن"
                data-publish-date="{date}" data-views="{views}"
                data-featured="{featured}">
              <h2 class="blog-title">{title}</h2>
              <p class="blog-excerpt">Excerpt for {title}.</p>
           </article>"#,
        slug = title.to_lowercase().replace(' ', "-"),
    )
}

fn rendered_grid() -> String {
    let cards: Vec<String> = (1..=8)
        .map(|id| {
            card(
                id,
                if id % 2 == 0 { "news" } else { "events" },
                &format!("Post number {id}"),
                &format!("2025-04-{id:02}"),
                id * 11,
                id == 3,
            )
        })
        .collect();
    format!(r#"<div id="blogGrid">{}</div>"#, cards.join("\n"))
}

#[test]
fn markup_feeds_a_working_controller() {
    let records = fragments::from_markup(&rendered_grid()).expect("capture");
    assert_eq!(records.len(), 8);

    let mut listing = ListingController::new(records, CommandLog::new());

    // Newest first over 2025-04-01..08, first page of six.
    assert_eq!(listing.shown_ids(), vec![8, 7, 6, 5, 4, 3]);
    assert!(listing.has_more());

    listing.load_more_now();
    assert_eq!(listing.shown_count(), 8);
    assert!(!listing.surface().load_more_visible());
}

#[test]
fn persian_tags_match_case_insensitive_search() {
    let records = fragments::from_markup(&rendered_grid()).expect("capture");
    let mut listing = ListingController::new(records, CommandLog::new());

    listing.set_search_text("موشن");
    assert_eq!(listing.visible_count(), 8);

    listing.set_search_text("POST NUMBER 4");
    assert_eq!(listing.visible_ids(), vec![4]);
}

#[test]
fn category_controls_line_up_with_captured_values() {
    let records = fragments::from_markup(&rendered_grid()).expect("capture");
    let mut listing = ListingController::new(records, CommandLog::new());

    let categories: Vec<&str> = listing.known_categories().into_iter().collect();
    assert_eq!(categories, vec!["events", "news"]);

    let tags: Vec<&str> = listing.known_tags().into_iter().collect();
    assert_eq!(tags, vec!["design", "موشن"]);

    listing.set_category("events");
    assert_eq!(listing.visible_ids(), vec![7, 5, 3, 1]);
}

#[test]
fn featured_and_slug_queries_survive_the_pipeline() {
    let records = fragments::from_markup(&rendered_grid()).expect("capture");
    let listing = ListingController::new(records, CommandLog::new());

    assert_eq!(listing.featured_ids(), vec![3]);

    let post = listing.find_by_slug("post-number-5").expect("slug lookup");
    assert_eq!(post.id, 5);
}

#[test]
fn share_payload_uses_captured_metadata() {
    let records = fragments::from_markup(&rendered_grid()).expect("capture");
    let listing = ListingController::new(records, CommandLog::new());

    let payload = share::share_payload(listing.posts(), "https://studio.example/blog/", 2)
        .expect("valid page url")
        .expect("known id");

    assert_eq!(payload.title, "Post number 2");
    assert_eq!(payload.url.as_str(), "https://studio.example/blog/#post-2");
}

#[test]
fn manifest_and_markup_capture_agree() {
    let manifest = r#"[
        {"id": 1, "slug": "post-number-1", "title": "Post number 1",
         "excerpt": "Excerpt for Post number 1.", "category": "events",
         "tags": ["design", "موشن"], "publishDate": "2025-04-01",
         "views": 11, "featured": false}
    ]"#;

    let from_manifest = fragments::from_manifest(manifest).expect("manifest");
    let from_markup = fragments::from_markup(&card(
        1,
        "events",
        "Post number 1",
        "2025-04-01",
        11,
        false,
    ))
    .expect("markup");

    assert_eq!(from_manifest, from_markup);
}

#[test]
fn telemetry_installs_exactly_once_per_process() {
    let logging = LoggingSettings {
        level: tracing::level_filters::LevelFilter::WARN,
        format: LogFormat::Compact,
    };

    telemetry::init(&logging).expect("first install succeeds");
    assert!(telemetry::init(&logging).is_err());
}
