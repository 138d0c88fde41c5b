//! The listing controller: a capture-once working set re-rendered as a
//! filtered, sorted, incrementally revealed subset.
//!
//! State transitions are driven by discrete control events (search text,
//! category choice, sort order, load-more triggers) on one logical thread.
//! Page reveals are two-phase so the composition root can insert a
//! cosmetic delay between scheduling and placement: [`ListingController::load_more`]
//! issues a ticket, [`ListingController::commit_reveal`] places the
//! fragments. Every membership or ordering recompute bumps an epoch that
//! invalidates outstanding tickets, so a delayed completion can never
//! resurrect stale content.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::debug;

use crate::config::ListingSettings;
use crate::domain::entities::PostRecord;
use crate::domain::posts;
use crate::domain::types::{CategoryFilter, SortOrder};
use crate::presentation::surface::ListingSurface;
use crate::util::text;

/// Outcome of a pagination trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    /// A ticket was issued; commit it to place the next page.
    Scheduled(RevealTicket),
    /// Everything visible is already shown; the trigger should hide.
    NoMorePages,
    /// Nothing matches the active filters.
    NoResults,
    /// A previous reveal has not committed yet; this trigger is ignored.
    InFlight,
}

/// Outcome of committing a reveal ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Applied { revealed: usize },
    /// The ticket was issued before the latest recompute (or was already
    /// committed) and no longer describes current state.
    Superseded,
}

/// One pending page reveal. Valid only while it extends the pagination
/// cursor it was issued against, under the epoch it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTicket {
    epoch: u64,
    start: usize,
    end: usize,
}

/// Client-side listing state over a fixed working set.
pub struct ListingController<S> {
    working_set: Vec<PostRecord>,
    visible: Vec<usize>,
    shown: usize,
    category: CategoryFilter,
    sort: SortOrder,
    search: String,
    page_size: usize,
    reveal_delay: Duration,
    reveal_in_flight: bool,
    epoch: u64,
    surface: S,
}

impl<S: ListingSurface> ListingController<S> {
    /// Capture the working set and reveal the first page under default
    /// filter state. An empty input surfaces the no-results state; no
    /// other failure is possible.
    pub fn new(records: Vec<PostRecord>, surface: S) -> Self {
        Self::with_settings(records, surface, &ListingSettings::default())
    }

    pub fn with_settings(records: Vec<PostRecord>, surface: S, settings: &ListingSettings) -> Self {
        let mut controller = Self {
            working_set: records,
            visible: Vec::new(),
            shown: 0,
            category: CategoryFilter::All,
            sort: settings.default_sort,
            search: String::new(),
            page_size: settings.page_size.get(),
            reveal_delay: settings.reveal_delay,
            reveal_in_flight: false,
            epoch: 0,
            surface,
        };
        controller.recompute();
        controller
    }

    /// Store the lower-cased search text and re-render from page 1.
    pub fn set_search_text(&mut self, raw: &str) {
        self.search = text::normalize_query(raw);
        debug!(search = %self.search, "search text updated");
        self.recompute();
    }

    /// Store the category filter (`"all"` lifts the restriction) and
    /// re-render from page 1.
    pub fn set_category(&mut self, raw: &str) {
        self.category = CategoryFilter::parse(raw);
        debug!(category = %self.category.as_str(), "category filter updated");
        self.recompute();
    }

    /// Store the sort order and re-render from page 1. Membership is
    /// unchanged; only ordering is.
    pub fn set_sort(&mut self, order: SortOrder) {
        self.sort = order;
        debug!(sort = %self.sort.as_str(), "sort order updated");
        self.recompute();
    }

    /// Flip a record's bookmark flag. Unknown ids are a silent no-op;
    /// visibility, filtering, and ordering are never affected.
    pub fn toggle_bookmark(&mut self, id: u64) -> Option<bool> {
        let Some(post) = self.working_set.iter_mut().find(|post| post.id == id) else {
            debug!(id, "bookmark toggle ignored: unknown id");
            return None;
        };
        post.bookmarked = !post.bookmarked;
        Some(post.bookmarked)
    }

    /// Begin revealing the next page.
    ///
    /// Issues a ticket for the next `min(page_size, remaining)` entries and
    /// holds the reentrancy guard until the ticket commits. Reports
    /// `NoResults` / `NoMorePages` instead when there is nothing to reveal,
    /// updating the surface indicators accordingly.
    pub fn load_more(&mut self) -> LoadMore {
        if self.reveal_in_flight {
            debug!("load-more ignored: reveal in flight");
            return LoadMore::InFlight;
        }
        if self.visible.is_empty() {
            self.surface.set_no_results(true);
            self.surface.set_load_more(false);
            return LoadMore::NoResults;
        }
        if self.shown == self.visible.len() {
            self.surface.set_load_more(false);
            return LoadMore::NoMorePages;
        }

        let end = (self.shown + self.page_size).min(self.visible.len());
        self.reveal_in_flight = true;
        LoadMore::Scheduled(RevealTicket {
            epoch: self.epoch,
            start: self.shown,
            end,
        })
    }

    /// Apply a reveal ticket: append the newly included ids in visible
    /// order, advance the cursor, release the guard, and refresh the
    /// load-more indicator. A ticket from a superseded epoch, or one that
    /// no longer extends the cursor, changes nothing.
    pub fn commit_reveal(&mut self, ticket: RevealTicket) -> Reveal {
        if ticket.epoch != self.epoch || ticket.start != self.shown {
            debug!(
                ticket_epoch = ticket.epoch,
                current_epoch = self.epoch,
                "reveal superseded"
            );
            return Reveal::Superseded;
        }

        let ids: Vec<u64> = self.visible[ticket.start..ticket.end]
            .iter()
            .map(|&index| self.working_set[index].id)
            .collect();
        self.shown = ticket.end;
        self.reveal_in_flight = false;
        self.surface.append(&ids);
        self.surface.set_load_more(self.shown < self.visible.len());
        debug!(
            revealed = ids.len(),
            shown = self.shown,
            visible = self.visible.len(),
            "page revealed"
        );
        Reveal::Applied {
            revealed: ids.len(),
        }
    }

    /// Both reveal phases back to back.
    pub fn load_more_now(&mut self) -> LoadMore {
        let outcome = self.load_more();
        if let LoadMore::Scheduled(ticket) = outcome {
            self.commit_reveal(ticket);
        }
        outcome
    }

    /// Reveal the next page after a cosmetic pause. The pause exists for
    /// perceived smoothness only and carries no correctness weight.
    pub async fn load_more_after(&mut self, delay: Duration) -> LoadMore {
        let outcome = self.load_more();
        if let LoadMore::Scheduled(ticket) = outcome {
            tokio::time::sleep(delay).await;
            self.commit_reveal(ticket);
        }
        outcome
    }

    /// [`Self::load_more_after`] with the configured reveal delay.
    pub async fn load_more_deferred(&mut self) -> LoadMore {
        self.load_more_after(self.reveal_delay).await
    }

    /// Recompute visible membership and order, reset pagination, and
    /// re-render the first page. Always: filter, stable sort, cursor to
    /// zero, epoch bump (dropping any in-flight reveal), clear, reveal.
    fn recompute(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.reveal_in_flight = false;
        self.shown = 0;

        self.visible = self
            .working_set
            .iter()
            .enumerate()
            .filter(|(_, post)| posts::matches_filter(post, &self.category, &self.search))
            .map(|(index, _)| index)
            .collect();

        // sort_by is stable: records comparing equal keep working-set order.
        let order = self.sort;
        let working = &self.working_set;
        self.visible
            .sort_by(|&a, &b| posts::compare(order, &working[a], &working[b]));

        debug!(
            visible = self.visible.len(),
            epoch = self.epoch,
            "visible set recomputed"
        );

        self.surface.clear();
        self.surface.set_no_results(false);
        self.load_more_now();
    }

    pub fn shown_count(&self) -> usize {
        self.shown
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn has_more(&self) -> bool {
        self.shown < self.visible.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Ids of the full visible set, in active sort order.
    pub fn visible_ids(&self) -> Vec<u64> {
        self.visible
            .iter()
            .map(|&index| self.working_set[index].id)
            .collect()
    }

    /// Ids revealed so far, in visible-set order.
    pub fn shown_ids(&self) -> Vec<u64> {
        self.visible[..self.shown]
            .iter()
            .map(|&index| self.working_set[index].id)
            .collect()
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.working_set
    }

    pub fn is_bookmarked(&self, id: u64) -> Option<bool> {
        self.working_set
            .iter()
            .find(|post| post.id == id)
            .map(|post| post.bookmarked)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&PostRecord> {
        posts::find_by_slug(&self.working_set, slug)
    }

    /// Ids of home-page featured posts, newest first.
    pub fn featured_ids(&self) -> Vec<u64> {
        posts::featured(&self.working_set)
            .iter()
            .map(|post| post.id)
            .collect()
    }

    pub fn known_categories(&self) -> BTreeSet<&str> {
        posts::known_categories(&self.working_set)
    }

    pub fn known_tags(&self) -> BTreeSet<&str> {
        posts::known_tags(&self.working_set)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
