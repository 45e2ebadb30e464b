//! Per-page listing state.
//!
//! A session moves `Idle -> Loading -> Ready` on the first catalog fetch and
//! then stays `Ready`, recomputing the filtered list and resetting the
//! pagination window synchronously on every criteria change. A failed fetch
//! also lands in `Ready`, with an empty catalog and a user-visible message.
//!
//! Fetches are tagged with a [`LoadTicket`]. Completing a load with a ticket
//! from a superseded request (a newer load started, or the session was
//! detached) is a no-op, so a slow stale response can never overwrite newer
//! state.
use crate::error::EventResult;
use crate::filter::{DateShortcut, DateWindow, FilterCriteria, ListingPage};
use crate::model::{Event, FavoriteEntry};
use crate::pagination::PaginationWindow;
use crate::store::{EventStore, FavoritesIndex};
use chrono::NaiveDate;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct ListingSession {
    page: ListingPage,
    state: LoadState,
    store: EventStore,
    criteria: FilterCriteria,
    filtered: Vec<Event>,
    window: PaginationWindow,
    favorites: FavoritesIndex,
    message: Option<String>,
    catalog_generation: u64,
    favorites_generation: u64,
}

impl ListingSession {
    pub fn new(page: ListingPage, page_size: usize) -> Self {
        Self {
            page,
            state: LoadState::Idle,
            store: EventStore::default(),
            criteria: FilterCriteria::default(),
            filtered: Vec::new(),
            window: PaginationWindow::new(page_size, page.pagination()),
            favorites: FavoritesIndex::default(),
            message: None,
            catalog_generation: 0,
            favorites_generation: 0,
        }
    }

    // --- Loading ---

    pub fn begin_catalog_load(&mut self) -> LoadTicket {
        self.catalog_generation += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.catalog_generation,
        }
    }

    /// Applies a catalog fetch result. Returns false if the ticket was stale.
    pub fn finish_catalog_load(
        &mut self,
        ticket: LoadTicket,
        result: EventResult<Vec<Event>>,
    ) -> bool {
        if ticket.generation != self.catalog_generation {
            log::debug!(
                "Discarding stale catalog response (gen {} < {})",
                ticket.generation,
                self.catalog_generation
            );
            return false;
        }

        match result {
            Ok(events) => {
                log::info!("{} page: loaded {} events", self.page, events.len());
                self.store = EventStore::new(events);
                self.message = None;
            }
            Err(e) => {
                log::warn!("{} page: catalog fetch failed: {}", self.page, e);
                self.store = EventStore::default();
                self.message = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.state = LoadState::Ready;
        self.recompute();
        true
    }

    pub fn begin_favorites_load(&mut self) -> LoadTicket {
        self.favorites_generation += 1;
        LoadTicket {
            generation: self.favorites_generation,
        }
    }

    /// Applies a favourites fetch. Failures keep the previous set and are only logged.
    pub fn finish_favorites_load(
        &mut self,
        ticket: LoadTicket,
        result: EventResult<Vec<FavoriteEntry>>,
    ) -> bool {
        if ticket.generation != self.favorites_generation {
            log::debug!("Discarding stale favourites response");
            return false;
        }
        match result {
            Ok(entries) => self.favorites = FavoritesIndex::new(&entries),
            Err(e) => log::warn!("Favourites fetch failed: {}", e),
        }
        true
    }

    /// Replaces favourites with an authoritative list (e.g. after a toggle).
    /// Any favourites fetch still in flight is superseded.
    pub fn set_favorites(&mut self, entries: &[FavoriteEntry]) {
        self.favorites_generation += 1;
        self.favorites = FavoritesIndex::new(entries);
    }

    /// Invalidates every outstanding ticket, e.g. when the page goes away.
    pub fn detach(&mut self) {
        self.catalog_generation += 1;
        self.favorites_generation += 1;
    }

    // --- Criteria ---

    pub fn set_search_query(&mut self, query: &str) {
        self.criteria.search_query = query.to_string();
        self.recompute();
    }

    pub fn set_free_only(&mut self, free_only: bool) {
        self.criteria.free_only = free_only;
        self.recompute();
    }

    pub fn toggle_free_only(&mut self) {
        self.set_free_only(!self.criteria.free_only);
    }

    pub fn set_date_window(&mut self, window: DateWindow) {
        self.criteria.date_window = window;
        self.recompute();
    }

    /// Selects a quick date filter, or clears it if it is the active one.
    pub fn toggle_date_shortcut(&mut self, shortcut: DateShortcut, today: NaiveDate) {
        self.criteria.toggle_date_window(shortcut.resolve(today));
        self.recompute();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    // --- Pagination ---

    pub fn show_more(&mut self) {
        self.window.advance();
    }

    pub fn show_all(&mut self) {
        self.window.show_all();
    }

    fn recompute(&mut self) {
        self.filtered = self.store.filter(&self.criteria, self.page);
        self.window.reset(self.filtered.len());
    }

    // --- Accessors ---

    pub fn page(&self) -> ListingPage {
        self.page
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Event] {
        &self.filtered
    }

    pub fn visible(&self) -> &[Event] {
        self.window.slice(&self.filtered)
    }

    pub fn window(&self) -> &PaginationWindow {
        &self.window
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn favorites(&self) -> &FavoritesIndex {
        &self.favorites
    }

    pub fn is_favorite(&self, event: &Event) -> bool {
        self.favorites.contains(event)
    }
}
