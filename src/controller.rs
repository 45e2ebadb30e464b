// File: src/controller.rs
//! Listing workflows over a backend.
//!
//! `ListingController` owns one page's [`ListingSession`] behind a tokio mutex
//! and coordinates it with the [`EventBackend`]. The lock is never held across
//! a backend call: each fetch takes a ticket, releases the lock, awaits the
//! backend, and re-locks to apply the result, so criteria changes made while a
//! fetch is in flight are never blocked.
use crate::client::EventBackend;
use crate::error::{EventError, EventResult};
use crate::filter::{DateShortcut, DateWindow, FilterCriteria, ListingPage};
use crate::model::{Event, EventDraft, FavoriteEntry};
use crate::session::ListingSession;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct ListingController {
    pub session: Arc<Mutex<ListingSession>>,
    pub backend: Arc<dyn EventBackend>,
    user: Option<String>,
}

impl ListingController {
    pub fn new(
        page: ListingPage,
        page_size: usize,
        backend: Arc<dyn EventBackend>,
        user: Option<String>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(ListingSession::new(page, page_size))),
            backend,
            user,
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Fetches the catalog and the user's favourites concurrently.
    ///
    /// The catalog result decides the session state; a favourites failure is
    /// only logged. Returns false if the catalog response was superseded.
    pub async fn load(&self) -> bool {
        let (catalog_ticket, favorites_ticket) = {
            let mut session = self.session.lock().await;
            (session.begin_catalog_load(), session.begin_favorites_load())
        };

        let (catalog, favorites) = futures::future::join(
            self.backend.fetch_all_events(),
            self.backend.fetch_favorites(self.user.as_deref()),
        )
        .await;

        let mut session = self.session.lock().await;
        session.finish_favorites_load(favorites_ticket, favorites);
        session.finish_catalog_load(catalog_ticket, catalog)
    }

    /// Re-fetches favourites only, e.g. after signing in.
    pub async fn refresh_favorites(&self) -> bool {
        let ticket = self.session.lock().await.begin_favorites_load();
        let result = self.backend.fetch_favorites(self.user.as_deref()).await;
        self.session
            .lock()
            .await
            .finish_favorites_load(ticket, result)
    }

    /// The signed-in user's favourites, as listed on their profile.
    pub async fn favorites(&self) -> EventResult<Vec<FavoriteEntry>> {
        let user = self.user.as_deref().ok_or(EventError::Unauthenticated)?;
        self.backend.fetch_favorites(Some(user)).await
    }

    /// Adds or removes an event from the user's favourites.
    ///
    /// Returns whether the event is a favourite afterwards.
    pub async fn toggle_favorite(&self, event_id: &str) -> EventResult<bool> {
        let Some(user) = self.user.as_deref() else {
            return Err(EventError::Unauthenticated);
        };
        let event = self
            .session
            .lock()
            .await
            .store()
            .get(event_id)
            .cloned()
            .ok_or_else(|| EventError::NotFound(event_id.to_string()))?;

        let entries: Vec<FavoriteEntry> = self
            .backend
            .toggle_favorite(user, event.favorite_entry())
            .await?;

        let mut session = self.session.lock().await;
        session.set_favorites(&entries);
        Ok(session.is_favorite(&event))
    }

    /// Validates locally before anything is sent.
    pub async fn submit_proposal(&self, draft: EventDraft) -> EventResult<Event> {
        draft.validate()?;
        let event = self.backend.submit_event_proposal(draft).await?;
        log::info!(
            "Proposal '{}' submitted for review",
            event.title_or_default()
        );
        Ok(event)
    }

    // --- Criteria passthroughs ---

    pub async fn set_search_query(&self, query: &str) {
        self.session.lock().await.set_search_query(query);
    }

    pub async fn set_free_only(&self, free_only: bool) {
        self.session.lock().await.set_free_only(free_only);
    }

    pub async fn toggle_free_only(&self) {
        self.session.lock().await.toggle_free_only();
    }

    pub async fn set_date_window(&self, window: DateWindow) {
        self.session.lock().await.set_date_window(window);
    }

    pub async fn toggle_date_shortcut(&self, shortcut: DateShortcut) {
        self.toggle_date_shortcut_on(shortcut, Local::now().date_naive())
            .await;
    }

    pub async fn toggle_date_shortcut_on(&self, shortcut: DateShortcut, today: NaiveDate) {
        self.session
            .lock()
            .await
            .toggle_date_shortcut(shortcut, today);
    }

    pub async fn set_criteria(&self, criteria: FilterCriteria) {
        self.session.lock().await.set_criteria(criteria);
    }

    pub async fn reset_filters(&self) {
        self.session.lock().await.reset_filters();
    }

    pub async fn show_more(&self) {
        self.session.lock().await.show_more();
    }

    pub async fn show_all(&self) {
        self.session.lock().await.show_all();
    }

    /// Drops interest in any fetch still in flight.
    pub async fn detach(&self) {
        self.session.lock().await.detach();
    }

    /// The events currently on screen.
    pub async fn visible(&self) -> Vec<Event> {
        self.session.lock().await.visible().to_vec()
    }
}
