// File: src/client/backend.rs
use crate::error::EventResult;
use crate::model::{Event, EventDraft, FavoriteEntry};
use async_trait::async_trait;

/// The remote collaborator behind every listing and the moderation dashboard.
///
/// Implementations only move data. Filtering, pagination and favourite
/// membership are computed client-side from what these calls return.
#[async_trait]
pub trait EventBackend: Send + Sync + std::fmt::Debug {
    /// The full catalog, unfiltered and unpaginated, in backend order.
    async fn fetch_all_events(&self) -> EventResult<Vec<Event>>;

    /// One event by id, whatever its review state. Unknown ids give `NotFound`.
    async fn fetch_event(&self, id: &str) -> EventResult<Event>;

    /// Favourites of the signed-in user. `None` yields an empty list.
    async fn fetch_favorites(&self, user: Option<&str>) -> EventResult<Vec<FavoriteEntry>>;

    /// Adds or removes `entry` from the user's favourites and returns the updated list.
    async fn toggle_favorite(
        &self,
        user: &str,
        entry: FavoriteEntry,
    ) -> EventResult<Vec<FavoriteEntry>>;

    /// Stores a proposal pending moderation. The returned event carries its new id.
    async fn submit_event_proposal(&self, draft: EventDraft) -> EventResult<Event>;

    /// Marks a pending event as reviewed so it shows up in listings.
    async fn publish_event(&self, id: &str) -> EventResult<()>;

    async fn remove_event(&self, id: &str) -> EventResult<()>;
}
