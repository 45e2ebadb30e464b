// File: src/store.rs
use crate::filter::{FilterCriteria, ListingPage, apply_criteria};
use crate::model::{Event, FavoriteEntry};
use std::collections::HashSet;
use std::sync::Arc;

/// The catalog fetched for the current session.
///
/// Immutable once built; a refresh replaces the whole store. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Arc<[Event]>,
}

impl EventStore {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    // --- Read/Filter Logic ---

    pub fn filter(&self, criteria: &FilterCriteria, page: ListingPage) -> Vec<Event> {
        apply_criteria(&self.events, criteria, page)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The moderation queue: events explicitly awaiting review, in catalog order.
    pub fn pending_review(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.reviewed == Some(false))
            .collect()
    }

    /// Up to `count` random published events for the home page highlights.
    ///
    /// Only events with `reviewed == true` qualify; legacy events are left out.
    pub fn highlights(&self, count: usize, rng: &mut fastrand::Rng) -> Vec<&Event> {
        let mut published: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.reviewed == Some(true))
            .collect();
        rng.shuffle(&mut published);
        published.truncate(count);
        published
    }
}

/// Membership set over a user's favourites. Display-only; never filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesIndex {
    ids: HashSet<String>,
    // Titles of entries stored without an id.
    loose_titles: HashSet<String>,
    all_titles: HashSet<String>,
    count: usize,
}

impl FavoritesIndex {
    pub fn new(entries: &[FavoriteEntry]) -> Self {
        let mut index = Self {
            count: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            index.all_titles.insert(entry.title.clone());
            match &entry.id {
                Some(id) => {
                    index.ids.insert(id.clone());
                }
                None => {
                    index.loose_titles.insert(entry.title.clone());
                }
            }
        }
        index
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Ids are compared when both sides carry one, titles otherwise.
    pub fn contains(&self, event: &Event) -> bool {
        if !event.id.is_empty() && self.ids.contains(&event.id) {
            return true;
        }
        let Some(title) = event.title.as_ref() else {
            return false;
        };
        if event.id.is_empty() {
            self.all_titles.contains(title)
        } else {
            self.loose_titles.contains(title)
        }
    }
}
