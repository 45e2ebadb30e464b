// File: src/client/local.rs
use crate::client::backend::EventBackend;
use crate::context::SharedContext;
use crate::error::{EventError, EventResult};
use crate::model::{Event, EventDraft, FavoriteEntry, Profile};
use crate::storage::LocalStorage;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use uuid::Uuid;

/// Accepted shapes for an import file: a bare array, or the `{ "events": [..] }`
/// envelope served by `GET /api/events`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Bare(Vec<Event>),
    Envelope { events: Vec<Event> },
}

/// Backend over the JSON files in the data directory.
///
/// Used when no `backend_url` is configured, and by tests.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    ctx: SharedContext,
}

impl LocalBackend {
    pub fn new(ctx: SharedContext) -> Self {
        Self { ctx }
    }

    /// Replaces the whole catalog, e.g. to seed a fresh data directory.
    pub fn import_events(&self, mut events: Vec<Event>) -> EventResult<usize> {
        for event in &mut events {
            if event.id.is_empty() {
                event.id = Uuid::new_v4().to_string();
            }
        }
        LocalStorage::save_events(self.ctx.as_ref(), &events)?;
        Ok(events.len())
    }

    /// Reads events from a JSON file and replaces the catalog with them.
    pub fn import_file(&self, path: &Path) -> EventResult<usize> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file {:?}", path))?;
        let events = match serde_json::from_str::<ImportFile>(&raw)
            .with_context(|| format!("{:?} is not an event list", path))?
        {
            ImportFile::Bare(events) | ImportFile::Envelope { events } => events,
        };
        let count = self.import_events(events)?;
        log::info!("Imported {} events from {:?}", count, path);
        Ok(count)
    }

    fn modify_event<F>(&self, id: &str, f: F) -> EventResult<()>
    where
        F: FnOnce(&mut Vec<Event>, usize),
    {
        let path = LocalStorage::events_path(self.ctx.as_ref())?;
        let found = LocalStorage::modify_items(&path, |events: &mut Vec<Event>| {
            Ok(events.iter().position(|e| e.id == id).map(|idx| f(events, idx)))
        })?;
        found.ok_or_else(|| EventError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl EventBackend for LocalBackend {
    async fn fetch_all_events(&self) -> EventResult<Vec<Event>> {
        Ok(LocalStorage::load_events(self.ctx.as_ref())?)
    }

    async fn fetch_event(&self, id: &str) -> EventResult<Event> {
        LocalStorage::load_events(self.ctx.as_ref())?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EventError::NotFound(id.to_string()))
    }

    async fn fetch_favorites(&self, user: Option<&str>) -> EventResult<Vec<FavoriteEntry>> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };
        let profiles = LocalStorage::load_profiles(self.ctx.as_ref())?;
        Ok(profiles
            .into_iter()
            .find(|p| p.mail == user)
            .map(|p| p.events)
            .unwrap_or_default())
    }

    async fn toggle_favorite(
        &self,
        user: &str,
        entry: FavoriteEntry,
    ) -> EventResult<Vec<FavoriteEntry>> {
        let path = LocalStorage::profiles_path(self.ctx.as_ref())?;
        let events = LocalStorage::modify_items(&path, |profiles: &mut Vec<Profile>| {
            let idx = match profiles.iter().position(|p| p.mail == user) {
                Some(idx) => idx,
                None => {
                    profiles.push(Profile::new(user));
                    profiles.len() - 1
                }
            };
            let added = profiles[idx].toggle(entry);
            log::debug!(
                "Favourite {} for {}",
                if added { "added" } else { "removed" },
                user
            );
            Ok(profiles[idx].events.clone())
        })?;
        Ok(events)
    }

    async fn submit_event_proposal(&self, draft: EventDraft) -> EventResult<Event> {
        let mut event = draft.into_event()?;
        event.id = Uuid::new_v4().to_string();
        event.reviewed = Some(false);

        let path = LocalStorage::events_path(self.ctx.as_ref())?;
        let stored = event.clone();
        LocalStorage::modify_items(&path, move |events: &mut Vec<Event>| {
            events.push(stored);
            Ok(())
        })?;
        log::info!("Stored proposal '{}' as {}", event.title_or_default(), event.id);
        Ok(event)
    }

    async fn publish_event(&self, id: &str) -> EventResult<()> {
        self.modify_event(id, |events, idx| events[idx].reviewed = Some(true))
    }

    async fn remove_event(&self, id: &str) -> EventResult<()> {
        self.modify_event(id, |events, idx| {
            events.remove(idx);
        })
    }
}
