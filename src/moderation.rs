// File: src/moderation.rs
use crate::client::EventBackend;
use crate::error::EventResult;
use crate::model::Event;
use crate::store::EventStore;
use std::sync::Arc;

/// The review queue: every event still awaiting moderation.
///
/// Unlike the public listings this view works on the unfiltered catalog.
/// Publishing or removing an event drops it from the queue locally on success,
/// without a refetch.
#[derive(Debug, Clone)]
pub struct ModerationDashboard {
    backend: Arc<dyn EventBackend>,
    pending: Vec<Event>,
    message: Option<String>,
}

impl ModerationDashboard {
    pub fn new(backend: Arc<dyn EventBackend>) -> Self {
        Self {
            backend,
            pending: Vec::new(),
            message: None,
        }
    }

    pub async fn refresh(&mut self) -> EventResult<usize> {
        match self.backend.fetch_all_events().await {
            Ok(events) => {
                let store = EventStore::new(events);
                self.pending = store.pending_review().into_iter().cloned().collect();
                self.message = None;
                log::info!("{} events awaiting review", self.pending.len());
                Ok(self.pending.len())
            }
            Err(e) => {
                log::warn!("Moderation queue fetch failed: {}", e);
                self.pending.clear();
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn publish(&mut self, id: &str) -> EventResult<()> {
        let result = self.backend.publish_event(id).await;
        self.settle(id, "publish", result)
    }

    pub async fn remove(&mut self, id: &str) -> EventResult<()> {
        let result = self.backend.remove_event(id).await;
        self.settle(id, "remove", result)
    }

    fn settle(&mut self, id: &str, action: &str, result: EventResult<()>) -> EventResult<()> {
        match result {
            Ok(()) => {
                self.pending.retain(|e| e.id != id);
                self.message = None;
                log::info!("Moderation: {} {}", action, id);
                Ok(())
            }
            Err(e) => {
                log::warn!("Moderation: {} {} failed: {}", action, id, e);
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn pending(&self) -> &[Event] {
        &self.pending
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
