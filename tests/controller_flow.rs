// Tests for ListingController against an in-memory backend with controllable latency.
mod common;

use async_trait::async_trait;
use common::{owned_titles, sagra_and_concerto};
use eventdeck::client::EventBackend;
use eventdeck::controller::ListingController;
use eventdeck::error::{EventError, EventResult};
use eventdeck::filter::ListingPage;
use eventdeck::model::{Event, EventDraft, FavoriteEntry};
use eventdeck::session::{LOAD_FAILED_MESSAGE, LoadState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Each catalog fetch pops the next scripted response (delay, result).
#[derive(Debug, Default)]
struct ScriptedBackend {
    catalog: Mutex<VecDeque<(Duration, EventResult<Vec<Event>>)>>,
    favorites: Mutex<Vec<FavoriteEntry>>,
    favorites_fail: bool,
    submitted: Mutex<Vec<EventDraft>>,
}

impl ScriptedBackend {
    fn with_catalog(responses: Vec<(Duration, EventResult<Vec<Event>>)>) -> Self {
        Self {
            catalog: Mutex::new(responses.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl EventBackend for ScriptedBackend {
    async fn fetch_all_events(&self) -> EventResult<Vec<Event>> {
        let next = self.catalog.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_event(&self, id: &str) -> EventResult<Event> {
        Err(EventError::NotFound(id.to_string()))
    }

    async fn fetch_favorites(&self, user: Option<&str>) -> EventResult<Vec<FavoriteEntry>> {
        if self.favorites_fail {
            return Err(EventError::FetchFailure("profiles down".into()));
        }
        Ok(match user {
            Some(_) => self.favorites.lock().unwrap().clone(),
            None => Vec::new(),
        })
    }

    async fn toggle_favorite(
        &self,
        _user: &str,
        entry: FavoriteEntry,
    ) -> EventResult<Vec<FavoriteEntry>> {
        let mut favs = self.favorites.lock().unwrap();
        if let Some(idx) = favs.iter().position(|f| f.same_event(&entry)) {
            favs.remove(idx);
        } else {
            favs.push(entry);
        }
        Ok(favs.clone())
    }

    async fn submit_event_proposal(&self, draft: EventDraft) -> EventResult<Event> {
        self.submitted.lock().unwrap().push(draft.clone());
        let mut event = draft.into_event()?;
        event.id = "new".into();
        Ok(event)
    }

    async fn publish_event(&self, _id: &str) -> EventResult<()> {
        Ok(())
    }

    async fn remove_event(&self, _id: &str) -> EventResult<()> {
        Ok(())
    }
}

fn controller(backend: ScriptedBackend, user: Option<&str>) -> (ListingController, Arc<ScriptedBackend>) {
    let backend = Arc::new(backend);
    let ctrl = ListingController::new(
        ListingPage::Home,
        12,
        backend.clone(),
        user.map(str::to_string),
    );
    (ctrl, backend)
}

#[tokio::test]
async fn test_load_populates_session() {
    let (ctrl, _) = controller(
        ScriptedBackend::with_catalog(vec![(Duration::ZERO, Ok(sagra_and_concerto()))]),
        None,
    );
    assert!(ctrl.load().await);
    let session = ctrl.session.lock().await;
    assert_eq!(session.state(), LoadState::Ready);
    assert_eq!(owned_titles(session.visible()), vec!["Sagra", "Concerto"]);
}

#[tokio::test]
async fn test_slow_stale_response_does_not_overwrite_newer_state() {
    let stale = vec![Event {
        id: "old".into(),
        title: Some("Vecchio".into()),
        reviewed: Some(true),
        ..Default::default()
    }];
    let (ctrl, _) = controller(
        ScriptedBackend::with_catalog(vec![
            (Duration::from_millis(200), Ok(stale)),
            (Duration::ZERO, Ok(sagra_and_concerto())),
        ]),
        None,
    );

    let slow = {
        let ctrl = ctrl.clone();
        tokio::spawn(async move { ctrl.load().await })
    };
    // Let the slow load take its ticket and start waiting.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(ctrl.load().await);
    assert!(!slow.await.unwrap());

    let session = ctrl.session.lock().await;
    assert_eq!(owned_titles(session.filtered()), vec!["Sagra", "Concerto"]);
}

#[tokio::test]
async fn test_detach_discards_in_flight_load() {
    let (ctrl, _) = controller(
        ScriptedBackend::with_catalog(vec![(Duration::from_millis(100), Ok(sagra_and_concerto()))]),
        None,
    );
    let pending = {
        let ctrl = ctrl.clone();
        tokio::spawn(async move { ctrl.load().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    ctrl.detach().await;

    assert!(!pending.await.unwrap());
    assert!(ctrl.session.lock().await.filtered().is_empty());
}

#[tokio::test]
async fn test_criteria_changes_during_load_are_not_blocked() {
    let (ctrl, _) = controller(
        ScriptedBackend::with_catalog(vec![(Duration::from_millis(100), Ok(sagra_and_concerto()))]),
        None,
    );
    let pending = {
        let ctrl = ctrl.clone();
        tokio::spawn(async move { ctrl.load().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    ctrl.set_search_query("conc").await;
    assert!(pending.await.unwrap());

    // The arriving catalog is filtered with the criteria set meanwhile.
    assert_eq!(owned_titles(&ctrl.visible().await), vec!["Concerto"]);
}

#[tokio::test]
async fn test_fetch_failure_shows_message() {
    let (ctrl, _) = controller(
        ScriptedBackend::with_catalog(vec![(
            Duration::ZERO,
            Err(EventError::FetchFailure("offline".into())),
        )]),
        None,
    );
    ctrl.load().await;
    let session = ctrl.session.lock().await;
    assert_eq!(session.state(), LoadState::Ready);
    assert_eq!(session.message(), Some(LOAD_FAILED_MESSAGE));
    assert!(session.visible().is_empty());
}

#[tokio::test]
async fn test_favorites_failure_does_not_fail_listing() {
    let backend = ScriptedBackend {
        favorites_fail: true,
        ..ScriptedBackend::with_catalog(vec![(Duration::ZERO, Ok(sagra_and_concerto()))])
    };
    let (ctrl, _) = controller(backend, Some("anna@example.org"));
    assert!(ctrl.load().await);
    let session = ctrl.session.lock().await;
    assert_eq!(session.filtered().len(), 2);
    assert!(session.message().is_none());
    assert!(session.favorites().is_empty());
}

#[tokio::test]
async fn test_toggle_favorite_round_trip() {
    let (ctrl, backend) = controller(
        ScriptedBackend::with_catalog(vec![(Duration::ZERO, Ok(sagra_and_concerto()))]),
        Some("anna@example.org"),
    );
    ctrl.load().await;

    assert!(ctrl.toggle_favorite("sagra").await.unwrap());
    assert_eq!(backend.favorites.lock().unwrap().len(), 1);
    {
        let session = ctrl.session.lock().await;
        assert!(session.is_favorite(&session.filtered()[0]));
    }

    assert!(!ctrl.toggle_favorite("sagra").await.unwrap());
    assert!(backend.favorites.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_favorite_requires_user_and_known_event() {
    let (anonymous, _) = controller(
        ScriptedBackend::with_catalog(vec![(Duration::ZERO, Ok(sagra_and_concerto()))]),
        None,
    );
    anonymous.load().await;
    assert_eq!(
        anonymous.toggle_favorite("sagra").await,
        Err(EventError::Unauthenticated)
    );

    let (signed_in, _) = controller(
        ScriptedBackend::with_catalog(vec![(Duration::ZERO, Ok(sagra_and_concerto()))]),
        Some("anna@example.org"),
    );
    signed_in.load().await;
    assert_eq!(
        signed_in.toggle_favorite("missing").await,
        Err(EventError::NotFound("missing".into()))
    );
}

#[tokio::test]
async fn test_invalid_proposal_never_reaches_backend() {
    let (ctrl, backend) = controller(ScriptedBackend::default(), None);
    let draft = EventDraft {
        title: "Sagra".into(),
        ..Default::default()
    };
    let err = ctrl.submit_proposal(draft).await.unwrap_err();
    match err {
        EventError::ValidationFailure { missing } => {
            assert_eq!(
                missing,
                vec!["location", "description", "dateStart", "dateEnd", "price", "category"]
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(backend.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_valid_proposal_is_pending() {
    let (ctrl, backend) = controller(ScriptedBackend::default(), None);
    let draft = EventDraft {
        title: "Sagra".into(),
        location: "Piazza".into(),
        description: "Cibo e musica".into(),
        date_start: "2024-06-10".into(),
        date_end: "2024-06-12".into(),
        price: "0".into(),
        category: "foods".into(),
        ..Default::default()
    };
    let event = ctrl.submit_proposal(draft).await.unwrap();
    assert_eq!(event.reviewed, Some(false));
    assert_eq!(event.date_start.as_deref(), Some("10-06-2024"));
    assert_eq!(backend.submitted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_refresh_favorites_picks_up_remote_changes() {
    let (ctrl, backend) = controller(
        ScriptedBackend::with_catalog(vec![(Duration::ZERO, Ok(sagra_and_concerto()))]),
        Some("anna@example.org"),
    );
    assert_eq!(ctrl.user(), Some("anna@example.org"));
    ctrl.load().await;
    assert!(ctrl.session.lock().await.favorites().is_empty());

    // Favourited from another device after the page was loaded.
    backend.favorites.lock().unwrap().push(FavoriteEntry {
        id: Some("concerto".into()),
        title: "Concerto".into(),
        ..Default::default()
    });
    assert!(ctrl.refresh_favorites().await);

    let session = ctrl.session.lock().await;
    let concerto = session
        .filtered()
        .iter()
        .find(|e| e.id == "concerto")
        .cloned()
        .unwrap();
    assert!(session.is_favorite(&concerto));
}

#[tokio::test]
async fn test_favorites_list_requires_user() {
    let (anonymous, _) = controller(ScriptedBackend::default(), None);
    assert_eq!(anonymous.user(), None);
    assert_eq!(anonymous.favorites().await, Err(EventError::Unauthenticated));

    let backend = ScriptedBackend::default();
    backend.favorites.lock().unwrap().push(FavoriteEntry {
        title: "Sagra".into(),
        ..Default::default()
    });
    let (signed_in, _) = controller(backend, Some("anna@example.org"));
    let favorites = signed_in.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title, "Sagra");
}
