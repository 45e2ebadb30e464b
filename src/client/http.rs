// File: src/client/http.rs
use crate::client::backend::EventBackend;
use crate::error::{EventError, EventResult};
use crate::model::{Event, EventDraft, FavoriteEntry, Profile};
use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

#[derive(Deserialize)]
struct EventsEnvelope {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct EventEnvelope {
    event: Event,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    profile: Profile,
}

#[derive(Serialize)]
struct ToggleRequest<'a> {
    mail: &'a str,
    events: [FavoriteEntry; 1],
}

/// JSON-over-HTTP backend talking to the events web service.
///
/// Routes, relative to the base URL:
/// `GET api/events`, `POST api/events`, `GET|PUT|DELETE api/events/{id}`,
/// `GET api/profiles?email=..` and `POST api/profiles` (favourite toggle).
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: HttpsClient,
    base: Url,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> EventResult<Self> {
        let mut base = Url::parse(base_url.trim())
            .map_err(|e| EventError::FetchFailure(format!("invalid backend URL: {}", e)))?;
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        for err in &result.errors {
            log::warn!("Skipping unreadable system certificate: {}", err);
        }
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() && base.scheme() == "https" {
            return Err(EventError::FetchFailure(
                "No valid system certificates found.".to_string(),
            ));
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> EventResult<Url> {
        self.base
            .join(path)
            .map_err(|e| EventError::FetchFailure(format!("invalid endpoint '{}': {}", path, e)))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> EventResult<(StatusCode, Vec<u8>)> {
        log::debug!("{} {}", method, url);
        let req = Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body.unwrap_or_default())
            .map_err(|e| EventError::FetchFailure(e.to_string()))?;

        let exchange = async {
            let resp = self
                .client
                .request(req)
                .await
                .map_err(|e| EventError::FetchFailure(e.to_string()))?;
            let status = resp.status();
            let bytes = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| EventError::FetchFailure(e.to_string()))?
                .to_bytes();
            Ok::<_, EventError>((status, bytes.to_vec()))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(EventError::FetchFailure(format!(
                "{} {} timed out after {}s",
                method,
                url,
                self.timeout.as_secs()
            ))),
        }
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> EventResult<T> {
        serde_json::from_slice(bytes)
            .map_err(|e| EventError::FetchFailure(format!("malformed response: {}", e)))
    }

    fn status_error(status: StatusCode, url: &Url) -> EventError {
        EventError::FetchFailure(format!("HTTP {} from {}", status.as_u16(), url))
    }

    /// `api/events/{id}` with the id percent-encoded as one path segment.
    fn event_url(&self, id: &str) -> EventResult<Url> {
        let mut url = self.endpoint("api/events/")?;
        url.path_segments_mut()
            .map_err(|_| EventError::FetchFailure("backend URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Any method on `api/events/{id}`. A 404 means the id is unknown.
    async fn event_request(&self, method: Method, id: &str) -> EventResult<Vec<u8>> {
        let url = self.event_url(id)?;
        let (status, body) = self.send(method, url.clone(), None).await?;
        match status {
            s if s.is_success() => Ok(body),
            StatusCode::NOT_FOUND => Err(EventError::NotFound(id.to_string())),
            s => Err(Self::status_error(s, &url)),
        }
    }
}

#[async_trait]
impl EventBackend for HttpBackend {
    async fn fetch_all_events(&self) -> EventResult<Vec<Event>> {
        let url = self.endpoint("api/events")?;
        let (status, body) = self.send(Method::GET, url.clone(), None).await?;
        if !status.is_success() {
            return Err(Self::status_error(status, &url));
        }
        let envelope: EventsEnvelope = Self::decode(&body)?;
        Ok(envelope.events)
    }

    async fn fetch_event(&self, id: &str) -> EventResult<Event> {
        let body = self.event_request(Method::GET, id).await?;
        let envelope: EventEnvelope = Self::decode(&body)?;
        Ok(envelope.event)
    }

    async fn fetch_favorites(&self, user: Option<&str>) -> EventResult<Vec<FavoriteEntry>> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };
        let mut url = self.endpoint("api/profiles")?;
        url.query_pairs_mut().append_pair("email", user);

        let (status, body) = self.send(Method::GET, url.clone(), None).await?;
        if status == StatusCode::NOT_FOUND {
            // No profile yet: nothing favourited.
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Self::status_error(status, &url));
        }
        let envelope: ProfileEnvelope = Self::decode(&body)?;
        Ok(envelope.profile.events)
    }

    async fn toggle_favorite(
        &self,
        user: &str,
        entry: FavoriteEntry,
    ) -> EventResult<Vec<FavoriteEntry>> {
        let url = self.endpoint("api/profiles")?;
        let payload = serde_json::to_string(&ToggleRequest {
            mail: user,
            events: [entry],
        })
        .map_err(|e| EventError::FetchFailure(e.to_string()))?;

        let (status, body) = self.send(Method::POST, url.clone(), Some(payload)).await?;
        if !status.is_success() {
            return Err(Self::status_error(status, &url));
        }
        let envelope: ProfileEnvelope = Self::decode(&body)?;
        Ok(envelope.profile.events)
    }

    async fn submit_event_proposal(&self, draft: EventDraft) -> EventResult<Event> {
        let event = draft.into_event()?;
        let url = self.endpoint("api/events")?;
        let payload =
            serde_json::to_string(&event).map_err(|e| EventError::FetchFailure(e.to_string()))?;

        let (status, body) = self.send(Method::POST, url.clone(), Some(payload)).await?;
        if !status.is_success() {
            return Err(Self::status_error(status, &url));
        }
        let envelope: EventEnvelope = Self::decode(&body)?;
        Ok(envelope.event)
    }

    async fn publish_event(&self, id: &str) -> EventResult<()> {
        self.event_request(Method::PUT, id).await.map(drop)
    }

    async fn remove_event(&self, id: &str) -> EventResult<()> {
        self.event_request(Method::DELETE, id).await.map(drop)
    }
}
