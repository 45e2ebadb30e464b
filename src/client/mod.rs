// File: ./src/client/mod.rs
pub mod backend;
pub mod http;
pub mod local;

pub use crate::client::backend::EventBackend;
pub use crate::client::http::HttpBackend;
pub use crate::client::local::LocalBackend;

use crate::config::Config;
use crate::context::SharedContext;
use crate::error::EventResult;
use std::sync::Arc;

/// Picks the HTTP backend when a URL is configured, the local files otherwise.
pub fn backend_from_config(
    config: &Config,
    ctx: SharedContext,
) -> EventResult<Arc<dyn EventBackend>> {
    match config.backend_url() {
        Some(url) => {
            log::info!("Using events service at {}", url);
            Ok(Arc::new(HttpBackend::new(url, config.request_timeout())?))
        }
        None => {
            log::info!("No backend_url configured, using local data");
            Ok(Arc::new(LocalBackend::new(ctx)))
        }
    }
}
