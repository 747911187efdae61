use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::SearchApi;
use crate::config::AppConfig;

use super::events::AppEvent;

/// Centralized handle to the backend service client.
///
/// Created once at startup, then passed by ref to views. Clone-able fields
/// are cloned into spawned fetch tasks.
pub struct Services {
    pub api: SearchApi,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize the service client from config.
    ///
    /// Failure here is fatal — the client cannot run without a valid base
    /// URL.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let api = SearchApi::new(
            &config.search.base_url,
            Duration::from_secs(config.search.request_timeout_secs),
        )?;
        log::info!("search API client initialized for {}", config.search.base_url);

        Ok(Self { api, event_tx })
    }
}
