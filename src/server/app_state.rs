use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::{
    client::gemini_client::GeminiClient, config::config::GeminiConfig, server::error::ServerError,
};

pub struct AppState {
    client: Client,
    gemini: GeminiClient,
}

impl AppState {
    pub fn from_config(config: &GeminiConfig) -> Result<Arc<Self>, ServerError> {
        Self::with_gemini_client(GeminiClient::from_config(config), config.timeout_secs)
    }

    /// Zero `timeout_secs` leaves the outbound call unbounded.
    pub fn with_gemini_client(
        gemini: GeminiClient,
        timeout_secs: u64,
    ) -> Result<Arc<Self>, ServerError> {
        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        let client = builder.build()?;

        Ok(Arc::new(Self { client, gemini }))
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }

    pub fn get_gemini_client(&self) -> &GeminiClient {
        &self.gemini
    }
}
