use std::env;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{client::gemini_client_error::GeminiClientError, config::config::GeminiConfig};

static API_KEY_HEADER: &str = "X-goog-api-key";
static BODY_NOT_AVAILABLE: &str = "[Body not available]";

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn single_turn(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

static FIRST_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// First text part of the first candidate. Any other shape yields `None`.
pub fn first_text(envelope: &Value) -> Option<&str> {
    envelope.pointer(FIRST_TEXT_POINTER)?.as_str()
}

/// Where the API key is looked up on each request.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    /// Name of an environment variable, read on every call so a key added
    /// later is picked up without a restart.
    Env(String),
    Fixed(Option<String>),
}

impl ApiKeySource {
    fn lookup(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => env::var(var).ok(),
            ApiKeySource::Fixed(key) => key.clone(),
        };

        key.filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    endpoint: String,
    api_key: ApiKeySource,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>, api_key: ApiKeySource) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(
            &config.endpoint,
            ApiKeySource::Env(config.api_key_var.clone()),
        )
    }

    pub fn api_key(&self) -> Option<String> {
        self.api_key.lookup()
    }

    /// Sends a single-turn prompt and returns the first text part of the
    /// first candidate.
    pub async fn generate_text(
        &self,
        client: &Client,
        prompt: &str,
    ) -> Result<String, GeminiClientError> {
        let api_key = self.api_key().ok_or(GeminiClientError::MissingApiKey)?;
        let payload = GenerateContentRequest::single_turn(prompt);

        debug!("Gemini request: {:?}", payload);
        let response = client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header(API_KEY_HEADER, api_key)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(map_transport_error(e)),
            Err(_) => BODY_NOT_AVAILABLE.into(),
        };

        if !status.is_success() {
            error!("Gemini API error: {} - {}", status, body);
            return Err(GeminiClientError::ApiError(status, body));
        }

        let envelope: Value = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("Gemini raw response (not JSON): {} - {}", e, body);
                return Err(GeminiClientError::Envelope(body));
            }
        };

        let Some(text) = first_text(&envelope) else {
            error!("Gemini response had no candidate text: {}", body);
            return Err(GeminiClientError::MissingText(body));
        };

        info!("Gemini responded with {} characters", text.len());
        Ok(text.to_string())
    }
}

fn map_transport_error(e: reqwest::Error) -> GeminiClientError {
    if e.is_timeout() {
        error!("Gemini request timed out: {}", e);
        return GeminiClientError::Timeout;
    }

    error!("Failed to reach Gemini: {}", e);
    GeminiClientError::Http(e)
}
