use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{client::gemini_client_error::GeminiClientError, quiz::models::ErrorResponse};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Gemini client error: {0}")]
    Gemini(#[from] GeminiClientError),

    #[error("Failed to parse questions from Gemini")]
    QuestionParse(String),

    #[error("Http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Api error: {0} - {1}")]
    Api(StatusCode, String),
}

impl ServerError {
    fn status_and_body(self) -> (StatusCode, ErrorResponse) {
        let body = |error: String, raw: Option<String>| ErrorResponse { error, raw };

        match self {
            ServerError::Gemini(e) => match e {
                GeminiClientError::MissingApiKey => {
                    (StatusCode::INTERNAL_SERVER_ERROR, body(e.to_string(), None))
                }
                GeminiClientError::Timeout => (StatusCode::GATEWAY_TIMEOUT, body(e.to_string(), None)),
                GeminiClientError::Http(_) => (StatusCode::BAD_GATEWAY, body(e.to_string(), None)),
                GeminiClientError::ApiError(status, ref raw) => {
                    (status, body(e.to_string(), Some(raw.clone())))
                }
                GeminiClientError::Envelope(ref raw) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body(e.to_string(), Some(raw.clone())),
                ),
                // Nothing to parse is reported the same way as unparseable text.
                GeminiClientError::MissingText(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body("Failed to parse questions from Gemini".into(), None),
                ),
            },
            ServerError::QuestionParse(raw) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                body("Failed to parse questions from Gemini".into(), Some(raw)),
            ),
            ServerError::Http(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                body(format!("Http client error: {}", e), None),
            ),
            ServerError::Api(status, message) => (status, body(message, None)),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let (status, body) = self.status_and_body();

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_mirrored_with_raw_body() {
        let error = ServerError::from(GeminiClientError::ApiError(
            StatusCode::SERVICE_UNAVAILABLE,
            "overloaded".into(),
        ));

        let (status, body) = error.status_and_body();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "Gemini API error: 503");
        assert_eq!(body.raw.as_deref(), Some("overloaded"));
    }

    #[test]
    fn api_error_keeps_status_and_message() {
        let (status, body) =
            ServerError::Api(StatusCode::BAD_REQUEST, "Invalid request body".into())
                .status_and_body();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid request body");
        assert_eq!(body.raw, None);
    }

    #[test]
    fn missing_key_is_internal_error_without_raw() {
        let (status, body) = ServerError::from(GeminiClientError::MissingApiKey).status_and_body();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Missing Google Gemini API key");
        assert_eq!(body.raw, None);
    }

    #[test]
    fn envelope_and_content_failures_have_distinct_messages() {
        let (_, envelope) =
            ServerError::from(GeminiClientError::Envelope("<html>".into())).status_and_body();
        let (_, content) = ServerError::QuestionParse("not json".into()).status_and_body();

        assert_eq!(envelope.error, "Failed to parse Gemini response as JSON");
        assert_eq!(envelope.raw.as_deref(), Some("<html>"));
        assert_eq!(content.error, "Failed to parse questions from Gemini");
        assert_eq!(content.raw.as_deref(), Some("not json"));
    }
}
