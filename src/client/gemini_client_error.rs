use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GeminiClientError {
    #[error("Missing Google Gemini API key")]
    MissingApiKey,

    #[error("Gemini request timed out")]
    Timeout,

    #[error("Failed to reach Gemini: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error: {}", .0.as_u16())]
    ApiError(StatusCode, String),

    #[error("Failed to parse Gemini response as JSON")]
    Envelope(String),

    #[error("Gemini response contained no text")]
    MissingText(String),
}
