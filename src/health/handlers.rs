use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::warn;

use crate::server::app_state::AppState;

pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/detailed", get(health_detailed))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    "OK".into_response()
}

async fn health_detailed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let key_configured = state.get_gemini_client().api_key().is_some();
    if !key_configured {
        warn!("Gemini API key is not configured, question requests will fail");
    }

    let json = json!({
        "platform": true,
        "gemini_key_configured": key_configured,
    });

    (StatusCode::OK, Json(json))
}
