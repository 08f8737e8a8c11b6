use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::{debug, error, info};

use crate::{
    quiz::{
        models::{QuestionRequest, QuestionsResponse},
        parse::parse_questions,
        prompt::build_prompt,
    },
    server::{app_state::AppState, error::ServerError},
};

pub fn quiz_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(generate_questions))
        .with_state(state)
}

async fn generate_questions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Json(request) = payload.map_err(|rejection| {
        error!("Rejected question request: {}", rejection.body_text());
        ServerError::Api(rejection.status(), rejection.body_text())
    })?;

    let prompt = build_prompt(&request);
    debug!("Gemini prompt: {}", prompt);

    let content = state
        .get_gemini_client()
        .generate_text(state.get_client(), &prompt)
        .await?;
    debug!("Raw Gemini output: {}", content);

    let questions = parse_questions(&content).map_err(|e| {
        error!("Failed to parse questions from Gemini: {}", e);
        ServerError::QuestionParse(content)
    })?;

    info!("Generated {} questions", questions.len());
    Ok((StatusCode::OK, Json(QuestionsResponse { questions })))
}
