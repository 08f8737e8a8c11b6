use std::sync::Arc;

use axum::{Router, middleware::from_fn};

use crate::{
    health::handlers::health_routes, mw::request_mw::request_mw, quiz::handlers::quiz_routes,
    server::app_state::AppState,
};

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/health", health_routes(state.clone()))
        .nest("/api/questions", quiz_routes(state))
        .layer(from_fn(request_mw))
}
