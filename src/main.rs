use dotenv::dotenv;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::FmtSubscriber;

use mcq_quiz::{
    config::config::CONFIG,
    server::{app_state::AppState, router::app_router},
};

#[tokio::main]
async fn main() {
    // Initialize .env
    dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing");

    // Initialize state
    let state = AppState::from_config(&CONFIG.gemini).unwrap_or_else(|e| panic!("{}", e));
    if state.get_gemini_client().api_key().is_none() {
        warn!(
            "{} is not set, question requests will fail until it is",
            CONFIG.gemini.api_key_var
        );
    }

    // Initialize routes
    let app = app_router(state);

    // Initialize webserver
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", CONFIG.server.address, CONFIG.server.port))
            .await
            .unwrap_or_else(|e| panic!("Failed to bind listener: {}", e));

    info!(
        "Server listening on address: {}",
        listener
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_default()
    );
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("Server error: {}", e));
}
