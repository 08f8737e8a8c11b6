use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub async fn request_mw(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        uri = %req.uri(),
    );

    async move {
        let start = Instant::now();
        let response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();

        if status.is_success() {
            info!("Completed with {} in {:?}", status, elapsed);
        } else {
            warn!("Completed with {} in {:?}", status, elapsed);
        }

        response
    }
    .instrument(span)
    .await
}
