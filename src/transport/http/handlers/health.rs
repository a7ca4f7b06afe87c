use crate::transport::http::handlers::common::ok_json;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up; reports which backing mode is active", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, backing_store) = match state.plants.remote() {
        Some(pg) => match pg.ping().await {
            Ok(()) => ("ok", "remote"),
            // Reads are still served from the local catalog, so the service
            // stays up while degraded.
            Err(_) => ("degraded", "local"),
        },
        None => ("ok", "local"),
    };

    ok_json(serde_json::json!({
        "status": status,
        "backing_store": backing_store,
        "identification": if state.identifier.vision_available() { "available" } else { "unavailable" },
    }))
    .into_response()
}
