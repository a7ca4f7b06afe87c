use crate::transport::http::handlers::common::{json_422, ok_json};
use crate::transport::http::types::{ApiResponse, AppState, IdentifyRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/identify",
    request_body = IdentifyRequest,
    responses(
        (status = 200, description = "Identified plant, or the try-again placeholder when identification failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn identify_handler(
    State(state): State<AppState>,
    request: Result<Json<IdentifyRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"image\": \"data:image/...;base64,...\"}").into_response(),
    };

    // The workflow never fails; a breakdown shows up as the placeholder
    // record in a successful response.
    let plant = state
        .identifier
        .identify(&request.image, request.mime_type.as_deref())
        .await;

    ok_json(serde_json::json!({ "plant": plant })).into_response()
}
