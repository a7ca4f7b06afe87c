use crate::transport::http::handlers::common::ok_json;
use crate::transport::http::types::ApiResponse;
use axum::response::IntoResponse;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/devices",
    responses(
        (status = 200, description = "A fresh device identifier; clients persist it and reuse it for likes", body = ApiResponse)
    )
)]
pub async fn new_device_handler() -> impl IntoResponse {
    ok_json(serde_json::json!({ "device_id": Uuid::new_v4().to_string() })).into_response()
}
