use crate::app::likes::LikeOutcome;
use crate::transport::http::handlers::common::{json_422, ok_json};
use crate::transport::http::types::{ApiResponse, AppState, LikeRequest, LikeStatusQuery};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

fn outcome_response(outcome: LikeOutcome) -> (StatusCode, Json<ApiResponse>) {
    // Failures are part of the contract (boolean channel), so the HTTP
    // status stays 200 and `success` carries the verdict.
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: outcome.ok,
            data: Some(serde_json::json!({
                "changed": outcome.changed,
                "liked": outcome.liked,
                "count": outcome.count,
            })),
            error: if outcome.ok {
                None
            } else {
                Some("Like operation did not apply".to_string())
            },
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/plants/{id}/likes",
    params(
        ("id" = String, Path, description = "Plant id"),
        LikeStatusQuery
    ),
    responses(
        (status = 200, description = "Like state for this device plus total count", body = ApiResponse)
    )
)]
pub async fn like_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LikeStatusQuery>,
) -> impl IntoResponse {
    let (liked, count) = state.likes.status(&id, &query.device_id).await;
    ok_json(serde_json::json!({ "liked": liked, "count": count })).into_response()
}

#[utoipa::path(
    post,
    path = "/api/plants/{id}/likes",
    params(
        ("id" = String, Path, description = "Plant id")
    ),
    request_body = LikeRequest,
    responses(
        (status = 200, description = "Like applied (idempotent)", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn like_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<LikeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"device_id\": \"...\"}").into_response(),
    };
    outcome_response(state.likes.like(&id, &request.device_id).await).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/plants/{id}/likes",
    params(
        ("id" = String, Path, description = "Plant id")
    ),
    request_body = LikeRequest,
    responses(
        (status = 200, description = "Unlike applied, or failing no-op when never liked", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn unlike_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<LikeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"device_id\": \"...\"}").into_response(),
    };
    outcome_response(state.likes.unlike(&id, &request.device_id).await).into_response()
}

#[utoipa::path(
    post,
    path = "/api/plants/{id}/likes/toggle",
    params(
        ("id" = String, Path, description = "Plant id")
    ),
    request_body = LikeRequest,
    responses(
        (status = 200, description = "State flipped; no-op when a toggle is already in flight", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn toggle_like_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<LikeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"device_id\": \"...\"}").into_response(),
    };
    outcome_response(state.likes.toggle(&id, &request.device_id).await).into_response()
}
