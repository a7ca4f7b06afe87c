use crate::domain::plant::PlantRecord;
use crate::domain::units::display_temperature;
use crate::transport::http::handlers::common::{error_json, json_422, ok_json};
use crate::transport::http::types::{ApiResponse, AppState, CountQuery, SearchQuery};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

const DEFAULT_FEATURED_COUNT: usize = 3;
const DEFAULT_POPULAR_COUNT: usize = 6;

#[utoipa::path(
    get,
    path = "/api/plants",
    responses(
        (status = 200, description = "Full catalog", body = ApiResponse)
    )
)]
pub async fn list_plants_handler(State(state): State<AppState>) -> impl IntoResponse {
    let plants = state.plants.get_all_plants().await;
    ok_json(serde_json::json!({ "plants": plants })).into_response()
}

#[utoipa::path(
    get,
    path = "/api/plants/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Plants matching the query", body = ApiResponse)
    )
)]
pub async fn search_plants_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let plants = state.plants.search_plants(&query.q).await;
    ok_json(serde_json::json!({ "plants": plants })).into_response()
}

#[utoipa::path(
    get,
    path = "/api/plants/featured",
    params(CountQuery),
    responses(
        (status = 200, description = "First N plants in catalog order", body = ApiResponse)
    )
)]
pub async fn featured_plants_handler(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> impl IntoResponse {
    let count = query.count.map(|c| c as usize).unwrap_or(DEFAULT_FEATURED_COUNT);
    let plants = state.plants.get_featured_plants(count).await;
    ok_json(serde_json::json!({ "plants": plants })).into_response()
}

#[utoipa::path(
    get,
    path = "/api/plants/popular",
    params(CountQuery),
    responses(
        (status = 200, description = "Top N plants by like count", body = ApiResponse)
    )
)]
pub async fn popular_plants_handler(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> impl IntoResponse {
    let count = query.count.map(|c| c as usize).unwrap_or(DEFAULT_POPULAR_COUNT);
    let plants = state.plants.get_popular_plants(count).await;
    ok_json(serde_json::json!({ "plants": plants })).into_response()
}

#[utoipa::path(
    get,
    path = "/api/plants/{id}",
    params(
        ("id" = String, Path, description = "Plant id")
    ),
    responses(
        (status = 200, description = "The plant", body = ApiResponse),
        (status = 404, description = "Unknown plant id", body = ApiResponse)
    )
)]
pub async fn get_plant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.plants.get_plant_by_id(&id).await {
        Some(plant) => {
            let temperature_display = display_temperature(&plant.temperature);
            ok_json(serde_json::json!({
                "plant": plant,
                "temperature_display": temperature_display,
            }))
            .into_response()
        }
        None => error_json(
            StatusCode::NOT_FOUND,
            format!("No plant with id '{}'", id),
        )
        .into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/plants",
    request_body = PlantRecord,
    responses(
        (status = 200, description = "Plant saved (upsert by id)", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "Backing store refused the write", body = ApiResponse)
    )
)]
pub async fn save_plant_handler(
    State(state): State<AppState>,
    request: Result<Json<PlantRecord>, JsonRejection>,
) -> impl IntoResponse {
    let Json(plant) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "a plant record").into_response(),
    };

    let id = plant.id.clone();
    if state.plants.save_plant(plant).await {
        ok_json(serde_json::json!({ "id": id })).into_response()
    } else {
        error_json(
            StatusCode::BAD_GATEWAY,
            "Failed to save plant to the backing store".to_string(),
        )
        .into_response()
    }
}
