use crate::app::likes::{LikeOutcome, LikeState};
use crate::domain::plant::{CareInstructions, CareLevel, PlantRecord};
use crate::transport::http::handlers::{devices, health, identify, likes, plants};
use crate::transport::http::types::{
    ApiResponse, IdentifyRequest, LikeRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        plants::list_plants_handler,
        plants::search_plants_handler,
        plants::featured_plants_handler,
        plants::popular_plants_handler,
        plants::get_plant_handler,
        plants::save_plant_handler,
        identify::identify_handler,
        likes::like_status_handler,
        likes::like_handler,
        likes::unlike_handler,
        likes::toggle_like_handler,
        devices::new_device_handler
    ),
    components(schemas(
        ApiResponse,
        PlantRecord,
        CareInstructions,
        CareLevel,
        IdentifyRequest,
        LikeRequest,
        LikeOutcome,
        LikeState
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/plants", get(plants::list_plants_handler).post(plants::save_plant_handler))
        .route("/api/plants/search", get(plants::search_plants_handler))
        .route("/api/plants/featured", get(plants::featured_plants_handler))
        .route("/api/plants/popular", get(plants::popular_plants_handler))
        .route("/api/plants/:id", get(plants::get_plant_handler))
        .route(
            "/api/plants/:id/likes",
            get(likes::like_status_handler)
                .post(likes::like_handler)
                .delete(likes::unlike_handler),
        )
        .route("/api/plants/:id/likes/toggle", post(likes::toggle_like_handler))
        .route("/api/identify", post(identify::identify_handler))
        .route("/api/devices", post(devices::new_device_handler))
        .with_state(app_state)
}
