use crate::app::identify::IdentificationWorkflow;
use crate::app::likes::LikeCoordinator;
use crate::app::plant_service::PlantService;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub plants: Arc<PlantService>,
    pub identifier: Arc<IdentificationWorkflow>,
    pub likes: Arc<LikeCoordinator>,
}

/// Uniform response envelope.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct IdentifyRequest {
    /// Either a full `data:<mime>;base64,...` URI or raw base64.
    pub image: String,
    /// Mime type for raw base64 payloads (defaults to `image/jpeg`).
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LikeRequest {
    pub device_id: String,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct SearchQuery {
    /// Substring matched against common and scientific names.
    pub q: String,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct CountQuery {
    pub count: Option<u32>,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct LikeStatusQuery {
    pub device_id: String,
}
