//! The identification workflow.
//!
//! Photo in, `PlantRecord` out, unconditionally: transport failures,
//! unparseable model answers and bad payloads all collapse to the "Try
//! Again" placeholder, and persistence is best-effort. The caller never
//! sees an error.

use std::sync::Arc;
use tracing::{info, warn};

use crate::app::plant_service::PlantService;
use crate::domain::identify::{
    parse_vision_response, placeholder_plant, plant_from_vision, ImagePayload,
};
use crate::domain::plant::PlantRecord;
use crate::infra::gemini::VisionModel;

pub struct IdentificationWorkflow {
    vision: Option<Arc<dyn VisionModel>>,
    service: Arc<PlantService>,
}

impl IdentificationWorkflow {
    pub fn new(vision: Option<Arc<dyn VisionModel>>, service: Arc<PlantService>) -> Self {
        Self { vision, service }
    }

    pub fn vision_available(&self) -> bool {
        self.vision.is_some()
    }

    /// Identifies the plant in `image` (data URI, or raw base64 plus mime
    /// type). Never fails: any breakdown along the pipeline yields the
    /// placeholder record.
    pub async fn identify(&self, image: &str, mime_type: Option<&str>) -> PlantRecord {
        let payload = match ImagePayload::from_request(image, mime_type) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "rejecting identification payload");
                return self.fail(image).await;
            }
        };

        let Some(vision) = &self.vision else {
            warn!("no vision model configured, returning placeholder");
            return self.fail(&payload.source).await;
        };

        let response = match vision.analyze_image(&payload).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "vision model call failed");
                return self.fail(&payload.source).await;
            }
        };

        let parsed = match parse_vision_response(&response) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "vision model response was not parseable JSON");
                return self.fail(&payload.source).await;
            }
        };

        let plant = plant_from_vision(parsed, &payload.source);
        info!(plant_id = %plant.id, name = %plant.name, "identified plant");

        self.service.persist_identified(&plant, &payload.source).await;
        plant
    }

    async fn fail(&self, image: &str) -> PlantRecord {
        self.service.record_failed_identification(image).await;
        placeholder_plant(image)
    }
}
