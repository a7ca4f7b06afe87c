//! Identification workflow with a scripted vision model: no network, no
//! database.

use async_trait::async_trait;
use std::sync::Arc;

use plantid::domain::identify::ImagePayload;
use plantid::domain::plant::CareLevel;
use plantid::storage::seed::seed_plants;
use plantid::{
    IdentificationWorkflow, LocalCatalog, LocalLikeStore, PlantService, VisionError, VisionModel,
};

// A 1x1 image stand-in; the workflow only needs valid base64.
const IMAGE: &str = "data:image/png;base64,aGVsbG8gcGxhbnQ=";

const GERBERA_JSON: &str = r#"{"name":"Gerbera Daisy","scientificName":"Gerbera jamesonii","wateringNeeds":"medium","sunlight":"high","temperature":"65-75°F","description":"Gerbera Daisies are vibrant flowering plants. They produce large daisy-like blooms. Their colors range from red to yellow."}"#;

struct ScriptedVision(Result<String, VisionError>);

#[async_trait]
impl VisionModel for ScriptedVision {
    async fn analyze_image(&self, _image: &ImagePayload) -> Result<String, VisionError> {
        match &self.0 {
            Ok(text) => Ok(text.clone()),
            Err(VisionError::NotConfigured) => Err(VisionError::NotConfigured),
            Err(VisionError::EmptyResponse) => Err(VisionError::EmptyResponse),
            Err(e) => panic!("unsupported scripted error: {e}"),
        }
    }
}

fn workflow_with(vision: Option<Arc<dyn VisionModel>>) -> (IdentificationWorkflow, Arc<PlantService>) {
    let catalog = Arc::new(LocalCatalog::new(seed_plants()));
    let likes = Arc::new(LocalLikeStore::in_memory());
    let service = Arc::new(PlantService::new(None, catalog, likes));
    (IdentificationWorkflow::new(vision, service.clone()), service)
}

#[tokio::test]
async fn identifies_from_a_bare_json_response() {
    let vision = Arc::new(ScriptedVision(Ok(GERBERA_JSON.to_string())));
    let (workflow, _) = workflow_with(Some(vision));

    let plant = workflow.identify(IMAGE, None).await;
    assert_eq!(plant.id, "gerbera-jamesonii");
    assert_eq!(plant.name, "Gerbera Daisy");
    assert_eq!(plant.watering_needs, CareLevel::Medium);
    assert_eq!(plant.sunlight, CareLevel::High);
    assert_eq!(plant.image, IMAGE);

    // Missing structured fields are synthesized.
    let care = plant.care_instructions.expect("care synthesized");
    assert!(care.watering.contains("Gerbera Daisy"));
    assert!(care.humidity.contains("65-75°F"));
    let facts = plant.facts.expect("facts synthesized");
    assert_eq!(facts.len(), 5);
    assert_eq!(facts[0], "Gerbera Daisies are vibrant flowering plants.");
}

#[tokio::test]
async fn fenced_response_yields_the_same_record() {
    let fenced = format!("Sure! Here you go:\n```json\n{GERBERA_JSON}\n```");
    let (bare_wf, _) = workflow_with(Some(Arc::new(ScriptedVision(Ok(GERBERA_JSON.to_string())))));
    let (fenced_wf, _) = workflow_with(Some(Arc::new(ScriptedVision(Ok(fenced)))));

    let from_bare = bare_wf.identify(IMAGE, None).await;
    let from_fenced = fenced_wf.identify(IMAGE, None).await;
    assert_eq!(from_bare, from_fenced);
}

#[tokio::test]
async fn unparseable_response_collapses_to_the_placeholder() {
    let vision = Arc::new(ScriptedVision(Ok(
        "This looks like some kind of daisy to me.".to_string(),
    )));
    let (workflow, _) = workflow_with(Some(vision));

    let plant = workflow.identify(IMAGE, None).await;
    assert_eq!(plant.name, "Try Again");
    assert_eq!(plant.scientific_name, "Image processing issue");
    assert_eq!(plant.facts.as_ref().map(Vec::len), Some(5));
    assert_eq!(plant.image, IMAGE);
}

#[tokio::test]
async fn transport_failure_collapses_to_the_placeholder() {
    let vision = Arc::new(ScriptedVision(Err(VisionError::EmptyResponse)));
    let (workflow, _) = workflow_with(Some(vision));

    let plant = workflow.identify(IMAGE, None).await;
    assert_eq!(plant.name, "Try Again");
}

#[tokio::test]
async fn missing_vision_model_collapses_to_the_placeholder() {
    let (workflow, _) = workflow_with(None);
    assert!(!workflow.vision_available());

    let plant = workflow.identify(IMAGE, None).await;
    assert_eq!(plant.name, "Try Again");
}

#[tokio::test]
async fn invalid_base64_collapses_to_the_placeholder() {
    let vision = Arc::new(ScriptedVision(Ok(GERBERA_JSON.to_string())));
    let (workflow, _) = workflow_with(Some(vision));

    let plant = workflow
        .identify("data:image/png;base64,@@not-base64@@", None)
        .await;
    assert_eq!(plant.name, "Try Again");
}

#[tokio::test]
async fn raw_base64_payloads_are_wrapped_into_a_data_uri() {
    let vision = Arc::new(ScriptedVision(Ok(GERBERA_JSON.to_string())));
    let (workflow, _) = workflow_with(Some(vision));

    let plant = workflow.identify("aGVsbG8=", Some("image/webp")).await;
    assert_eq!(plant.image, "data:image/webp;base64,aGVsbG8=");
}

#[tokio::test]
async fn local_mode_skips_persistence() {
    let vision = Arc::new(ScriptedVision(Ok(GERBERA_JSON.to_string())));
    let (workflow, service) = workflow_with(Some(vision));

    let plant = workflow.identify(IMAGE, None).await;
    // Without a backing store the computed record is returned directly and
    // the catalog is left untouched.
    assert!(service.get_plant_by_id(&plant.id).await.is_none());
    assert_eq!(service.get_all_plants().await.len(), 4);
}

#[tokio::test]
async fn partial_answers_are_filled_with_defaults() {
    let vision = Arc::new(ScriptedVision(Ok(r#"{"name":"Mystery Fern"}"#.to_string())));
    let (workflow, _) = workflow_with(Some(vision));

    let plant = workflow.identify(IMAGE, None).await;
    assert_eq!(plant.name, "Mystery Fern");
    assert_eq!(plant.scientific_name, "Species unknown");
    assert!(plant.id.starts_with("plant-"));
    assert_eq!(plant.watering_needs, CareLevel::Medium);
    assert_eq!(plant.temperature, "65-75°F");
    assert_eq!(plant.description, "No description available.");
}
