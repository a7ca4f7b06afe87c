//! Parsing and normalization of vision-model identification output.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::care::{clean_description, facts_from_description, synthesize_care_instructions};
use crate::domain::plant::{CareInstructions, CareLevel, PlantRecord};

static JSON_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap()
});

const DEFAULT_TEMPERATURE: &str = "65-75°F";

/// The shape we ask the vision model to return. Every field is optional:
/// partial answers are normalized with defaults rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionPlant {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub watering_needs: Option<String>,
    pub sunlight: Option<String>,
    pub temperature: Option<String>,
    pub description: Option<String>,
}

/// Image handed to the identification workflow: base64 payload plus mime
/// type, remembering the original reference for storage.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    /// Raw base64, without any `data:` prefix.
    pub data: String,
    /// The reference stored on the resulting record (data URI or URL).
    pub source: String,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("malformed data URI")]
    MalformedDataUri,
    #[error("image payload is not valid base64")]
    InvalidBase64,
}

impl ImagePayload {
    /// Accepts either a `data:<mime>;base64,<data>` URI or raw base64 with
    /// an explicit mime type (defaulting to JPEG). The base64 is validated
    /// up front so a corrupt upload fails before any network round trip.
    pub fn from_request(image: &str, mime_type: Option<&str>) -> Result<Self, ImageError> {
        let (mime, data, source) = if let Some(rest) = image.strip_prefix("data:") {
            let (mime, data) = rest
                .split_once(";base64,")
                .ok_or(ImageError::MalformedDataUri)?;
            (mime.to_string(), data.to_string(), image.to_string())
        } else {
            let mime = mime_type.unwrap_or("image/jpeg").to_string();
            let source = format!("data:{mime};base64,{image}");
            (mime, image.to_string(), source)
        };

        BASE64
            .decode(data.as_bytes())
            .map_err(|_| ImageError::InvalidBase64)?;

        Ok(Self {
            mime_type: mime,
            data,
            source,
        })
    }
}

/// Parses a model response permissively: a fenced ```json block takes
/// precedence, otherwise the whole response must be one JSON object.
pub fn parse_vision_response(text: &str) -> Result<VisionPlant, serde_json::Error> {
    if let Some(caps) = JSON_BLOCK_RE.captures(text) {
        if let Some(inner) = caps.get(1) {
            return serde_json::from_str(inner.as_str().trim());
        }
    }
    serde_json::from_str(text.trim())
}

/// Stable identifier from the scientific name: lower-cased, whitespace
/// collapsed to `-`. Falls back to a random id when the name is missing.
pub fn derive_plant_id(scientific_name: Option<&str>) -> String {
    match scientific_name {
        Some(name) if !name.trim().is_empty() => name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-"),
        _ => format!("plant-{}", random_suffix()),
    }
}

fn random_suffix() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// Normalizes a parsed model answer into a full catalog record, filling any
/// missing structured fields (care instructions, facts) from the synthesis
/// rules.
pub fn plant_from_vision(parsed: VisionPlant, image: &str) -> PlantRecord {
    let name = parsed
        .name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Unknown Plant".to_string());
    let scientific_name = parsed
        .scientific_name
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Species unknown".to_string());
    let watering_needs = parsed
        .watering_needs
        .as_deref()
        .and_then(CareLevel::parse_loose)
        .unwrap_or_default();
    let sunlight = parsed
        .sunlight
        .as_deref()
        .and_then(CareLevel::parse_loose)
        .unwrap_or_default();
    let temperature = parsed
        .temperature
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEMPERATURE.to_string());
    let description = match parsed.description.as_deref() {
        Some(d) if !d.trim().is_empty() => clean_description(d),
        _ => "No description available.".to_string(),
    };

    let care_instructions =
        synthesize_care_instructions(&name, watering_needs, sunlight, &temperature);
    let facts = facts_from_description(&description);

    PlantRecord {
        id: derive_plant_id(parsed.scientific_name.as_deref()),
        name,
        scientific_name,
        image: image.to_string(),
        watering_needs,
        sunlight,
        temperature,
        description,
        price: None,
        care_instructions: Some(care_instructions),
        facts: Some(facts),
        likes_count: 0,
    }
}

/// Deterministic record returned when identification fails for any reason
/// (transport, unparseable answer, bad payload). Carries user guidance
/// instead of an error.
pub fn placeholder_plant(image: &str) -> PlantRecord {
    PlantRecord {
        id: format!("unknown-plant-{}", random_suffix()),
        name: "Try Again".to_string(),
        scientific_name: "Image processing issue".to_string(),
        image: image.to_string(),
        watering_needs: CareLevel::Medium,
        sunlight: CareLevel::Medium,
        temperature: DEFAULT_TEMPERATURE.to_string(),
        description: "We had trouble processing this image. Try uploading a clear, well-lit \
                      photo of the plant with visible leaves and flowers if possible."
            .to_string(),
        price: None,
        care_instructions: Some(CareInstructions {
            watering: "Not available for this image".to_string(),
            light: "Not available for this image".to_string(),
            soil: "Not available for this image".to_string(),
            humidity: "Not available for this image".to_string(),
            fertilizing: "Not available for this image".to_string(),
        }),
        facts: Some(vec![
            "Clear images help AI identify plants more accurately.".to_string(),
            "Try to capture the whole plant including leaves and flowers.".to_string(),
            "Good lighting improves identification accuracy.".to_string(),
            "Avoid blurry or dark images for better results.".to_string(),
            "You can try with a different image of the same plant.".to_string(),
        ]),
        likes_count: 0,
    }
}
