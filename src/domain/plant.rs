//! Core data model for the plant catalog.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed three-tier enumeration used for both watering needs and sunlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CareLevel {
    Low,
    Medium,
    High,
}

impl CareLevel {
    /// Parses model/store output leniently. Anything outside the closed
    /// enumeration maps to `None` so callers can apply their own default.
    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(CareLevel::Low),
            "medium" => Some(CareLevel::Medium),
            "high" => Some(CareLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CareLevel::Low => "low",
            CareLevel::Medium => "medium",
            CareLevel::High => "high",
        }
    }
}

impl Default for CareLevel {
    fn default() -> Self {
        CareLevel::Medium
    }
}

impl std::fmt::Display for CareLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured care guidance attached to a plant. Each field is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CareInstructions {
    pub watering: String,
    pub light: String,
    pub soil: String,
    pub humidity: String,
    pub fertilizing: String,
}

/// Canonical record describing one plant shown to consumers.
///
/// The `id` is unique within the catalog: slugified from the scientific name
/// when the record was machine-identified, random otherwise. Records are
/// never deleted; writing an existing id is an upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    /// Image URL or data URI, as captured/uploaded.
    pub image: String,
    pub watering_needs: CareLevel,
    pub sunlight: CareLevel,
    /// Formatted range, e.g. `65-75°F`.
    pub temperature: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_instructions: Option<CareInstructions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<String>>,
    #[serde(default)]
    pub likes_count: i64,
}
