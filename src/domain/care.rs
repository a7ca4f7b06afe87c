//! Care-instruction synthesis and fact extraction.
//!
//! When the vision model only returns the coarse watering/sunlight tiers and
//! a description, the richer fields shown on a plant page are synthesized
//! here: instruction templates keyed by tier, and facts cut out of the
//! description sentence by sentence.

use crate::domain::plant::{CareInstructions, CareLevel};

/// Facts used when the description is missing or too short to mine.
pub const GENERIC_FACTS: [&str; 5] = [
    "Plants improve air quality and reduce stress.",
    "Regular care helps plants thrive and stay healthy.",
    "Proper light is essential for photosynthesis.",
    "Most houseplants originated in tropical regions.",
    "Plants can communicate through chemical signals.",
];

const MIN_SENTENCE_LEN: usize = 10;
const MAX_FACTS: usize = 5;

pub fn watering_instructions(plant_name: &str, level: CareLevel) -> String {
    match level {
        CareLevel::Low => format!(
            "Water sparingly. Allow soil to dry completely between waterings. {plant_name} is drought-tolerant."
        ),
        CareLevel::Medium => format!(
            "Water when the top inch of soil feels dry to the touch. {plant_name} prefers consistent moisture but not soggy conditions."
        ),
        CareLevel::High => format!(
            "Keep soil consistently moist. {plant_name} requires regular watering and doesn't tolerate drying out."
        ),
    }
}

pub fn light_instructions(plant_name: &str, level: CareLevel) -> String {
    match level {
        CareLevel::Low => format!(
            "Place in shade or indirect light. {plant_name} can thrive in low light conditions."
        ),
        CareLevel::Medium => format!(
            "Provide bright, filtered light. {plant_name} does best with indirect sunlight."
        ),
        CareLevel::High => format!(
            "Position in a bright location with direct sunlight. {plant_name} needs at least 6 hours of sun daily."
        ),
    }
}

/// Builds the full structured care block from the tiered attributes.
/// Soil and fertilizing guidance are fixed; humidity embeds the temperature
/// range so the page reads naturally.
pub fn synthesize_care_instructions(
    plant_name: &str,
    watering: CareLevel,
    sunlight: CareLevel,
    temperature: &str,
) -> CareInstructions {
    CareInstructions {
        watering: watering_instructions(plant_name, watering),
        light: light_instructions(plant_name, sunlight),
        soil: "Use well-draining soil that's appropriate for this plant type.".to_string(),
        humidity: format!(
            "Maintain typical indoor humidity and temperature around {temperature}."
        ),
        fertilizing: "Apply a balanced fertilizer during the growing season as needed."
            .to_string(),
    }
}

/// Extracts up to five facts from a free-text description.
///
/// Sentence boundaries are `.`, `!` or `?`; a sentence counts only if it is
/// longer than ten characters after trimming. Short fact lists are padded
/// with generic statements, skipping any already present, until five facts
/// are available or the generic pool is exhausted.
pub fn facts_from_description(description: &str) -> Vec<String> {
    if description.trim().len() < MIN_SENTENCE_LEN {
        return GENERIC_FACTS.iter().map(|s| s.to_string()).collect();
    }

    let mut facts: Vec<String> = description
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.len() > MIN_SENTENCE_LEN)
        .take(MAX_FACTS)
        .map(|s| format!("{s}."))
        .collect();

    if facts.len() < MAX_FACTS {
        let first_word = description.split_whitespace().next().unwrap_or("These");
        let padding = [
            format!("{first_word} plants can enhance your home decor."),
            "Consistent care routine leads to healthier plants.".to_string(),
            "Plants respond to their environment and care.".to_string(),
            "Observing your plant helps you understand its needs.".to_string(),
            "Plants are living organisms that change and grow over time.".to_string(),
        ];
        for fact in padding {
            if facts.len() >= MAX_FACTS {
                break;
            }
            if !facts.contains(&fact) {
                facts.push(fact);
            }
        }
    }

    facts
}

/// Normalizes a model-produced description for storage: collapses runs of
/// whitespace and strips stray backticks left over from markdown output.
pub fn clean_description(description: &str) -> String {
    let stripped = description.replace('`', "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
