//! Pure-logic checks: temperature formatting, care synthesis, fact
//! extraction, and vision-response parsing.

use plantid::domain::care::{
    facts_from_description, light_instructions, watering_instructions, GENERIC_FACTS,
};
use plantid::domain::identify::{derive_plant_id, parse_vision_response, placeholder_plant};
use plantid::domain::plant::CareLevel;
use plantid::domain::units::{convert_to_celsius, convert_to_fahrenheit, display_temperature};

fn parse_bounds(s: &str) -> (i64, i64) {
    let digits: Vec<i64> = s
        .trim_end_matches("°F")
        .trim_end_matches("°C")
        .split('-')
        .map(|p| p.parse::<i64>().unwrap())
        .collect();
    (digits[0], digits[1])
}

#[test]
fn fahrenheit_round_trips_within_one_degree() {
    for input in ["65-75°F", "60-85°F", "32-100°F", "65-85°F"] {
        let celsius = convert_to_celsius(input);
        assert!(celsius.ends_with("°C"), "got {celsius:?} for {input:?}");
        let back = convert_to_fahrenheit(&celsius);
        assert!(back.ends_with("°F"));

        let (orig_lo, orig_hi) = parse_bounds(input);
        let (back_lo, back_hi) = parse_bounds(&back);
        assert!((orig_lo - back_lo).abs() <= 1, "{input}: {orig_lo} vs {back_lo}");
        assert!((orig_hi - back_hi).abs() <= 1, "{input}: {orig_hi} vs {back_hi}");
    }
}

#[test]
fn conversion_of_unparseable_input_is_empty() {
    assert_eq!(convert_to_celsius("warm"), "");
    assert_eq!(convert_to_celsius(""), "");
    assert_eq!(convert_to_fahrenheit("about 20 degrees"), "");
}

#[test]
fn display_appends_the_converted_unit() {
    assert_eq!(display_temperature("65-75°F"), "65-75°F (18-24°C)");
    assert_eq!(display_temperature("18-24°C"), "18-24°C (64-75°F)");
    // No unit marker: treated as Fahrenheit.
    assert_eq!(display_temperature("65-75"), "65-75°F (18-24°C)");
    // Unparseable input passes through untouched.
    assert_eq!(display_temperature("tropical"), "tropical");
}

#[test]
fn watering_and_light_templates_follow_the_tier() {
    let low = watering_instructions("Aloe Vera", CareLevel::Low);
    assert!(low.contains("Aloe Vera"));
    assert!(low.contains("drought-tolerant"));

    let high = watering_instructions("Fern", CareLevel::High);
    assert!(high.contains("consistently moist"));

    let light = light_instructions("Desert Rose", CareLevel::High);
    assert!(light.contains("6 hours"));
    assert!(light.contains("Desert Rose"));
}

#[test]
fn facts_come_from_description_sentences() {
    let description = "Discovered in 1880 by Robert Jameson. Available in all colors except \
                       true blue! Fifth most popular cut flower worldwide? Lasts up to 14 \
                       days in a vase. A composite of hundreds of tiny flowers. One more \
                       sentence that should be cut off.";
    let facts = facts_from_description(description);
    assert_eq!(facts.len(), 5);
    assert_eq!(facts[0], "Discovered in 1880 by Robert Jameson.");
    assert!(facts.iter().all(|f| f.ends_with('.')));
    assert!(!facts.iter().any(|f| f.contains("cut off")));
}

#[test]
fn short_descriptions_get_the_generic_facts() {
    let facts = facts_from_description("Tiny.");
    assert_eq!(facts.len(), 5);
    assert_eq!(facts[0], GENERIC_FACTS[0]);
}

#[test]
fn sparse_descriptions_are_padded_without_duplicates() {
    let facts = facts_from_description("Lovely plant. It blooms nicely in spring sunshine.");
    assert_eq!(facts.len(), 5);
    assert_eq!(facts[0], "Lovely plant.");
    assert_eq!(facts[2], "Lovely plants can enhance your home decor.");
    let mut unique = facts.clone();
    unique.dedup();
    assert_eq!(unique.len(), facts.len());
}

#[test]
fn fenced_and_bare_json_parse_identically() {
    let bare = r#"{"name":"Gerbera Daisy","scientificName":"Gerbera jamesonii","wateringNeeds":"medium","sunlight":"high","temperature":"65-75°F","description":"A vibrant flowering plant."}"#;
    let fenced = format!("Here is the identification:\n```json\n{bare}\n```\nLet me know!");

    let from_bare = parse_vision_response(bare).unwrap();
    let from_fenced = parse_vision_response(&fenced).unwrap();
    assert_eq!(from_bare.name, from_fenced.name);
    assert_eq!(from_bare.scientific_name, from_fenced.scientific_name);
    assert_eq!(from_bare.watering_needs, from_fenced.watering_needs);
    assert_eq!(from_bare.temperature, from_fenced.temperature);
}

#[test]
fn garbage_responses_fail_to_parse() {
    assert!(parse_vision_response("I think this is a rose, maybe?").is_err());
    assert!(parse_vision_response("```json\nnot json at all\n```").is_err());
}

#[test]
fn plant_id_is_slugified_from_the_scientific_name() {
    assert_eq!(
        derive_plant_id(Some("Gerbera jamesonii")),
        "gerbera-jamesonii"
    );
    assert_eq!(
        derive_plant_id(Some("  Hibiscus   rosa-sinensis ")),
        "hibiscus-rosa-sinensis"
    );

    let random = derive_plant_id(None);
    assert!(random.starts_with("plant-"));
    assert_eq!(random.len(), "plant-".len() + 8);
}

#[test]
fn placeholder_carries_guidance_and_five_facts() {
    let plant = placeholder_plant("data:image/png;base64,AAAA");
    assert_eq!(plant.name, "Try Again");
    assert_eq!(plant.facts.as_ref().map(Vec::len), Some(5));
    assert!(plant.id.starts_with("unknown-plant-"));
    assert_eq!(plant.watering_needs, CareLevel::Medium);
    assert!(plant.description.contains("well-lit"));
}
