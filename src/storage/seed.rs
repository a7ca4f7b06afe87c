//! Seed dataset for the local catalog.

use crate::domain::plant::{CareInstructions, CareLevel, PlantRecord};

fn gerbera_care() -> CareInstructions {
    CareInstructions {
        watering: "Water when the top inch of soil is dry. Avoid overhead watering as wet \
                   leaves can lead to powdery mildew and other fungal diseases. Use room \
                   temperature water whenever possible."
            .to_string(),
        light: "Place in bright, indirect light for 6-8 hours daily. Morning sun with \
                afternoon shade is ideal, especially in hot climates. Too little light \
                results in fewer blooms."
            .to_string(),
        soil: "Plant in rich, well-draining soil with a pH between 5.5 and 6.5. A mix \
               formulated for flowering houseplants with added perlite works well to ensure \
               proper drainage."
            .to_string(),
        humidity: "Prefers moderate humidity (40-50%). In dry environments, use a pebble \
                   tray with water near the plant, but avoid misting as this can promote \
                   leaf diseases."
            .to_string(),
        fertilizing: "Apply a phosphorus-rich, water-soluble fertilizer (such as 15-30-15) \
                      diluted to half strength every 2 weeks during the growing season. \
                      Reduce to monthly in winter."
            .to_string(),
    }
}

fn gerbera_facts() -> Vec<String> {
    vec![
        "Discovered in 1880 by Robert Jameson in South Africa during a gold mining operation."
            .to_string(),
        "Available in all colors except true blue - any blue gerbera daisies are artificially \
         colored."
            .to_string(),
        "Fifth most popular cut flower worldwide, after roses, carnations, chrysanthemums, \
         and tulips."
            .to_string(),
        "Can last up to 14 days in a vase with proper care.".to_string(),
        "The flower is actually a composite of hundreds of tiny individual flowers.".to_string(),
    ]
}

/// The initial catalog injected at startup. Order matters: "featured" picks
/// and popularity tie-breaks follow this order.
pub fn seed_plants() -> Vec<PlantRecord> {
    vec![
        PlantRecord {
            id: "red-gerbera-daisy".to_string(),
            name: "Red Gerbera Daisy".to_string(),
            scientific_name: "Gerbera jamesonii".to_string(),
            image: "/assets/plants/1.png".to_string(),
            watering_needs: CareLevel::Medium,
            sunlight: CareLevel::Medium,
            temperature: "65-85°F".to_string(),
            description: "Gerbera Daisies are known for their large, vibrant flowers."
                .to_string(),
            price: Some("Rs. 359/-".to_string()),
            care_instructions: Some(gerbera_care()),
            facts: Some(gerbera_facts()),
            likes_count: 0,
        },
        PlantRecord {
            id: "gerbera-daisy".to_string(),
            name: "Gerbera Daisy".to_string(),
            scientific_name: "Gerbera jamesonii".to_string(),
            image: "/assets/plants/2.png".to_string(),
            watering_needs: CareLevel::Medium,
            sunlight: CareLevel::High,
            temperature: "65-75°F".to_string(),
            description: "Gerbera Daisies are vibrant flowering plants known for their large, \
                          daisy-like blooms in a variety of colors."
                .to_string(),
            price: Some("Rs. 359/-".to_string()),
            care_instructions: Some(gerbera_care()),
            facts: Some(gerbera_facts()),
            likes_count: 0,
        },
        PlantRecord {
            id: "pink-adenium".to_string(),
            name: "Pink Adenium".to_string(),
            scientific_name: "Adenium obesum".to_string(),
            image: "/assets/plants/3.png".to_string(),
            watering_needs: CareLevel::Medium,
            sunlight: CareLevel::High,
            temperature: "60-85°F".to_string(),
            description: "The Pink Adenium, also known as Desert Rose, is a succulent plant \
                          with thick stems and striking pink flowers."
                .to_string(),
            price: Some("Rs. 359/-".to_string()),
            care_instructions: Some(CareInstructions {
                watering: "Water thoroughly but infrequently, allowing soil to dry completely \
                           between waterings. During active growth (spring/summer), water once \
                           every 7-10 days. In winter, reduce to once every 3-4 weeks or when \
                           the plant shows signs of thirst."
                    .to_string(),
                light: "Demands at least 6-8 hours of direct sunlight daily. Place in your \
                        brightest window, preferably south-facing. Insufficient light results \
                        in leggy growth and few flowers."
                    .to_string(),
                soil: "Must have extremely well-draining soil. Use a mix of 50% cactus soil, \
                       25% perlite, and 25% coarse sand or pumice. Never use regular potting \
                       soil as it retains too much moisture."
                    .to_string(),
                humidity: "Prefers dry air conditions (30-40% humidity). Excessive humidity \
                           can lead to root rot and fungal problems. Ensure good air \
                           circulation around the plant at all times."
                    .to_string(),
                fertilizing: "Apply a phosphorus-rich, low-nitrogen fertilizer (such as \
                              5-15-5) diluted to half strength once monthly during spring and \
                              summer growing season. Do not fertilize in fall or winter."
                    .to_string(),
            }),
            facts: Some(vec![
                "Often called 'Desert Rose' because of its rose-like flowers and ability to \
                 thrive in arid conditions."
                    .to_string(),
                "The swollen caudex (base) stores water, allowing it to survive long periods \
                 of drought."
                    .to_string(),
                "All parts of the plant contain toxic cardiac glycosides, so care should be \
                 taken around children and pets."
                    .to_string(),
                "Highly prized for bonsai cultivation due to its thick trunk and \
                 miniaturization potential."
                    .to_string(),
                "In its native habitat, can grow up to 10 feet tall and live for decades."
                    .to_string(),
            ]),
            likes_count: 0,
        },
        PlantRecord {
            id: "chinese-hibiscus".to_string(),
            name: "Chinese Hibiscus".to_string(),
            scientific_name: "Hibiscus rosa-sinensis".to_string(),
            image: "/assets/plants/4.png".to_string(),
            watering_needs: CareLevel::Medium,
            sunlight: CareLevel::High,
            temperature: "65-80°F".to_string(),
            description: "The Chinese hibiscus is a flowering plant known for its large, showy \
                          flowers."
                .to_string(),
            price: Some("Rs. 359/-".to_string()),
            care_instructions: Some(CareInstructions {
                watering: "Keep soil consistently moist but not waterlogged. Water thoroughly \
                           when the top inch of soil feels dry. Increase watering during \
                           blooming and hot periods; reduce in winter."
                    .to_string(),
                light: "Requires at least 6 hours of direct sunlight daily for abundant \
                        flowering. Place near south or west-facing windows when grown indoors. \
                        Protect from intense afternoon sun in very hot regions."
                    .to_string(),
                soil: "Plant in rich, well-draining soil with a pH between 6.0-6.5. A mix of \
                       quality potting soil with 25% perlite or pumice ensures good drainage \
                       while retaining necessary moisture."
                    .to_string(),
                humidity: "Thrives in moderate to high humidity (50-60%). Increase humidity by \
                           grouping plants together or using a humidity tray. Regular misting \
                           benefits the plant in dry climates."
                    .to_string(),
                fertilizing: "Feed with a high-potassium fertilizer (such as 10-10-20) every \
                              2 weeks during growing season. Reduce to monthly in fall and \
                              stop completely in winter to allow dormancy."
                    .to_string(),
            }),
            facts: Some(vec![
                "The national flower of Malaysia and the state flower of Hawaii.".to_string(),
                "Individual flowers last only 1-2 days, but plants bloom continuously \
                 throughout the season."
                    .to_string(),
                "Contains vitamin C and is used to make herbal teas in many cultures."
                    .to_string(),
                "Has been used in traditional medicine for centuries to treat high blood \
                 pressure."
                    .to_string(),
                "The red varieties are especially popular in religious ceremonies in Hindu \
                 culture."
                    .to_string(),
            ]),
            likes_count: 0,
        },
    ]
}
