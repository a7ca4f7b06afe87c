//! End-to-end HTTP test in local-only mode: no database, no vision model,
//! everything served from the seeded catalog and the in-memory like store.

use serde_json::{json, Value};
use std::sync::Arc;

use plantid::storage::seed::seed_plants;
use plantid::transport;
use plantid::{
    IdentificationWorkflow, LikeCoordinator, LocalCatalog, LocalLikeStore, PlantService,
};

async fn spawn_local_server() -> String {
    let catalog = Arc::new(LocalCatalog::new(seed_plants()));
    let likes = Arc::new(LocalLikeStore::in_memory());
    let service = Arc::new(PlantService::new(None, catalog, likes));
    let identifier = Arc::new(IdentificationWorkflow::new(None, service.clone()));
    let coordinator = Arc::new(LikeCoordinator::new(service.clone()));
    let state = transport::http::AppState {
        plants: service,
        identifier,
        likes: coordinator,
    };

    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn local_mode_api_flow() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_local_server().await;
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // --- Health reports local mode ---
    let health = client
        .get(format!("{base_url}/health"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(health["success"].as_bool().unwrap_or(false));
    assert_eq!(health["data"]["backing_store"], "local");
    assert_eq!(health["data"]["identification"], "unavailable");

    // --- Catalog reads ---
    let all = client
        .get(format!("{base_url}/api/plants"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(all["data"]["plants"].as_array().map(Vec::len), Some(4));

    let search = client
        .get(format!("{base_url}/api/plants/search?q=gerbera"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let hits = search["data"]["plants"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits
        .iter()
        .all(|p| p["name"].as_str().unwrap().contains("Gerbera")));

    let featured = client
        .get(format!("{base_url}/api/plants/featured?count=3"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let featured_ids: Vec<&str> = featured["data"]["plants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        featured_ids,
        ["red-gerbera-daisy", "gerbera-daisy", "pink-adenium"]
    );

    // --- Single plant, with the converted temperature appended ---
    let detail = client
        .get(format!("{base_url}/api/plants/gerbera-daisy"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(detail["data"]["plant"]["scientificName"], "Gerbera jamesonii");
    assert_eq!(detail["data"]["temperature_display"], "65-75°F (18-24°C)");

    let missing = client
        .get(format!("{base_url}/api/plants/not-a-plant"))
        .send()
        .await?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    // --- Device mint ---
    let device = client
        .post(format!("{base_url}/api/devices"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let device_id = device["data"]["device_id"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&device_id).is_ok());

    // --- Likes: double like counts once ---
    for expected_count in [1, 1] {
        let like = client
            .post(format!("{base_url}/api/plants/gerbera-daisy/likes"))
            .json(&json!({ "device_id": device_id }))
            .send()
            .await?
            .json::<Value>()
            .await?;
        assert!(like["success"].as_bool().unwrap_or(false));
        assert_eq!(like["data"]["count"], expected_count);
        assert_eq!(like["data"]["liked"], true);
    }

    let status = client
        .get(format!(
            "{base_url}/api/plants/gerbera-daisy/likes?device_id={device_id}"
        ))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(status["data"]["liked"], true);
    assert_eq!(status["data"]["count"], 1);

    // --- Popularity reflects the like ---
    let popular = client
        .get(format!("{base_url}/api/plants/popular?count=1"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(popular["data"]["plants"][0]["id"], "gerbera-daisy");
    assert_eq!(popular["data"]["plants"][0]["likesCount"], 1);

    // --- Unlike, then a second unlike fails without going negative ---
    let unlike = client
        .delete(format!("{base_url}/api/plants/gerbera-daisy/likes"))
        .json(&json!({ "device_id": device_id }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(unlike["success"].as_bool().unwrap_or(false));
    assert_eq!(unlike["data"]["count"], 0);

    let unlike_again = client
        .delete(format!("{base_url}/api/plants/gerbera-daisy/likes"))
        .json(&json!({ "device_id": device_id }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(unlike_again["success"], false);
    assert_eq!(unlike_again["data"]["count"], 0);

    // --- Toggle endpoint flips state ---
    let toggled_on = client
        .post(format!("{base_url}/api/plants/pink-adenium/likes/toggle"))
        .json(&json!({ "device_id": device_id }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(toggled_on["data"]["liked"], true);

    let toggled_off = client
        .post(format!("{base_url}/api/plants/pink-adenium/likes/toggle"))
        .json(&json!({ "device_id": device_id }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(toggled_off["data"]["liked"], false);

    // --- Identify without a vision model: placeholder, never an error ---
    let identified = client
        .post(format!("{base_url}/api/identify"))
        .json(&json!({ "image": "data:image/png;base64,aGVsbG8gcGxhbnQ=" }))
        .send()
        .await?;
    assert_eq!(identified.status(), reqwest::StatusCode::OK);
    let identified = identified.json::<Value>().await?;
    assert!(identified["success"].as_bool().unwrap_or(false));
    assert_eq!(identified["data"]["plant"]["name"], "Try Again");
    assert_eq!(
        identified["data"]["plant"]["facts"].as_array().map(Vec::len),
        Some(5)
    );

    // --- Malformed identify body answers 422 ---
    let bad = client
        .post(format!("{base_url}/api/identify"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(bad.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

    // --- Save a new plant, then read it back ---
    let saved = client
        .post(format!("{base_url}/api/plants"))
        .json(&json!({
            "id": "peace-lily",
            "name": "Peace Lily",
            "scientificName": "Spathiphyllum wallisii",
            "image": "/assets/plants/5.png",
            "wateringNeeds": "high",
            "sunlight": "low",
            "temperature": "50-60°F",
            "description": "An elegant shade-loving houseplant."
        }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(saved["success"].as_bool().unwrap_or(false));

    let lily = client
        .get(format!("{base_url}/api/plants/peace-lily"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(lily["data"]["plant"]["name"], "Peace Lily");
    assert_eq!(lily["data"]["temperature_display"], "50-60°F (10-16°C)");
    assert_eq!(lily["data"]["plant"]["wateringNeeds"], "high");

    Ok(())
}
