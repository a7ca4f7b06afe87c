// src/bin/api_server.rs

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use plantid::infra::config;
use plantid::infra::gemini::VisionModel;
use plantid::storage::seed::seed_plants;
use plantid::transport;
use plantid::{
    GeminiClient, IdentificationWorkflow, LikeCoordinator, LocalCatalog, LocalLikeStore,
    PgStore, PlantService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // --- Catalog + local like store ---
    let catalog = Arc::new(LocalCatalog::new(seed_plants()));
    info!(plants = catalog.len().await, "seeded local catalog");
    let local_likes = Arc::new(LocalLikeStore::open(config::local_likes_path()).await);

    // --- Optional backing store ---
    // A missing DATABASE_URL is a supported mode, and so is a configured
    // database that can't be reached right now: both degrade to local-only.
    let remote = match config::database_url() {
        Some(url) => match PgStore::connect(&url).await {
            Ok(pg) => {
                info!("connected to backing store");
                Some(pg)
            }
            Err(e) => {
                warn!(error = %e, "backing store unreachable, continuing in local-only mode");
                None
            }
        },
        None => {
            info!("DATABASE_URL not set, running in local-only mode");
            None
        }
    };

    // --- Vision model ---
    let vision: Option<Arc<dyn VisionModel>> = match GeminiClient::from_env()? {
        Some(client) => {
            info!(model = client.model(), "vision model configured");
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set, identification will return the placeholder");
            None
        }
    };

    // --- Service wiring ---
    let service = Arc::new(PlantService::new(remote, catalog, local_likes));
    let identifier = Arc::new(IdentificationWorkflow::new(vision, service.clone()));
    let likes = Arc::new(LikeCoordinator::new(service.clone()));
    let app_state = transport::http::AppState {
        plants: service,
        identifier,
        likes,
    };

    // --- API server ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
