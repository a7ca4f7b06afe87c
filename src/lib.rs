pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::identify::IdentificationWorkflow;
pub use app::likes::{LikeCoordinator, LikeOutcome, LikeState};
pub use app::plant_service::PlantService;
pub use domain::plant::{CareInstructions, CareLevel, PlantRecord};
pub use infra::gemini::{GeminiClient, VisionError, VisionModel};
pub use storage::catalog::LocalCatalog;
pub use storage::local_likes::LocalLikeStore;
pub use storage::postgres::PgStore;
