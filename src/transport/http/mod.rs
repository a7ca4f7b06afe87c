pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod devices;
    pub mod health;
    pub mod identify;
    pub mod likes;
    pub mod plants;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
