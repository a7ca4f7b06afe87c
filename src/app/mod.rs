pub mod identify;
pub mod likes;
pub mod plant_service;
