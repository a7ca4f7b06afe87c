//! In-memory catalog repository.
//!
//! This is the deterministic fallback behind every read operation: a plain
//! list of records, constructed once from an injected seed dataset and
//! shared by reference. Order is insertion order and is what "catalog
//! order" means everywhere else (featured picks, popularity tie-breaks).

use tokio::sync::RwLock;

use crate::domain::plant::PlantRecord;

pub struct LocalCatalog {
    plants: RwLock<Vec<PlantRecord>>,
}

impl LocalCatalog {
    pub fn new(seed: Vec<PlantRecord>) -> Self {
        Self {
            plants: RwLock::new(seed),
        }
    }

    pub async fn all(&self) -> Vec<PlantRecord> {
        self.plants.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<PlantRecord> {
        self.plants
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Case-insensitive substring match against common and scientific name.
    pub async fn search(&self, query: &str) -> Vec<PlantRecord> {
        let needle = query.to_lowercase();
        self.plants
            .read()
            .await
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.scientific_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// First `count` records in catalog order.
    pub async fn featured(&self, count: usize) -> Vec<PlantRecord> {
        self.plants.read().await.iter().take(count).cloned().collect()
    }

    /// Replaces the record with the same id, or appends a new one.
    pub async fn upsert(&self, plant: PlantRecord) {
        let mut plants = self.plants.write().await;
        match plants.iter_mut().find(|p| p.id == plant.id) {
            Some(existing) => *existing = plant,
            None => plants.push(plant),
        }
    }

    pub async fn len(&self) -> usize {
        self.plants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plants.read().await.is_empty()
    }
}
