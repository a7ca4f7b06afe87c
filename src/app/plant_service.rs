//! The plant catalog façade.
//!
//! Every read tries the configured backing store first and falls back to the
//! seeded in-memory catalog on any error, including "not configured". The
//! try/log/fall-back policy lives in one place (`read_remote_first`) instead
//! of being repeated per method. Reads never return errors to callers; total
//! failure surfaces as an empty result.

use std::future::Future;
use std::sync::Arc;
use tracing::warn;

use crate::domain::plant::PlantRecord;
use crate::storage::catalog::LocalCatalog;
use crate::storage::local_likes::LocalLikeStore;
use crate::storage::postgres::PgStore;

pub struct PlantService {
    remote: Option<PgStore>,
    catalog: Arc<LocalCatalog>,
    local_likes: Arc<LocalLikeStore>,
}

impl PlantService {
    pub fn new(
        remote: Option<PgStore>,
        catalog: Arc<LocalCatalog>,
        local_likes: Arc<LocalLikeStore>,
    ) -> Self {
        Self {
            remote,
            catalog,
            local_likes,
        }
    }

    pub fn remote(&self) -> Option<&PgStore> {
        self.remote.as_ref()
    }

    pub fn has_backing_store(&self) -> bool {
        self.remote.is_some()
    }

    /// The uniform fallback policy: run the remote operation when one is
    /// available, log and use the local result on failure.
    async fn read_remote_first<T, R, L>(&self, op: &'static str, remote: Option<R>, local: L) -> T
    where
        R: Future<Output = anyhow::Result<T>>,
        L: Future<Output = T>,
    {
        if let Some(fut) = remote {
            match fut.await {
                Ok(value) => return value,
                Err(e) => {
                    warn!(op, error = %e, "backing store read failed, falling back to local catalog")
                }
            }
        }
        local.await
    }

    // --- Reads ---

    pub async fn get_all_plants(&self) -> Vec<PlantRecord> {
        self.read_remote_first(
            "get_all_plants",
            self.remote.as_ref().map(|pg| pg.all_plants()),
            self.local_all(),
        )
        .await
    }

    pub async fn get_plant_by_id(&self, id: &str) -> Option<PlantRecord> {
        self.read_remote_first(
            "get_plant_by_id",
            self.remote.as_ref().map(|pg| pg.plant_by_id(id)),
            self.local_get(id),
        )
        .await
    }

    pub async fn search_plants(&self, query: &str) -> Vec<PlantRecord> {
        self.read_remote_first(
            "search_plants",
            self.remote.as_ref().map(|pg| pg.search_plants(query)),
            self.local_search(query),
        )
        .await
    }

    pub async fn get_featured_plants(&self, count: usize) -> Vec<PlantRecord> {
        self.read_remote_first(
            "get_featured_plants",
            self.remote.as_ref().map(|pg| pg.featured_plants(count as i64)),
            self.local_featured(count),
        )
        .await
    }

    pub async fn get_popular_plants(&self, count: usize) -> Vec<PlantRecord> {
        self.read_remote_first(
            "get_popular_plants",
            self.remote.as_ref().map(|pg| pg.popular_plants(count as i64)),
            self.local_popular(count),
        )
        .await
    }

    async fn local_all(&self) -> Vec<PlantRecord> {
        let counts = self.local_likes.counts().await;
        let mut plants = self.catalog.all().await;
        for plant in &mut plants {
            plant.likes_count = counts.get(&plant.id).copied().unwrap_or(0);
        }
        plants
    }

    async fn local_get(&self, id: &str) -> Option<PlantRecord> {
        let mut plant = self.catalog.get(id).await?;
        plant.likes_count = self.local_likes.likes_count(id).await;
        Some(plant)
    }

    async fn local_search(&self, query: &str) -> Vec<PlantRecord> {
        let counts = self.local_likes.counts().await;
        let mut plants = self.catalog.search(query).await;
        for plant in &mut plants {
            plant.likes_count = counts.get(&plant.id).copied().unwrap_or(0);
        }
        plants
    }

    async fn local_featured(&self, count: usize) -> Vec<PlantRecord> {
        let counts = self.local_likes.counts().await;
        let mut plants = self.catalog.featured(count).await;
        for plant in &mut plants {
            plant.likes_count = counts.get(&plant.id).copied().unwrap_or(0);
        }
        plants
    }

    async fn local_popular(&self, count: usize) -> Vec<PlantRecord> {
        let mut plants = self.local_all().await;
        // Stable sort keeps catalog order for equal counts.
        plants.sort_by_key(|p| std::cmp::Reverse(p.likes_count));
        plants.truncate(count);
        plants
    }

    // --- Writes ---

    /// Upserts a record: backing store when configured, local catalog
    /// otherwise. Returns whether the write took effect somewhere.
    pub async fn save_plant(&self, plant: PlantRecord) -> bool {
        match &self.remote {
            Some(pg) => match pg.upsert_plant(&plant).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(plant_id = %plant.id, error = %e, "failed to save plant to backing store");
                    false
                }
            },
            None => {
                self.catalog.upsert(plant).await;
                true
            }
        }
    }

    /// Best-effort persistence of a successful identification: insert the
    /// plant (with care and fact rows) when its id is new, then append to
    /// the identification history. Failures are logged, never raised.
    pub async fn persist_identified(&self, plant: &PlantRecord, image: &str) {
        let Some(pg) = &self.remote else {
            return;
        };

        match pg.plant_exists(&plant.id).await {
            Ok(false) => {
                if let Err(e) = pg.insert_plant(plant).await {
                    warn!(plant_id = %plant.id, error = %e, "failed to persist identified plant");
                }
            }
            Ok(true) => {}
            Err(e) => {
                warn!(plant_id = %plant.id, error = %e, "failed to check for existing plant");
            }
        }

        if let Err(e) = pg.record_identification(image, Some(&plant.id)).await {
            warn!(plant_id = %plant.id, error = %e, "failed to append identification history");
        }
    }

    /// Best-effort history entry for an identification that produced no
    /// plant.
    pub async fn record_failed_identification(&self, image: &str) {
        if let Some(pg) = &self.remote {
            if let Err(e) = pg.record_identification(image, None).await {
                warn!(error = %e, "failed to append identification history");
            }
        }
    }

    // --- Likes ---

    /// Routes to the backing store or the local like store; errors bubble up
    /// so the coordinator can surface a boolean failure.
    pub async fn like_plant(&self, plant_id: &str, device_id: &str) -> anyhow::Result<bool> {
        match &self.remote {
            Some(pg) => pg.like_plant(plant_id, device_id).await,
            None => Ok(self.local_likes.like(plant_id, device_id).await),
        }
    }

    pub async fn unlike_plant(&self, plant_id: &str, device_id: &str) -> anyhow::Result<bool> {
        match &self.remote {
            Some(pg) => pg.unlike_plant(plant_id, device_id).await,
            None => Ok(self.local_likes.unlike(plant_id, device_id).await),
        }
    }

    /// Fail-closed: unknown or failing lookups read as "not liked".
    pub async fn is_plant_liked(&self, plant_id: &str, device_id: &str) -> bool {
        match &self.remote {
            Some(pg) => match pg.is_liked(plant_id, device_id).await {
                Ok(liked) => liked,
                Err(e) => {
                    warn!(plant_id, error = %e, "failed to resolve like state, treating as unliked");
                    false
                }
            },
            None => self.local_likes.is_liked(plant_id, device_id).await,
        }
    }

    pub async fn likes_count(&self, plant_id: &str) -> i64 {
        match &self.remote {
            Some(pg) => match pg.likes_count(plant_id).await {
                Ok(count) => count,
                Err(e) => {
                    warn!(plant_id, error = %e, "failed to read like count");
                    0
                }
            },
            None => self.local_likes.likes_count(plant_id).await,
        }
    }
}
