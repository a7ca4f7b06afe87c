//! File-persisted like store for local-only mode.
//!
//! Mirrors what the backing store tracks, scoped to this installation: which
//! (device, plant) pairs are liked, and a denormalized per-plant counter.
//! State is written as one JSON document after every mutation, best-effort.
//! An unreadable or unparseable file reads as empty state and is overwritten
//! by the next successful write.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LikeState {
    /// device id → set of liked plant ids.
    #[serde(default)]
    liked: HashMap<String, HashSet<String>>,
    /// plant id → like count.
    #[serde(default)]
    counts: HashMap<String, i64>,
}

pub struct LocalLikeStore {
    state: Mutex<LikeState>,
    path: Option<PathBuf>,
}

impl LocalLikeStore {
    /// Loads state from `path`, treating a missing or corrupt file as empty.
    pub async fn open(path: PathBuf) -> Self {
        let state = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<LikeState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "like state file unparseable, starting empty");
                    LikeState::default()
                }
            },
            Err(_) => LikeState::default(),
        };
        Self {
            state: Mutex::new(state),
            path: Some(path),
        }
    }

    /// Store that never touches disk (tests, ephemeral deployments).
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(LikeState::default()),
            path: None,
        }
    }

    pub async fn is_liked(&self, plant_id: &str, device_id: &str) -> bool {
        self.state
            .lock()
            .await
            .liked
            .get(device_id)
            .is_some_and(|plants| plants.contains(plant_id))
    }

    /// Records a like. Idempotent: liking an already-liked plant succeeds
    /// without touching the counter.
    pub async fn like(&self, plant_id: &str, device_id: &str) -> bool {
        let snapshot = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let newly_liked = state
                .liked
                .entry(device_id.to_string())
                .or_default()
                .insert(plant_id.to_string());
            if newly_liked {
                *state.counts.entry(plant_id.to_string()).or_insert(0) += 1;
            }
            self.serialize(state)
        };
        self.persist(snapshot).await;
        true
    }

    /// Removes a like. Returns `false` (and leaves the counter alone) when
    /// the pair was never liked; the counter is clamped at zero.
    pub async fn unlike(&self, plant_id: &str, device_id: &str) -> bool {
        let (removed, snapshot) = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let removed = state
                .liked
                .get_mut(device_id)
                .map(|plants| plants.remove(plant_id))
                .unwrap_or(false);
            if removed {
                let count = state.counts.entry(plant_id.to_string()).or_insert(0);
                *count = (*count - 1).max(0);
            }
            (removed, self.serialize(state))
        };
        if removed {
            self.persist(snapshot).await;
        }
        removed
    }

    pub async fn likes_count(&self, plant_id: &str) -> i64 {
        self.state
            .lock()
            .await
            .counts
            .get(plant_id)
            .copied()
            .unwrap_or(0)
    }

    pub async fn counts(&self) -> HashMap<String, i64> {
        self.state.lock().await.counts.clone()
    }

    fn serialize(&self, state: &LikeState) -> Option<String> {
        if self.path.is_none() {
            return None;
        }
        match serde_json::to_string_pretty(state) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(error = %e, "failed to serialize like state");
                None
            }
        }
    }

    async fn persist(&self, snapshot: Option<String>) {
        let (Some(path), Some(json)) = (&self.path, snapshot) else {
            return;
        };
        if let Err(e) = tokio::fs::write(path, json).await {
            warn!(path = %path.display(), error = %e, "failed to persist like state");
        }
    }
}
