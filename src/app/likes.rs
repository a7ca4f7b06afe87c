//! Like/unlike coordination.
//!
//! Tracks an explicit three-state value per (plant, device) pair instead of
//! flipping a boolean from multiple call sites: `Unliked` →
//! `LikedPending` → `LikedConfirmed`, with the pending state reverted when
//! the store refuses the write. Until the first store lookup resolves, a
//! pair reads as unliked (fail-closed). A toggle for a pair that already
//! has one in flight is a no-op.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;
use utoipa::ToSchema;

use crate::app::plant_service::PlantService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LikeState {
    Unliked,
    LikedPending,
    LikedConfirmed,
}

/// What a like/unlike/toggle call produced. `ok` is the boolean failure
/// channel: store errors and failing no-ops report `false`, they never
/// raise. `changed` is `false` for no-ops (already in the requested state,
/// or another call in flight).
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct LikeOutcome {
    pub ok: bool,
    pub changed: bool,
    pub liked: bool,
    pub count: i64,
}

type PairKey = (String, String);

pub struct LikeCoordinator {
    service: Arc<PlantService>,
    in_flight: Mutex<HashSet<PairKey>>,
    states: Mutex<HashMap<PairKey, LikeState>>,
}

impl LikeCoordinator {
    pub fn new(service: Arc<PlantService>) -> Self {
        Self {
            service,
            in_flight: Mutex::new(HashSet::new()),
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Resolved liked-state plus current count for display.
    pub async fn status(&self, plant_id: &str, device_id: &str) -> (bool, i64) {
        let key = (plant_id.to_string(), device_id.to_string());
        let liked = self.resolve_liked(&key).await;
        let count = self.service.likes_count(plant_id).await;
        (liked, count)
    }

    pub async fn like(&self, plant_id: &str, device_id: &str) -> LikeOutcome {
        self.run_guarded(plant_id, device_id, Intent::Like).await
    }

    pub async fn unlike(&self, plant_id: &str, device_id: &str) -> LikeOutcome {
        self.run_guarded(plant_id, device_id, Intent::Unlike).await
    }

    /// Flips the current state: like when unliked, unlike when liked.
    pub async fn toggle(&self, plant_id: &str, device_id: &str) -> LikeOutcome {
        self.run_guarded(plant_id, device_id, Intent::Toggle).await
    }

    async fn run_guarded(&self, plant_id: &str, device_id: &str, intent: Intent) -> LikeOutcome {
        let key = (plant_id.to_string(), device_id.to_string());

        let busy = {
            let mut in_flight = self.in_flight.lock().await;
            !in_flight.insert(key.clone())
        };
        if busy {
            // A call for this pair is already running; report current state
            // without acting.
            let liked = self.cached_liked(&key).await;
            let count = self.service.likes_count(plant_id).await;
            return LikeOutcome {
                ok: true,
                changed: false,
                liked,
                count,
            };
        }

        let currently_liked = self.resolve_liked(&key).await;
        let outcome = match (intent, currently_liked) {
            (Intent::Like, true) => self.noop(&key, true).await,
            (Intent::Like, false) | (Intent::Toggle, false) => self.do_like(&key).await,
            (Intent::Unlike, false) => {
                // Unliking something never liked fails without touching the
                // counter.
                let count = self.service.likes_count(&key.0).await;
                LikeOutcome {
                    ok: false,
                    changed: false,
                    liked: false,
                    count,
                }
            }
            (Intent::Unlike, true) | (Intent::Toggle, true) => self.do_unlike(&key).await,
        };

        self.in_flight.lock().await.remove(&key);
        outcome
    }

    async fn noop(&self, key: &PairKey, liked: bool) -> LikeOutcome {
        LikeOutcome {
            ok: true,
            changed: false,
            liked,
            count: self.service.likes_count(&key.0).await,
        }
    }

    async fn do_like(&self, key: &PairKey) -> LikeOutcome {
        self.set_state(key, LikeState::LikedPending).await;
        match self.service.like_plant(&key.0, &key.1).await {
            Ok(_) => {
                self.set_state(key, LikeState::LikedConfirmed).await;
                LikeOutcome {
                    ok: true,
                    changed: true,
                    liked: true,
                    count: self.service.likes_count(&key.0).await,
                }
            }
            Err(e) => {
                warn!(plant_id = %key.0, error = %e, "like failed");
                self.set_state(key, LikeState::Unliked).await;
                LikeOutcome {
                    ok: false,
                    changed: false,
                    liked: false,
                    count: self.service.likes_count(&key.0).await,
                }
            }
        }
    }

    async fn do_unlike(&self, key: &PairKey) -> LikeOutcome {
        match self.service.unlike_plant(&key.0, &key.1).await {
            Ok(removed) => {
                self.set_state(key, LikeState::Unliked).await;
                LikeOutcome {
                    ok: removed,
                    changed: removed,
                    liked: false,
                    count: self.service.likes_count(&key.0).await,
                }
            }
            Err(e) => {
                warn!(plant_id = %key.0, error = %e, "unlike failed");
                // Store refused: the pair stays liked.
                LikeOutcome {
                    ok: false,
                    changed: false,
                    liked: true,
                    count: self.service.likes_count(&key.0).await,
                }
            }
        }
    }

    /// Current state from the cache, falling back to a store lookup. Lookup
    /// failures read as unliked.
    async fn resolve_liked(&self, key: &PairKey) -> bool {
        if let Some(state) = self.states.lock().await.get(key) {
            return matches!(state, LikeState::LikedConfirmed | LikeState::LikedPending);
        }
        let liked = self.service.is_plant_liked(&key.0, &key.1).await;
        self.set_state(
            key,
            if liked {
                LikeState::LikedConfirmed
            } else {
                LikeState::Unliked
            },
        )
        .await;
        liked
    }

    async fn cached_liked(&self, key: &PairKey) -> bool {
        matches!(
            self.states.lock().await.get(key),
            Some(LikeState::LikedConfirmed | LikeState::LikedPending)
        )
    }

    async fn set_state(&self, key: &PairKey, state: LikeState) {
        self.states.lock().await.insert(key.clone(), state);
    }
}

#[derive(Clone, Copy)]
enum Intent {
    Like,
    Unlike,
    Toggle,
}
