//! Sync-then-serve read path.
//!
//! [`ProblemService::list_problems`] brings a user's rows up to date before
//! returning them. Syncs for the same user are serialized, and a reader that
//! waited on a sync finishing after it arrived reuses that sync.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::entity::user_problem::Model;
use crate::profile::{ProfileDirectory, UserProfileLinks};
use crate::store::Result;
use crate::sync::{SyncEngine, SyncResult};

/// Read-path options.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Serve stored rows without syncing when the user's last sync completed
    /// within this interval. Zero syncs on every read.
    pub min_sync_interval: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            min_sync_interval: Duration::zero(),
        }
    }
}

type SyncSlot = Arc<tokio::sync::Mutex<Option<DateTime<Utc>>>>;

pub struct ProblemService {
    engine: Arc<SyncEngine>,
    profiles: Arc<dyn ProfileDirectory>,
    options: ServiceOptions,
    /// Completion time of each user's last sync, one lock per user.
    slots: Mutex<HashMap<String, SyncSlot>>,
}

impl ProblemService {
    pub fn new(
        engine: Arc<SyncEngine>,
        profiles: Arc<dyn ProfileDirectory>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            engine,
            profiles,
            options,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    fn slot(&self, user_id: &str) -> SyncSlot {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(slots.entry(user_id.to_string()).or_default())
    }

    /// Drop slots nobody holds whose last sync can no longer cause a skip.
    fn prune_slots(&self) {
        let now = self.engine.clock().now();
        let interval = self.options.min_sync_interval;
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(last) => last.is_some_and(|completed| {
                    interval > Duration::zero() && now - completed < interval
                }),
                Err(_) => true,
            }
        });
    }

    /// Sync the user unless a recent or concurrent sync makes it redundant.
    ///
    /// Returns `None` when the sync was skipped.
    pub async fn sync_if_due(&self, user_id: &str) -> Option<SyncResult> {
        let slot = self.slot(user_id);
        let result = self.sync_in_slot(user_id, &slot).await;
        drop(slot);
        self.prune_slots();
        result
    }

    async fn sync_in_slot(&self, user_id: &str, slot: &SyncSlot) -> Option<SyncResult> {
        let clock = self.engine.clock();
        let requested_at = clock.now();
        let mut last_completed = slot.lock().await;

        if let Some(completed) = *last_completed {
            if completed > requested_at {
                tracing::debug!(user_id, "reusing sync that completed while waiting");
                return None;
            }
            let interval = self.options.min_sync_interval;
            if interval > Duration::zero() && requested_at - completed < interval {
                tracing::debug!(user_id, %completed, "last sync is fresh, skipping");
                return None;
            }
        }

        let links = match self.profiles.links_for(user_id).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "profile lookup failed, syncing without links");
                UserProfileLinks::default()
            }
        };

        tracing::info!(user_id, "sync triggered by read");
        let result = self.engine.sync_user(user_id, &links, None).await;
        if !result.is_clean() {
            tracing::warn!(
                user_id,
                errors = result.errors.len(),
                warnings = result.warnings.len(),
                "sync finished with problems"
            );
        }
        for error in &result.errors {
            tracing::warn!(user_id, error = %error, "sync error");
        }
        for warning in &result.warnings {
            tracing::info!(user_id, warning = %warning, "sync warning");
        }

        *last_completed = Some(clock.now());
        Some(result)
    }

    #[cfg(test)]
    fn tracked_users(&self) -> Vec<String> {
        let slots = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut users: Vec<String> = slots.keys().cloned().collect();
        users.sort();
        users
    }

    /// Sync, then return every stored row for the user, newest solve first.
    ///
    /// Sync problems are logged and never fail the read.
    ///
    /// # Errors
    /// Returns `StoreError` only if the final query fails.
    pub async fn list_problems(&self, user_id: &str) -> Result<Vec<Model>> {
        self.sync_if_due(user_id).await;
        self.engine.store().find_by_user(user_id).await
    }
}
