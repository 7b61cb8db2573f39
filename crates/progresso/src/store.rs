//! Persistence for solved problems.
//!
//! Free functions operate on a `DatabaseConnection` directly; [`DbStore`]
//! wraps them behind the [`ProblemStore`] trait the sync engine and read
//! service depend on.

mod batch;
mod errors;
mod query;
mod single;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::entity::user_problem::{ActiveModel, Model};

pub use batch::{UpsertOutcome, upsert_batch};
pub use errors::{Result, StoreError};
pub use query::{count_by_platform, count_by_user, find_by_user};
pub use single::{find_by_natural_key, upsert};

/// Where synced problems are written and read back from.
#[async_trait]
pub trait ProblemStore: Send + Sync {
    /// Write each model independently on the `(user_id, platform, problem_url)` key.
    ///
    /// Returns one outcome per input, in input order.
    async fn upsert_batch(&self, models: Vec<ActiveModel>) -> Vec<UpsertOutcome>;

    /// All rows for a user, ordered by `date_solved` descending.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Model>>;
}

/// Database-backed store sharing one connection handle.
#[derive(Clone)]
pub struct DbStore {
    db: Arc<DatabaseConnection>,
}

impl DbStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }
}

#[async_trait]
impl ProblemStore for DbStore {
    async fn upsert_batch(&self, models: Vec<ActiveModel>) -> Vec<UpsertOutcome> {
        batch::upsert_batch(&self.db, models).await
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Model>> {
        query::find_by_user(&self.db, user_id).await
    }
}
