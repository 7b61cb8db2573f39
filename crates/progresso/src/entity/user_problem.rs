//! UserProblem entity - the canonical solved-problem record.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::platform::Platform;

/// One solved problem owned by one user.
///
/// `(user_id, platform, problem_url)` is unique; it is the conflict target for
/// every upsert, so re-syncing a problem updates this row in place.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_problems")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    // ─── Conflict Key ────────────────────────────────────────────────────────
    /// Owning user, as issued by the external identity provider.
    pub user_id: String,
    /// Platform the problem was solved on.
    pub platform: Platform,
    /// Platform-specific canonical problem link.
    #[sea_orm(column_type = "Text")]
    pub problem_url: String,

    // ─── Content ─────────────────────────────────────────────────────────────
    /// Problem title.
    #[sea_orm(column_type = "Text")]
    pub problem_name: String,
    /// Difficulty label. Easy/Medium/Hard style for LeetCode and GFG; rating,
    /// tag list, or "Unknown" for Codeforces.
    pub difficulty: String,
    /// Calendar date the problem was solved.
    pub date_solved: Date,

    // ─── Tracking ────────────────────────────────────────────────────────────
    /// When this row was last written by a sync.
    pub synced_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
