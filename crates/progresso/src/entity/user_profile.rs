//! UserProfile entity - linked platform identities for a user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Identities a user has linked. Any subset may be absent.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Full LeetCode profile URL; the username is its last path segment.
    #[sea_orm(column_type = "Text", nullable)]
    pub leetcode_url: Option<String>,
    pub geeksforgeeks_username: Option<String>,
    pub codeforces_handle: Option<String>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
