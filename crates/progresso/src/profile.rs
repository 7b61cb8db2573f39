//! Linked platform identities for a user.
//!
//! The sync engine only needs [`UserProfileLinks`]; where they come from is
//! behind [`ProfileDirectory`]. [`DbProfileDirectory`] reads the
//! `user_profiles` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, sea_query::OnConflict};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::user_profile::{ActiveModel, Column, Entity as UserProfile, Model};

/// Errors raised while looking up or saving profile links.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, ProfileError>;

/// The external identities a user has linked. Any subset may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileLinks {
    pub leetcode_url: Option<String>,
    pub geeksforgeeks_username: Option<String>,
    pub codeforces_handle: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl UserProfileLinks {
    pub fn leetcode_url(&self) -> Option<&str> {
        non_blank(&self.leetcode_url)
    }

    pub fn geeksforgeeks_username(&self) -> Option<&str> {
        non_blank(&self.geeksforgeeks_username)
    }

    pub fn codeforces_handle(&self) -> Option<&str> {
        non_blank(&self.codeforces_handle)
    }

    /// True when no identity is linked. Blank strings count as absent.
    pub fn is_empty(&self) -> bool {
        self.leetcode_url().is_none()
            && self.geeksforgeeks_username().is_none()
            && self.codeforces_handle().is_none()
    }
}

impl From<Model> for UserProfileLinks {
    fn from(model: Model) -> Self {
        Self {
            leetcode_url: model.leetcode_url,
            geeksforgeeks_username: model.geeksforgeeks_username,
            codeforces_handle: model.codeforces_handle,
        }
    }
}

/// Source of a user's linked identities.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Links for `user_id`; a user with no record has no links.
    async fn links_for(&self, user_id: &str) -> Result<UserProfileLinks>;
}

/// Profile directory backed by the `user_profiles` table.
#[derive(Clone)]
pub struct DbProfileDirectory {
    db: Arc<DatabaseConnection>,
}

impl DbProfileDirectory {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileDirectory for DbProfileDirectory {
    async fn links_for(&self, user_id: &str) -> Result<UserProfileLinks> {
        Ok(find_links(&self.db, user_id).await?.unwrap_or_default())
    }
}

/// Stored links for a user, if any were saved.
pub async fn find_links(db: &DatabaseConnection, user_id: &str) -> Result<Option<UserProfileLinks>> {
    let model = UserProfile::find_by_id(user_id.to_string()).one(db).await?;
    Ok(model.map(UserProfileLinks::from))
}

/// Insert or replace the links stored for a user.
pub async fn save_links(
    db: &DatabaseConnection,
    user_id: &str,
    links: &UserProfileLinks,
    now: DateTime<Utc>,
) -> Result<()> {
    let model = ActiveModel {
        user_id: Set(user_id.to_string()),
        leetcode_url: Set(links.leetcode_url().map(str::to_string)),
        geeksforgeeks_username: Set(links.geeksforgeeks_username().map(str::to_string)),
        codeforces_handle: Set(links.codeforces_handle().map(str::to_string)),
        updated_at: Set(now.fixed_offset()),
    };

    UserProfile::insert(model)
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns([
                    Column::LeetcodeUrl,
                    Column::GeeksforgeeksUsername,
                    Column::CodeforcesHandle,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
