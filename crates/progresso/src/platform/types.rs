use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::Set;
use uuid::Uuid;

use crate::entity::platform::Platform;
use crate::entity::user_problem::ActiveModel as UserProblemActiveModel;

use super::errors::Result;

/// Difficulty recorded when a source does not report one.
pub const UNKNOWN_DIFFICULTY: &str = "Unknown";

/// A solved problem from any platform, before it is attached to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedProblem {
    pub platform: Platform,
    pub problem_name: String,
    /// Canonical problem link; part of the persistence conflict key.
    pub problem_url: String,
    pub difficulty: String,
    pub date_solved: NaiveDate,
}

impl SolvedProblem {
    /// Convert into an active model owned by `user_id`, stamped `synced_at`.
    #[must_use]
    pub fn to_active_model(&self, user_id: &str, synced_at: DateTime<Utc>) -> UserProblemActiveModel {
        UserProblemActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            platform: Set(self.platform),
            problem_url: Set(self.problem_url.clone()),
            problem_name: Set(self.problem_name.clone()),
            difficulty: Set(self.difficulty.clone()),
            date_solved: Set(self.date_solved),
            synced_at: Set(synced_at.fixed_offset()),
        }
    }
}

/// What an adapter found for one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub problems: Vec<SolvedProblem>,
    /// Diagnostic for a reachable source whose data looked incomplete.
    pub warning: Option<String>,
}

impl FetchOutcome {
    #[must_use]
    pub fn new(problems: Vec<SolvedProblem>) -> Self {
        Self {
            problems,
            warning: None,
        }
    }

    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

/// A source of solved-problem history.
///
/// Implementations fetch and normalize one platform's data. Reaching the
/// source and finding nothing is `Ok` with an empty list, never an error.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// Fetch everything the source exposes for `identity` (a username or handle).
    async fn fetch_solved(&self, identity: &str) -> Result<FetchOutcome>;
}
