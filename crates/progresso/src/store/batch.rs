use sea_orm::{ActiveValue, DatabaseConnection, sea_query::OnConflict};

use crate::entity::platform::Platform;
use crate::entity::user_problem::{ActiveModel, Column};

use super::single::upsert;

// ─── Batch Operations ────────────────────────────────────────────────────────

/// Result of writing one record in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub problem_name: String,
    pub platform: Option<Platform>,
    pub problem_url: String,
    /// `Err` carries the failure message.
    pub result: std::result::Result<(), String>,
}

impl UpsertOutcome {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// `"Failed to save problem {name} ({platform}): {message}"` for a failed write.
    pub fn failure_message(&self) -> Option<String> {
        let message = self.result.as_ref().err()?;
        let platform = self
            .platform
            .map_or_else(|| "unknown platform".to_string(), |p| p.to_string());
        Some(format!(
            "Failed to save problem {} ({platform}): {message}",
            self.problem_name
        ))
    }
}

fn active_string(value: &ActiveValue<String>) -> String {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => v.clone(),
        ActiveValue::NotSet => String::new(),
    }
}

fn active_platform(value: &ActiveValue<Platform>) -> Option<Platform> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(*v),
        ActiveValue::NotSet => None,
    }
}

/// Upsert every model independently, in order.
///
/// Each row is its own statement: one failure is recorded in its outcome and
/// never stops the remaining writes. Nothing is retried.
pub async fn upsert_batch(db: &DatabaseConnection, models: Vec<ActiveModel>) -> Vec<UpsertOutcome> {
    let mut outcomes = Vec::with_capacity(models.len());

    for model in models {
        let problem_name = active_string(&model.problem_name);
        let problem_url = active_string(&model.problem_url);
        let platform = active_platform(&model.platform);

        let result = upsert(db, model).await.map_err(|e| {
            tracing::warn!(
                problem = %problem_name,
                url = %problem_url,
                error = %e,
                "failed to upsert problem"
            );
            e.to_string()
        });

        outcomes.push(UpsertOutcome {
            problem_name,
            platform,
            problem_url,
            result,
        });
    }

    outcomes
}

/// Build the `OnConflict` clause for problem upserts.
///
/// Conflict key is `(user_id, platform, problem_url)`. Last write wins on
/// difficulty, date_solved and synced_at; id and problem_name keep their
/// first-written values.
pub(crate) fn build_upsert_on_conflict() -> OnConflict {
    OnConflict::columns([Column::UserId, Column::Platform, Column::ProblemUrl])
        .update_columns([Column::Difficulty, Column::DateSolved, Column::SyncedAt])
        .to_owned()
}
