use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::platform::Platform;
use crate::entity::user_problem::{ActiveModel, Column, Entity as UserProblem, Model};

use super::batch::build_upsert_on_conflict;
use super::errors::{Result, StoreError};

// ─── Single Record Operations ────────────────────────────────────────────────

/// Insert or update one problem on its natural key (user_id + platform + problem_url).
///
/// An existing row keeps its id and name; difficulty, date_solved and
/// synced_at take the incoming values.
///
/// # Errors
/// Returns `StoreError::InvalidInput` if a key field is not set, or
/// `StoreError::Database` if the statement fails.
pub async fn upsert(db: &DatabaseConnection, model: ActiveModel) -> Result<()> {
    required_active_value("user_id", &model.user_id)?;
    required_active_value("platform", &model.platform)?;
    required_active_value("problem_url", &model.problem_url)?;

    let mut model = model;
    if model.id.is_not_set() {
        model.id = Set(Uuid::new_v4());
    }

    UserProblem::insert(model)
        .on_conflict(build_upsert_on_conflict())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Find a problem by its natural key.
pub async fn find_by_natural_key(
    db: &DatabaseConnection,
    user_id: &str,
    platform: Platform,
    problem_url: &str,
) -> Result<Option<Model>> {
    UserProblem::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Platform.eq(platform))
        .filter(Column::ProblemUrl.eq(problem_url))
        .one(db)
        .await
        .map_err(StoreError::from)
}

pub(crate) fn required_active_value<T: Clone + Into<sea_orm::Value>>(
    field: &str,
    value: &ActiveValue<T>,
) -> Result<T> {
    match value {
        ActiveValue::Set(value) | ActiveValue::Unchanged(value) => Ok(value.clone()),
        ActiveValue::NotSet => Err(StoreError::missing_field(field)),
    }
}

#[cfg(all(test, feature = "sqlite", feature = "migrate"))]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::connect_and_migrate;

    use super::*;

    fn model(url: &str, difficulty: &str, day: u32) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set("user-1".to_string()),
            platform: Set(Platform::LeetCode),
            problem_url: Set(url.to_string()),
            problem_name: Set("Two Sum".to_string()),
            difficulty: Set(difficulty.to_string()),
            date_solved: Set(NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")),
            synced_at: Set(Utc
                .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
                .unwrap()
                .fixed_offset()),
        }
    }

    #[tokio::test]
    async fn upsert_updates_in_place() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let url = "https://leetcode.com/problems/two-sum/";

        upsert(&db, model(url, "Unknown", 1)).await.expect("first upsert");
        let first = find_by_natural_key(&db, "user-1", Platform::LeetCode, url)
            .await
            .expect("query")
            .expect("row exists");

        upsert(&db, model(url, "Easy", 2)).await.expect("second upsert");
        let second = find_by_natural_key(&db, "user-1", Platform::LeetCode, url)
            .await
            .expect("query")
            .expect("row exists");

        assert_eq!(first.id, second.id);
        assert_eq!(second.difficulty, "Easy");
        assert_eq!(
            second.date_solved,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert!(second.synced_at > first.synced_at);
    }

    #[tokio::test]
    async fn upsert_rejects_missing_key_field() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let mut item = model("https://leetcode.com/problems/two-sum/", "Easy", 1);
        item.problem_url = ActiveValue::NotSet;

        let err = upsert(&db, item).await.expect_err("upsert should fail");
        match err {
            StoreError::InvalidInput { message } => assert!(message.contains("problem_url")),
            other => panic!("expected invalid input error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upsert_assigns_id_when_unset() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let url = "https://leetcode.com/problems/two-sum/";
        let mut item = model(url, "Easy", 1);
        item.id = ActiveValue::NotSet;

        upsert(&db, item).await.expect("upsert should insert");

        let saved = find_by_natural_key(&db, "user-1", Platform::LeetCode, url)
            .await
            .expect("query")
            .expect("row exists");
        assert_ne!(saved.id, Uuid::nil());
    }
}
