use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::entity::platform::Platform;
use crate::entity::user_problem::{Column, Entity as UserProblem, Model};

use super::errors::Result;

// ─── Query Operations ────────────────────────────────────────────────────────

/// All problems for a user, most recently solved first, ties by name.
pub async fn find_by_user(db: &DatabaseConnection, user_id: &str) -> Result<Vec<Model>> {
    let rows = UserProblem::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::DateSolved)
        .order_by_asc(Column::ProblemName)
        .all(db)
        .await?;
    Ok(rows)
}

/// Number of problems stored for a user.
pub async fn count_by_user(db: &DatabaseConnection, user_id: &str) -> Result<u64> {
    let count = UserProblem::find()
        .filter(Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count)
}

/// Per-platform problem counts for a user, in fixed platform order.
pub async fn count_by_platform(db: &DatabaseConnection, user_id: &str) -> Result<Vec<(Platform, u64)>> {
    let mut counts = Vec::with_capacity(Platform::ALL.len());
    for platform in Platform::ALL {
        let count = UserProblem::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Platform.eq(platform))
            .count(db)
            .await?;
        counts.push((platform, count));
    }
    Ok(counts)
}
