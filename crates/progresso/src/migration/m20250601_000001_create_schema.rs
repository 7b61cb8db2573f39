//! Initial migration: solved problems and linked profiles.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_user_problems(manager).await?;
        self.create_user_profiles(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProblems::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_user_problems(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProblems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProblems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserProblems::UserId).string().not_null())
                    .col(ColumnDef::new(UserProblems::Platform).string().not_null())
                    .col(ColumnDef::new(UserProblems::ProblemUrl).text().not_null())
                    .col(ColumnDef::new(UserProblems::ProblemName).text().not_null())
                    .col(
                        ColumnDef::new(UserProblems::Difficulty)
                            .string()
                            .not_null()
                            .default("Unknown"),
                    )
                    .col(ColumnDef::new(UserProblems::DateSolved).date().not_null())
                    .col(
                        ColumnDef::new(UserProblems::SyncedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Conflict target for upserts.
        manager
            .create_index(
                Index::create()
                    .name("idx_user_problems_user_platform_url")
                    .table(UserProblems::Table)
                    .col(UserProblems::UserId)
                    .col(UserProblems::Platform)
                    .col(UserProblems::ProblemUrl)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_problems_user_date")
                    .table(UserProblems::Table)
                    .col(UserProblems::UserId)
                    .col(UserProblems::DateSolved)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_user_profiles(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::LeetcodeUrl).text().null())
                    .col(
                        ColumnDef::new(UserProfiles::GeeksforgeeksUsername)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::CodeforcesHandle)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum UserProblems {
    Table,
    Id,
    UserId,
    Platform,
    ProblemUrl,
    ProblemName,
    Difficulty,
    DateSolved,
    SyncedAt,
}

#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    UserId,
    LeetcodeUrl,
    GeeksforgeeksUsername,
    CodeforcesHandle,
    UpdatedAt,
}
