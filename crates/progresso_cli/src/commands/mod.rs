pub(crate) mod meta;
pub(crate) mod migrate;
pub(crate) mod problems;
pub(crate) mod profile;
pub(crate) mod serve;
pub(crate) mod sync;

use std::sync::Arc;

use clap::ValueEnum;
use sea_orm::DatabaseConnection;

use progresso::{DbProfileDirectory, DbStore, ProblemService, SyncEngine, db};

use crate::config::Config;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// Print rows as a rounded table or pretty JSON.
pub(crate) fn print_rows<T>(rows: Vec<T>, format: OutputFormat) -> Result<(), serde_json::Error>
where
    T: serde::Serialize + tabled::Tabled,
{
    match format {
        OutputFormat::Table => {
            let mut table = tabled::Table::new(rows);
            table.with(tabled::settings::Style::rounded());
            println!("{}", table);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

/// Connect, migrate, and wire the sync engine and read service.
pub(crate) async fn build_service(
    config: &Config,
    database_url: &str,
) -> Result<(Arc<DatabaseConnection>, ProblemService), Box<dyn std::error::Error>> {
    let db_conn = Arc::new(db::connect_and_migrate(database_url).await?);
    let service = service_for(config, Arc::clone(&db_conn))?;
    Ok((db_conn, service))
}

pub(crate) fn service_for(
    config: &Config,
    db_conn: Arc<DatabaseConnection>,
) -> Result<ProblemService, Box<dyn std::error::Error>> {
    let store = Arc::new(DbStore::new(Arc::clone(&db_conn)));
    let engine = SyncEngine::from_options(&config.source_options(), store)?;
    Ok(ProblemService::new(
        Arc::new(engine),
        Arc::new(DbProfileDirectory::new(db_conn)),
        config.service_options(),
    ))
}
