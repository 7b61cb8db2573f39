use progresso::store::count_by_platform;
use progresso::{Platform, SyncResult};

use super::{OutputFormat, build_service, print_rows};
use crate::config::Config;
use crate::progress::LoggingReporter;

#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
struct SummaryRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

fn summary_rows(result: &SyncResult, stored: &[(Platform, u64)]) -> Vec<SummaryRow> {
    let mut rows = vec![SummaryRow {
        kind: "synced",
        detail: result.synced_count.to_string(),
    }];
    rows.extend(stored.iter().map(|(platform, count)| SummaryRow {
        kind: "stored",
        detail: format!("{platform}: {count}"),
    }));
    rows.extend(result.errors.iter().map(|e| SummaryRow {
        kind: "error",
        detail: e.clone(),
    }));
    rows.extend(result.warnings.iter().map(|w| SummaryRow {
        kind: "warning",
        detail: w.clone(),
    }));
    rows
}

pub(crate) async fn handle_sync(
    user_id: &str,
    output: OutputFormat,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (db_conn, service) = build_service(config, database_url).await?;
    let links = progresso::profile::find_links(&db_conn, user_id)
        .await?
        .unwrap_or_default();

    let reporter = LoggingReporter::new().callback();
    let result = service
        .engine()
        .sync_user(user_id, &links, Some(&reporter))
        .await;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => {
            let stored = count_by_platform(&db_conn, user_id).await?;
            print_rows(summary_rows(&result, &stored), output)?;
        }
    }

    Ok(())
}
