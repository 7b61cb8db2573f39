use progresso::UserProblemModel;
use progresso::store::find_by_user;

use super::{OutputFormat, build_service, print_rows};
use crate::config::Config;

#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
struct ProblemRow {
    #[tabled(rename = "Solved")]
    date_solved: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Problem")]
    problem_name: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "URL")]
    problem_url: String,
}

impl From<&UserProblemModel> for ProblemRow {
    fn from(model: &UserProblemModel) -> Self {
        Self {
            date_solved: model.date_solved.format("%Y-%m-%d").to_string(),
            platform: model.platform.to_string(),
            problem_name: model.problem_name.clone(),
            difficulty: model.difficulty.clone(),
            problem_url: model.problem_url.clone(),
        }
    }
}

pub(crate) async fn handle_problems(
    user_id: &str,
    no_sync: bool,
    output: OutputFormat,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (db_conn, service) = build_service(config, database_url).await?;

    let problems = if no_sync {
        find_by_user(&db_conn, user_id).await?
    } else {
        service.list_problems(user_id).await?
    };

    if problems.is_empty() {
        tracing::info!(user_id, "No stored problems");
    }

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&problems)?),
        OutputFormat::Table => {
            print_rows(problems.iter().map(ProblemRow::from).collect(), output)?
        }
    }

    Ok(())
}
