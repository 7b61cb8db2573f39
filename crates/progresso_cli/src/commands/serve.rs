//! HTTP read endpoint.
//!
//! - `GET /api/user_problems?user_id=...` syncs the user, then returns every
//!   stored row, newest solve first.
//! - `GET /api/leetcode-public-profile?username=...` proxies the raw LeetCode
//!   profile.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use progresso::ProblemService;
use progresso::leetcode::LeetCodeAdapter;

use super::build_service;
use crate::config::Config;

#[derive(Clone)]
pub(crate) struct AppState {
    service: Arc<ProblemService>,
    leetcode: Arc<LeetCodeAdapter>,
}

impl AppState {
    pub(crate) fn new(service: ProblemService, leetcode: LeetCodeAdapter) -> Self {
        Self {
            service: Arc::new(service),
            leetcode: Arc::new(leetcode),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserProblemsParams {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublicProfileParams {
    username: Option<String>,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/user_problems", get(user_problems))
        .route("/api/leetcode-public-profile", get(leetcode_public_profile))
        .with_state(state)
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn user_problems(
    State(state): State<AppState>,
    Query(params): Query<UserProblemsParams>,
) -> Response {
    let Some(user_id) = required(params.user_id) else {
        return message(StatusCode::BAD_REQUEST, "User ID is required.");
    };

    match state.service.list_problems(&user_id).await {
        Ok(problems) => Json(problems).into_response(),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to read problems");
            message(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing problems: {e}"),
            )
        }
    }
}

async fn leetcode_public_profile(
    State(state): State<AppState>,
    Query(params): Query<PublicProfileParams>,
) -> Response {
    let Some(username) = required(params.username) else {
        return message(StatusCode::BAD_REQUEST, "Username is required.");
    };

    match state.leetcode.fetch_profile(&username).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => {
            tracing::error!(username = %username, error = %e, "LeetCode profile fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": format!("Failed to fetch LeetCode public profile: {e}"),
                    "detail": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

pub(crate) async fn handle_serve(
    bind: &str,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_db_conn, service) = build_service(config, database_url).await?;
    let sources = config.source_options();
    let leetcode = LeetCodeAdapter::new(
        &sources.leetcode_url,
        sources.leetcode_recent_limit,
        sources.timeout,
    )?;

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| format!("Failed to bind to {bind}: {e}"))?;
    tracing::info!("Serving on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(service, leetcode)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
