//! LeetCode GraphQL client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde_json::json;

use super::convert::to_solved_problems;
use super::types::{GraphqlEnvelope, LeetCodeProfile};
use crate::entity::platform::Platform;
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::platform::{AdapterError, FetchOutcome, PlatformAdapter, Result};

/// Default LeetCode host.
pub const LEETCODE_URL: &str = "https://leetcode.com";

/// Default size of the recent-submission window.
pub const DEFAULT_RECENT_LIMIT: u32 = 20;

const PROFILE_QUERY: &str = r#"
query userProfile($username: String!, $limit: Int!) {
  matchedUser(username: $username) {
    username
    submitStats {
      acSubmissionNum { difficulty count }
    }
  }
  recentSubmissionList(username: $username, limit: $limit) {
    title
    titleSlug
    timestamp
    statusDisplay
    lang
  }
}
"#;

/// Adapter over LeetCode's public GraphQL endpoint.
///
/// Only the recent-submission window is exposed without authentication, so
/// older solves are never seen.
#[derive(Clone)]
pub struct LeetCodeAdapter {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    recent_limit: u32,
}

impl LeetCodeAdapter {
    /// Create an adapter with its own reqwest transport.
    pub fn new(base_url: &str, recent_limit: u32, timeout: StdDuration) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(timeout)?;
        Ok(Self::new_with_transport(
            base_url,
            recent_limit,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        base_url: &str,
        recent_limit: u32,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            recent_limit,
        }
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    /// Run the profile query and return the raw `data` object.
    ///
    /// This is what the public-profile endpoint serves as-is.
    pub async fn fetch_profile(&self, username: &str) -> Result<serde_json::Value> {
        let body = json!({
            "query": PROFILE_QUERY,
            "variables": { "username": username, "limit": self.recent_limit },
        });
        let request = HttpRequest::post_json(self.graphql_url(), serde_json::to_vec(&body)?);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(AdapterError::status(response.status, &response.body_text()));
        }

        let envelope: GraphqlEnvelope = serde_json::from_slice(&response.body)?;
        if let Some(first) = envelope.errors.first() {
            return Err(AdapterError::source_failure(first.message.clone()));
        }

        envelope
            .data
            .ok_or_else(|| AdapterError::parse("GraphQL response has no data"))
    }
}

#[async_trait]
impl PlatformAdapter for LeetCodeAdapter {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch_solved(&self, username: &str) -> Result<FetchOutcome> {
        let data = self.fetch_profile(username).await?;
        let profile: LeetCodeProfile = serde_json::from_value(data)?;

        let submissions = profile.recent_submission_list.as_deref().unwrap_or_default();
        let problems = to_solved_problems(submissions)?;
        tracing::debug!(
            username,
            fetched = submissions.len(),
            accepted = problems.len(),
            "fetched LeetCode recent submissions"
        );

        let total = profile.total_solved();
        let outcome = FetchOutcome::new(problems);
        if outcome.problems.is_empty() && total > 0 {
            return Ok(outcome.with_warning(format!(
                "LeetCode: {username} reports {total} solved problems, but none are in the recent submission window."
            )));
        }
        Ok(outcome)
    }
}
