//! LeetCode GraphQL data types.

use serde::Deserialize;

use crate::platform::{AdapterError, Result};

/// GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlEnvelope {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// The `data` object of the profile query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeProfile {
    #[serde(default)]
    pub matched_user: Option<MatchedUser>,
    #[serde(default)]
    pub recent_submission_list: Option<Vec<RecentSubmission>>,
}

impl LeetCodeProfile {
    /// Total accepted problems across all difficulties, if reported.
    pub fn total_solved(&self) -> u64 {
        self.matched_user
            .as_ref()
            .and_then(|u| u.submit_stats.as_ref())
            .and_then(|s| {
                s.ac_submission_num
                    .iter()
                    .find(|c| c.difficulty == "All")
                    .or_else(|| s.ac_submission_num.first())
            })
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
    pub username: String,
    #[serde(default)]
    pub submit_stats: Option<SubmitStats>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    #[serde(default)]
    pub ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub count: u64,
}

/// One entry of `recentSubmissionList`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    pub title: String,
    pub title_slug: String,
    pub timestamp: Timestamp,
    pub status_display: String,
    /// Not part of the public schema today; honored when present.
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Epoch seconds, sent as a string by LeetCode but accepted as a number too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(i64),
    Text(String),
}

impl Timestamp {
    pub fn seconds(&self) -> Result<i64> {
        match self {
            Timestamp::Seconds(s) => Ok(*s),
            Timestamp::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| AdapterError::parse(format!("invalid LeetCode timestamp: {s:?}"))),
        }
    }
}
