//! GeeksforGeeks profile API data types.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A profile lookup answers with either the profile or an error object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GfgResponse {
    Profile(GfgProfile),
    Error { error: serde_json::Value },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GfgProfile {
    pub info: GfgInfo,
    /// Keyed by lowercase difficulty (`school`, `basic`, `easy`, `medium`, `hard`).
    #[serde(default)]
    pub solved_stats: BTreeMap<String, GfgSolvedGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GfgInfo {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub total_problems_solved: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GfgSolvedGroup {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub questions: Vec<GfgQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GfgQuestion {
    pub question: String,
    pub question_url: String,
    #[serde(default)]
    pub date_solved: Option<String>,
}

/// Render the `error` field of an error response as a message.
pub fn error_message(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
