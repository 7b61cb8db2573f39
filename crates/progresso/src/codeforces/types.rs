//! Codeforces API data types.

use serde::{Deserialize, Serialize};

/// Every Codeforces API response is wrapped in a status envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status")]
pub enum CodeforcesEnvelope<T> {
    #[serde(rename = "OK")]
    Ok { result: T },
    #[serde(rename = "FAILED")]
    Failed {
        #[serde(default)]
        comment: Option<String>,
    },
}

/// One entry of `user.status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesSubmission {
    #[serde(default)]
    pub id: Option<i64>,
    pub creation_time_seconds: i64,
    /// Absent while a submission is still being judged.
    #[serde(default)]
    pub verdict: Option<String>,
    pub problem: CodeforcesProblem,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesProblem {
    /// Absent for some gym and acmsguru problems.
    #[serde(default)]
    pub contest_id: Option<i64>,
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// How accepted submissions are collapsed into problems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeforcesDedup {
    /// Same problem name counts as the same problem, even across contests.
    #[default]
    ProblemName,
    /// `contestId` + `index` identifies the problem.
    ProblemId,
}
