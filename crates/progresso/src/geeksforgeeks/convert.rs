//! Conversion of GeeksforGeeks profiles into solved problems.

use chrono::NaiveDate;

use super::types::GfgProfile;
use crate::entity::platform::Platform;
use crate::platform::{AdapterError, Result, SolvedProblem, title_case};

/// Parse a `dateSolved` value, falling back to `today` when it is absent.
///
/// Accepts a plain date or anything starting with one (an ISO timestamp).
pub fn parse_date_solved(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(today),
    };
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| AdapterError::parse(format!("invalid GeeksforGeeks dateSolved: {raw:?}")))
}

/// Flatten every difficulty group into solved problems.
pub fn to_solved_problems(profile: &GfgProfile, today: NaiveDate) -> Result<Vec<SolvedProblem>> {
    let mut problems = Vec::new();

    for (key, group) in &profile.solved_stats {
        let difficulty = title_case(key);
        for q in &group.questions {
            problems.push(SolvedProblem {
                platform: Platform::GeeksforGeeks,
                problem_name: q.question.clone(),
                problem_url: q.question_url.clone(),
                difficulty: difficulty.clone(),
                date_solved: parse_date_solved(q.date_solved.as_deref(), today)?,
            });
        }
    }

    Ok(problems)
}
