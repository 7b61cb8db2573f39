//! Conversion of Codeforces submissions into solved problems.

use std::collections::HashSet;

use super::types::{CodeforcesDedup, CodeforcesProblem, CodeforcesSubmission};
use crate::entity::platform::Platform;
use crate::platform::{Result, SolvedProblem, UNKNOWN_DIFFICULTY, epoch_seconds_to_date};

const PROBLEM_URL_BASE: &str = "https://codeforces.com/problemset/problem";

const VERDICT_OK: &str = "OK";

/// Rating if present, else the comma-joined tags, else `"Unknown"`.
pub fn difficulty(problem: &CodeforcesProblem) -> String {
    match problem.rating {
        Some(rating) => rating.to_string(),
        None if !problem.tags.is_empty() => problem.tags.join(", "),
        None => UNKNOWN_DIFFICULTY.to_string(),
    }
}

fn dedup_key(problem: &CodeforcesProblem, contest_id: i64, dedup: CodeforcesDedup) -> String {
    match dedup {
        CodeforcesDedup::ProblemName => problem.name.clone(),
        CodeforcesDedup::ProblemId => format!("{contest_id}/{}", problem.index),
    }
}

/// Keep `OK` submissions, first seen wins per dedup key.
pub fn to_solved_problems(
    submissions: &[CodeforcesSubmission],
    dedup: CodeforcesDedup,
) -> Result<Vec<SolvedProblem>> {
    let mut seen = HashSet::new();
    let mut problems = Vec::new();

    for sub in submissions {
        if sub.verdict.as_deref() != Some(VERDICT_OK) {
            continue;
        }
        let problem = &sub.problem;
        let Some(contest_id) = problem.contest_id else {
            tracing::debug!(problem = %problem.name, "skipping Codeforces problem without contest id");
            continue;
        };
        if !seen.insert(dedup_key(problem, contest_id, dedup)) {
            continue;
        }

        problems.push(SolvedProblem {
            platform: Platform::Codeforces,
            problem_name: problem.name.clone(),
            problem_url: format!("{PROBLEM_URL_BASE}/{contest_id}/{}", problem.index),
            difficulty: difficulty(problem),
            date_solved: epoch_seconds_to_date(sub.creation_time_seconds)?,
        });
    }

    Ok(problems)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sub(contest: Option<i64>, index: &str, name: &str, verdict: Option<&str>) -> CodeforcesSubmission {
        CodeforcesSubmission {
            id: None,
            creation_time_seconds: 1_704_067_200,
            verdict: verdict.map(str::to_string),
            problem: CodeforcesProblem {
                contest_id: contest,
                index: index.to_string(),
                name: name.to_string(),
                rating: Some(800),
                tags: vec![],
            },
        }
    }

    #[test]
    fn difficulty_prefers_rating_then_tags() {
        let mut problem = sub(Some(1), "A", "Watermelon", None).problem;
        assert_eq!(difficulty(&problem), "800");

        problem.rating = None;
        problem.tags = vec!["math".to_string(), "brute force".to_string()];
        assert_eq!(difficulty(&problem), "math, brute force");

        problem.tags.clear();
        assert_eq!(difficulty(&problem), "Unknown");
    }

    #[test]
    fn keeps_ok_verdicts_and_builds_urls() {
        let subs = vec![
            sub(Some(4), "A", "Watermelon", Some("OK")),
            sub(Some(71), "A", "Way Too Long Words", Some("WRONG_ANSWER")),
            sub(Some(1), "B", "Judging", None),
        ];
        let problems = to_solved_problems(&subs, CodeforcesDedup::ProblemName).unwrap();

        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].problem_url,
            "https://codeforces.com/problemset/problem/4/A"
        );
        assert_eq!(problems[0].difficulty, "800");
        assert_eq!(
            problems[0].date_solved,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn same_name_in_different_contests_keeps_first_by_name() {
        let subs = vec![
            sub(Some(1300), "A", "Shared Name", Some("OK")),
            sub(Some(1301), "A", "Shared Name", Some("OK")),
        ];

        let by_name = to_solved_problems(&subs, CodeforcesDedup::ProblemName).unwrap();
        assert_eq!(by_name.len(), 1);
        assert!(by_name[0].problem_url.ends_with("/1300/A"));

        let by_id = to_solved_problems(&subs, CodeforcesDedup::ProblemId).unwrap();
        assert_eq!(by_id.len(), 2);
    }

    #[test]
    fn problems_without_contest_are_skipped() {
        let subs = vec![sub(None, "A", "Gym Problem", Some("OK"))];
        assert!(
            to_solved_problems(&subs, CodeforcesDedup::ProblemName)
                .unwrap()
                .is_empty()
        );
    }
}
