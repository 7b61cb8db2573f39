//! Conversion of LeetCode submissions into solved problems.

use std::collections::HashSet;

use url::Url;

use super::types::RecentSubmission;
use crate::entity::platform::Platform;
use crate::platform::{
    AdapterError, Result, SolvedProblem, UNKNOWN_DIFFICULTY, epoch_seconds_to_date,
};

const LEETCODE_SITE: &str = "https://leetcode.com/";

/// Canonical problem links always point at the public site.
const PROBLEM_URL_BASE: &str = "https://leetcode.com/problems";

const ACCEPTED: &str = "Accepted";

/// Canonical link for a problem slug.
pub fn problem_url(title_slug: &str) -> String {
    format!("{PROBLEM_URL_BASE}/{title_slug}/")
}

/// Extract the username from a profile URL: its last non-empty path segment.
///
/// `https://leetcode.com/u/alice/` and `https://leetcode.com/alice` both yield
/// `alice`; query strings and fragments are ignored. Input without a scheme
/// (`alice`, `leetcode.com/u/alice`) is read as a path on the public site.
pub fn username_from_url(profile_url: &str) -> Result<String> {
    let invalid = || {
        AdapterError::config(format!(
            "Invalid LeetCode URL {profile_url:?}. Could not extract username."
        ))
    };

    let trimmed = profile_url.trim();
    let url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(LEETCODE_SITE)
            .and_then(|base| base.join(trimmed))
            .map_err(|_| invalid())?,
        Err(_) => return Err(invalid()),
    };

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .map(str::to_string)
        .ok_or_else(invalid)
}

/// Keep accepted submissions, newest first, one per slug.
///
/// The recent list is ordered newest first, so the first occurrence of a slug
/// is its most recent solve.
pub fn to_solved_problems(submissions: &[RecentSubmission]) -> Result<Vec<SolvedProblem>> {
    let mut seen = HashSet::new();
    let mut problems = Vec::new();

    for sub in submissions {
        if sub.status_display != ACCEPTED || !seen.insert(sub.title_slug.as_str()) {
            continue;
        }

        let difficulty = sub
            .difficulty
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_DIFFICULTY)
            .to_string();

        problems.push(SolvedProblem {
            platform: Platform::LeetCode,
            problem_name: sub.title.clone(),
            problem_url: problem_url(&sub.title_slug),
            difficulty,
            date_solved: epoch_seconds_to_date(sub.timestamp.seconds()?)?,
        });
    }

    Ok(problems)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::leetcode::types::Timestamp;

    fn submission(slug: &str, status: &str, ts: Timestamp) -> RecentSubmission {
        RecentSubmission {
            title: slug.replace('-', " "),
            title_slug: slug.to_string(),
            timestamp: ts,
            status_display: status.to_string(),
            difficulty: None,
        }
    }

    #[test]
    fn username_from_url_variants() {
        assert_eq!(
            username_from_url("https://leetcode.com/u/alice/").unwrap(),
            "alice"
        );
        assert_eq!(username_from_url("https://leetcode.com/bob").unwrap(), "bob");
        assert_eq!(username_from_url("carol").unwrap(), "carol");
        assert_eq!(username_from_url("leetcode.com/u/dave/").unwrap(), "dave");
    }

    #[test]
    fn username_from_url_ignores_query_and_fragment() {
        assert_eq!(
            username_from_url("https://leetcode.com/u/alice/?tab=submissions").unwrap(),
            "alice"
        );
        assert_eq!(
            username_from_url("https://leetcode.com/alice#profile").unwrap(),
            "alice"
        );
        assert_eq!(username_from_url(" bob?ref=home ").unwrap(), "bob");
    }

    #[test]
    fn username_from_url_rejects_urls_without_a_path() {
        for input in [
            "https://leetcode.com/",
            "https://leetcode.com/?tab=x",
            "mailto:alice@example.com",
        ] {
            let err = username_from_url(input).unwrap_err();
            assert!(matches!(err, AdapterError::Config { .. }), "{input}");
        }
    }

    #[test]
    fn username_from_url_without_segments_is_config_error() {
        let err = username_from_url("///").unwrap_err();
        assert!(matches!(err, AdapterError::Config { .. }));
    }

    #[test]
    fn keeps_only_accepted_and_defaults_difficulty() {
        let subs = vec![
            submission("two-sum", "Accepted", Timestamp::Text("1704067200".into())),
            submission("add-two-numbers", "Wrong Answer", Timestamp::Seconds(1_704_067_200)),
        ];
        let problems = to_solved_problems(&subs).unwrap();

        assert_eq!(problems.len(), 1);
        let p = &problems[0];
        assert_eq!(p.problem_url, "https://leetcode.com/problems/two-sum/");
        assert_eq!(p.difficulty, "Unknown");
        assert_eq!(p.date_solved, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(p.platform, Platform::LeetCode);
    }

    #[test]
    fn duplicate_slugs_keep_most_recent() {
        let subs = vec![
            submission("two-sum", "Accepted", Timestamp::Seconds(1_706_745_600)),
            submission("two-sum", "Accepted", Timestamp::Seconds(1_704_067_200)),
        ];
        let problems = to_solved_problems(&subs).unwrap();

        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].date_solved,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn reported_difficulty_is_kept() {
        let mut sub = submission("two-sum", "Accepted", Timestamp::Seconds(0));
        sub.difficulty = Some("Easy".to_string());
        let problems = to_solved_problems(&[sub]).unwrap();
        assert_eq!(problems[0].difficulty, "Easy");
    }

    #[test]
    fn malformed_timestamp_fails_closed() {
        let subs = vec![submission(
            "two-sum",
            "Accepted",
            Timestamp::Text("yesterday".into()),
        )];
        let err = to_solved_problems(&subs).unwrap_err();
        assert!(matches!(err, AdapterError::Parse { .. }));
    }
}
