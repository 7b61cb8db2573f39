//! Sync types, options and constants.

use std::time::Duration as StdDuration;

use serde::{Deserialize, Serialize};

use crate::codeforces::{
    CODEFORCES_API_URL, CodeforcesDedup, DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE,
};
use crate::geeksforgeeks::GEEKSFORGEEKS_API_URL;
use crate::leetcode::{DEFAULT_RECENT_LIMIT, LEETCODE_URL};

/// Default per-request timeout for every source.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Warning recorded when a sync had nothing to persist and nothing failed.
pub const NO_PROBLEMS_WARNING: &str = "no problems found to sync";

/// Outcome of one sync for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    /// Records written successfully.
    pub synced_count: usize,
    /// One entry per failed source or failed write.
    pub errors: Vec<String>,
    /// One entry per source that answered but had nothing usable.
    pub warnings: Vec<String>,
}

impl SyncResult {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Where and how the adapters reach their sources.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub leetcode_url: String,
    pub geeksforgeeks_url: String,
    pub codeforces_url: String,
    /// Per-request timeout.
    pub timeout: StdDuration,
    /// Size of the LeetCode recent-submission window.
    pub leetcode_recent_limit: u32,
    pub codeforces_page_size: u32,
    /// Pause between Codeforces page requests.
    pub codeforces_page_delay: StdDuration,
    pub codeforces_dedup: CodeforcesDedup,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            leetcode_url: LEETCODE_URL.to_string(),
            geeksforgeeks_url: GEEKSFORGEEKS_API_URL.to_string(),
            codeforces_url: CODEFORCES_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            leetcode_recent_limit: DEFAULT_RECENT_LIMIT,
            codeforces_page_size: DEFAULT_PAGE_SIZE,
            codeforces_page_delay: DEFAULT_PAGE_DELAY,
            codeforces_dedup: CodeforcesDedup::default(),
        }
    }
}
