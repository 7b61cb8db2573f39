//! LeetCode adapter.
//!
//! Reads the public GraphQL profile of a user and keeps the accepted entries
//! of the recent-submission window.
//!
//! # Module Structure
//!
//! - [`types`] - GraphQL response types
//! - [`client`] - The adapter and its transport
//! - [`convert`] - Submission to solved-problem conversion

mod client;
mod convert;
mod types;

pub use client::{DEFAULT_RECENT_LIMIT, LEETCODE_URL, LeetCodeAdapter};
pub use convert::{problem_url, to_solved_problems, username_from_url};
pub use types::{LeetCodeProfile, RecentSubmission, Timestamp};
