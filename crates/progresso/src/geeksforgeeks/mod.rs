//! GeeksforGeeks adapter.
//!
//! Reads a profile from a GeeksforGeeks profile API and flattens its
//! per-difficulty question lists.

mod client;
mod convert;
mod types;

pub use client::{GEEKSFORGEEKS_API_URL, GeeksforGeeksAdapter};
pub use convert::{parse_date_solved, to_solved_problems};
pub use types::{GfgProfile, GfgQuestion, GfgResponse, GfgSolvedGroup};
