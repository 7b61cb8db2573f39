//! Codeforces adapter.
//!
//! Pages through `user.status` for a handle and keeps one solved problem per
//! accepted submission, collapsing repeats.
//!
//! ```ignore
//! use progresso::codeforces::{CodeforcesAdapter, CodeforcesDedup};
//!
//! let adapter = CodeforcesAdapter::new("https://codeforces.com/api", timeout)?
//!     .with_dedup(CodeforcesDedup::ProblemId);
//! let outcome = adapter.fetch_solved("tourist").await?;
//! ```

mod client;
mod convert;
mod types;

pub use client::{CODEFORCES_API_URL, CodeforcesAdapter, DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE};
pub use convert::{difficulty, to_solved_problems};
pub use types::{CodeforcesDedup, CodeforcesEnvelope, CodeforcesProblem, CodeforcesSubmission};
