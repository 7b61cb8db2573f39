//! Platform-agnostic adapter contract and the canonical solved-problem shape.
//!
//! Every practice site is wrapped in a [`PlatformAdapter`] that turns the
//! site's own response shape into [`SolvedProblem`]s.
//!
//! # Example
//!
//! ```ignore
//! use progresso::platform::PlatformAdapter;
//!
//! async fn count<A: PlatformAdapter>(adapter: &A, who: &str) -> usize {
//!     match adapter.fetch_solved(who).await {
//!         Ok(outcome) => outcome.problems.len(),
//!         Err(_) => 0,
//!     }
//! }
//! ```

mod convert;
mod errors;
mod types;

pub use convert::{epoch_seconds_to_date, title_case};
pub use errors::{AdapterError, Result, short_error_message};
pub use types::{FetchOutcome, PlatformAdapter, SolvedProblem, UNKNOWN_DIFFICULTY};
