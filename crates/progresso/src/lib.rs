//! Progresso - solved-problem history aggregated across coding platforms.
//!
//! This library fetches a user's solved problems from LeetCode, GeeksforGeeks,
//! and Codeforces, normalizes them into one canonical record shape, and
//! idempotently persists them keyed by `(user_id, platform, problem_url)`.
//!
//! # Features
//!
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to automatically run migrations on connection.
//! - `sqlite` / `postgres` - Database backends.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use progresso::{connect_and_migrate, store::DbStore, sync::{SourceOptions, SyncEngine}};
//!
//! let db = Arc::new(connect_and_migrate("sqlite://progresso.db?mode=rwc").await?);
//! let engine = SyncEngine::from_options(&SourceOptions::default(), Arc::new(DbStore::new(db)))?;
//! let result = engine.sync_user("user-1", &links, None).await;
//! println!("synced {} problems", result.synced_count);
//! ```

pub mod clock;
pub mod codeforces;
pub mod db;
pub mod entity;
pub mod geeksforgeeks;
pub mod http;
pub mod leetcode;
pub mod platform;
pub mod profile;
pub mod service;
pub mod store;
pub mod sync;

#[cfg(feature = "migrate")]
pub mod migration;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use platform::{AdapterError, FetchOutcome, PlatformAdapter, SolvedProblem};
pub use profile::{DbProfileDirectory, ProfileDirectory, UserProfileLinks};
pub use service::{ProblemService, ServiceOptions};
pub use store::{DbStore, ProblemStore, StoreError};
pub use sync::{SourceOptions, SyncEngine, SyncResult};
