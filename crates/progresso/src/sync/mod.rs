//! Sync orchestration across every linked platform.
//!
//! # Module Structure
//!
//! - [`types`] - `SyncResult`, `SourceOptions`, constants
//! - [`progress`] - Progress reporting: `SyncProgress`, `ProgressCallback`, `emit()`
//! - [`engine`] - `SyncEngine::sync_user()`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use progresso::store::DbStore;
//! use progresso::sync::{SourceOptions, SyncEngine};
//!
//! let engine = SyncEngine::from_options(&SourceOptions::default(), Arc::new(DbStore::new(db)))?;
//! let result = engine.sync_user("user-1", &links, None).await;
//! for error in &result.errors {
//!     eprintln!("{error}");
//! }
//! ```

pub mod engine;
mod progress;
mod types;

pub use types::{DEFAULT_TIMEOUT, NO_PROBLEMS_WARNING, SourceOptions, SyncResult};

pub use progress::{ProgressCallback, SyncProgress, emit};

pub use engine::SyncEngine;

pub use crate::codeforces::CodeforcesDedup;
