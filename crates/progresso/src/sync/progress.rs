//! Progress reporting for sync runs.

use crate::entity::platform::Platform;

/// Progress events emitted while syncing one user.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// Starting a sync.
    SyncStarted {
        user_id: String,
        /// Number of linked sources that will be fetched.
        sources: usize,
    },

    /// Starting to fetch one source.
    FetchingSource { platform: Platform, identity: String },

    /// A source answered.
    SourceFetched {
        platform: Platform,
        identity: String,
        /// Number of solved problems found.
        count: usize,
        warning: Option<String>,
    },

    /// A source failed; the others continue.
    SourceFailed { platform: Platform, error: String },

    /// Writing records to the store.
    SavingProblems { count: usize },

    /// One record could not be written.
    SaveFailed {
        platform: Option<Platform>,
        problem_name: String,
        error: String,
    },

    /// Sync finished.
    SyncComplete {
        user_id: String,
        synced: usize,
        errors: usize,
        warnings: usize,
    },
}

/// Callback for progress updates during a sync.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
///
/// ```ignore
/// use progresso::sync::{emit, SyncProgress, ProgressCallback};
///
/// fn saving(on_progress: Option<&ProgressCallback>) {
///     emit(on_progress, SyncProgress::SavingProblems { count: 42 });
/// }
/// ```
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
