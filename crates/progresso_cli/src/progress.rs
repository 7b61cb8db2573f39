//! Progress reporting for sync runs, rendered as structured logs.

use progresso::sync::{ProgressCallback, SyncProgress};

/// Logging reporter using tracing for structured output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    /// Wrap the reporter in a callback the sync engine can call.
    pub fn callback(self) -> ProgressCallback {
        Box::new(move |event| self.handle(event))
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::SyncStarted { user_id, sources } => {
                tracing::info!(user_id = %user_id, sources, "Starting sync");
            }

            SyncProgress::FetchingSource { platform, identity } => {
                tracing::debug!(platform = %platform, identity = %identity, "Fetching solved problems");
            }

            SyncProgress::SourceFetched {
                platform,
                identity,
                count,
                warning,
            } => {
                tracing::info!(platform = %platform, identity = %identity, count, "Fetched solved problems");
                if let Some(warning) = warning {
                    tracing::warn!(platform = %platform, "{}", warning);
                }
            }

            SyncProgress::SourceFailed { platform, error } => {
                tracing::warn!(platform = %platform, error = %error, "Source failed");
            }

            SyncProgress::SavingProblems { count } => {
                tracing::debug!(count, "Saving problems");
            }

            SyncProgress::SaveFailed {
                platform,
                problem_name,
                error,
            } => {
                let platform = platform.map_or("unknown", |p| p.as_str());
                tracing::error!(platform, problem = %problem_name, error = %error, "Failed to save");
            }

            SyncProgress::SyncComplete {
                user_id,
                synced,
                errors,
                warnings,
            } => {
                tracing::info!(user_id = %user_id, synced, errors, warnings, "Sync complete");
            }

            _ => {}
        }
    }
}
