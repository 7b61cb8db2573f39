//! The sync engine: fetch every linked source, merge, persist.

use std::sync::Arc;

use futures::future::join_all;

use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{NO_PROBLEMS_WARNING, SourceOptions, SyncResult};
use crate::clock::{Clock, SystemClock};
use crate::codeforces::CodeforcesAdapter;
use crate::entity::platform::Platform;
use crate::geeksforgeeks::GeeksforGeeksAdapter;
use crate::http::{HttpTransport, ReqwestTransport};
use crate::leetcode::{LeetCodeAdapter, username_from_url};
use crate::platform::{self, AdapterError, FetchOutcome, PlatformAdapter};
use crate::profile::UserProfileLinks;
use crate::store::ProblemStore;

/// Runs one sync cycle for one user.
///
/// Sources run concurrently and fail independently. Their results are merged
/// in [`Platform::ALL`] order, so the output never depends on which source
/// answered first.
#[derive(Clone)]
pub struct SyncEngine {
    leetcode: Arc<dyn PlatformAdapter>,
    geeksforgeeks: Arc<dyn PlatformAdapter>,
    codeforces: Arc<dyn PlatformAdapter>,
    store: Arc<dyn ProblemStore>,
    clock: Arc<dyn Clock>,
}

impl SyncEngine {
    pub fn new(
        leetcode: Arc<dyn PlatformAdapter>,
        geeksforgeeks: Arc<dyn PlatformAdapter>,
        codeforces: Arc<dyn PlatformAdapter>,
        store: Arc<dyn ProblemStore>,
    ) -> Self {
        Self {
            leetcode,
            geeksforgeeks,
            codeforces,
            store,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for `synced_at` stamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the three HTTP adapters from options, sharing one transport.
    pub fn from_options(
        options: &SourceOptions,
        store: Arc<dyn ProblemStore>,
    ) -> platform::Result<Self> {
        Self::from_options_with_clock(options, store, Arc::new(SystemClock))
    }

    pub fn from_options_with_clock(
        options: &SourceOptions,
        store: Arc<dyn ProblemStore>,
        clock: Arc<dyn Clock>,
    ) -> platform::Result<Self> {
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::with_timeout(options.timeout)?);
        Ok(Self::from_options_with_transport(options, store, clock, transport))
    }

    pub fn from_options_with_transport(
        options: &SourceOptions,
        store: Arc<dyn ProblemStore>,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let leetcode = LeetCodeAdapter::new_with_transport(
            &options.leetcode_url,
            options.leetcode_recent_limit,
            Arc::clone(&transport),
        );
        let geeksforgeeks = GeeksforGeeksAdapter::new_with_transport(
            &options.geeksforgeeks_url,
            Arc::clone(&transport),
            Arc::clone(&clock),
        );
        let codeforces = CodeforcesAdapter::new_with_transport(&options.codeforces_url, transport)
            .with_page_size(options.codeforces_page_size)
            .with_page_delay(options.codeforces_page_delay)
            .with_dedup(options.codeforces_dedup);

        Self::new(
            Arc::new(leetcode),
            Arc::new(geeksforgeeks),
            Arc::new(codeforces),
            store,
        )
        .with_clock(clock)
    }

    pub fn store(&self) -> &Arc<dyn ProblemStore> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn adapter(&self, platform: Platform) -> &Arc<dyn PlatformAdapter> {
        match platform {
            Platform::LeetCode => &self.leetcode,
            Platform::GeeksforGeeks => &self.geeksforgeeks,
            Platform::Codeforces => &self.codeforces,
        }
    }

    /// Sync every linked source for `user_id` and persist what was found.
    ///
    /// Never fails: source and write failures are reported in
    /// [`SyncResult::errors`].
    pub async fn sync_user(
        &self,
        user_id: &str,
        links: &UserProfileLinks,
        on_progress: Option<&ProgressCallback>,
    ) -> SyncResult {
        let sources = linked_sources(links);
        emit(
            on_progress,
            SyncProgress::SyncStarted {
                user_id: user_id.to_string(),
                sources: sources.len(),
            },
        );

        let fetches = sources.into_iter().map(|(platform, raw, identity)| async move {
            let outcome = match identity {
                Ok(identity) => {
                    emit(
                        on_progress,
                        SyncProgress::FetchingSource {
                            platform,
                            identity: identity.clone(),
                        },
                    );
                    let outcome = self.adapter(platform).fetch_solved(&identity).await;
                    (identity, outcome)
                }
                Err(e) => (raw, Err(e)),
            };
            (platform, outcome)
        });
        // join_all yields in input order, which is platform order.
        let fetched = join_all(fetches).await;

        let mut result = SyncResult::default();
        let mut problems = Vec::new();

        for (platform, (identity, outcome)) in fetched {
            match outcome {
                Ok(FetchOutcome {
                    problems: found,
                    warning,
                }) => {
                    tracing::info!(
                        platform = %platform,
                        identity = %identity,
                        count = found.len(),
                        "fetched solved problems"
                    );
                    emit(
                        on_progress,
                        SyncProgress::SourceFetched {
                            platform,
                            identity: identity.clone(),
                            count: found.len(),
                            warning: warning.clone(),
                        },
                    );
                    if found.is_empty() {
                        result.warnings.push(warning.unwrap_or_else(|| {
                            format!("{platform}: No solved problems found for {identity}.")
                        }));
                    } else {
                        result.warnings.extend(warning);
                        problems.extend(found);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        platform = %platform,
                        identity = %identity,
                        error = %platform::short_error_message(&e),
                        "source failed"
                    );
                    emit(
                        on_progress,
                        SyncProgress::SourceFailed {
                            platform,
                            error: e.to_string(),
                        },
                    );
                    result.errors.push(format!("{platform}: {e}"));
                }
            }
        }

        if problems.is_empty() {
            if result.errors.is_empty() {
                result.warnings.push(NO_PROBLEMS_WARNING.to_string());
            }
        } else {
            self.persist(user_id, &problems, &mut result, on_progress)
                .await;
        }

        tracing::info!(
            user_id,
            synced = result.synced_count,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "sync complete"
        );
        emit(
            on_progress,
            SyncProgress::SyncComplete {
                user_id: user_id.to_string(),
                synced: result.synced_count,
                errors: result.errors.len(),
                warnings: result.warnings.len(),
            },
        );

        result
    }

    async fn persist(
        &self,
        user_id: &str,
        problems: &[platform::SolvedProblem],
        result: &mut SyncResult,
        on_progress: Option<&ProgressCallback>,
    ) {
        emit(
            on_progress,
            SyncProgress::SavingProblems {
                count: problems.len(),
            },
        );

        let synced_at = self.clock.now();
        let models = problems
            .iter()
            .map(|p| p.to_active_model(user_id, synced_at))
            .collect();

        for outcome in self.store.upsert_batch(models).await {
            match outcome.failure_message() {
                Some(message) => {
                    emit(
                        on_progress,
                        SyncProgress::SaveFailed {
                            platform: outcome.platform,
                            problem_name: outcome.problem_name.clone(),
                            error: message.clone(),
                        },
                    );
                    result.errors.push(message);
                }
                None => result.synced_count += 1,
            }
        }
    }
}

type LinkedSource = (Platform, String, Result<String, AdapterError>);

/// Linked sources in platform order, with the identity each adapter is
/// called with. An unusable LeetCode URL carries its error instead.
fn linked_sources(links: &UserProfileLinks) -> Vec<LinkedSource> {
    let mut sources = Vec::new();
    if let Some(url) = links.leetcode_url() {
        sources.push((Platform::LeetCode, url.to_string(), username_from_url(url)));
    }
    if let Some(username) = links.geeksforgeeks_username() {
        sources.push((
            Platform::GeeksforGeeks,
            username.to_string(),
            Ok(username.to_string()),
        ));
    }
    if let Some(handle) = links.codeforces_handle() {
        sources.push((Platform::Codeforces, handle.to_string(), Ok(handle.to_string())));
    }
    sources
}

#[cfg(all(test, feature = "sqlite", feature = "migrate"))]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration as StdDuration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;
    use crate::connect_and_migrate;
    use crate::entity::user_problem::{ActiveModel, Model};
    use crate::http::{HttpMethod, MockTransport};
    use crate::store::{self, DbStore, UpsertOutcome};
    use crate::test_support::{FakeAdapter, fixed_now, solved};

    struct Harness {
        engine: SyncEngine,
        store: DbStore,
        leetcode: Arc<FakeAdapter>,
        geeksforgeeks: Arc<FakeAdapter>,
        codeforces: Arc<FakeAdapter>,
    }

    async fn harness(leetcode: FakeAdapter, gfg: FakeAdapter, codeforces: FakeAdapter) -> Harness {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let store = DbStore::new(Arc::new(db));
        let leetcode = Arc::new(leetcode);
        let geeksforgeeks = Arc::new(gfg);
        let codeforces = Arc::new(codeforces);
        let engine = SyncEngine::new(
            leetcode.clone(),
            geeksforgeeks.clone(),
            codeforces.clone(),
            Arc::new(store.clone()),
        )
        .with_clock(Arc::new(FixedClock(fixed_now())));

        Harness {
            engine,
            store,
            leetcode,
            geeksforgeeks,
            codeforces,
        }
    }

    fn all_links() -> UserProfileLinks {
        UserProfileLinks {
            leetcode_url: Some("https://leetcode.com/u/alice/".to_string()),
            geeksforgeeks_username: Some("alice_gfg".to_string()),
            codeforces_handle: Some("alice_cf".to_string()),
        }
    }

    async fn rows(h: &Harness) -> Vec<Model> {
        store::find_by_user(h.store.connection(), "user-1")
            .await
            .expect("query should succeed")
    }

    #[tokio::test]
    async fn no_links_touches_nothing() {
        let h = harness(
            FakeAdapter::returning(Platform::LeetCode, vec![]),
            FakeAdapter::returning(Platform::GeeksforGeeks, vec![]),
            FakeAdapter::returning(Platform::Codeforces, vec![]),
        )
        .await;

        let result = h
            .engine
            .sync_user("user-1", &UserProfileLinks::default(), None)
            .await;

        assert_eq!(
            result,
            SyncResult {
                synced_count: 0,
                errors: vec![],
                warnings: vec!["no problems found to sync".to_string()],
            }
        );
        assert!(rows(&h).await.is_empty());
        assert_eq!(h.leetcode.calls() + h.geeksforgeeks.calls() + h.codeforces.calls(), 0);
    }

    #[tokio::test]
    async fn failing_source_does_not_affect_others() {
        let h = harness(
            FakeAdapter::returning(
                Platform::LeetCode,
                vec![
                    solved(Platform::LeetCode, "Two Sum", "Unknown", 1),
                    solved(Platform::LeetCode, "LRU Cache", "Unknown", 2),
                ],
            ),
            FakeAdapter::returning(
                Platform::GeeksforGeeks,
                vec![solved(Platform::GeeksforGeeks, "Kadane", "Medium", 3)],
            ),
            FakeAdapter::failing(Platform::Codeforces, "handle: User with handle alice_cf not found"),
        )
        .await;

        let result = h.engine.sync_user("user-1", &all_links(), None).await;

        assert_eq!(result.synced_count, 3);
        assert_eq!(
            result.errors,
            vec![
                "Codeforces: Source reported failure: handle: User with handle alice_cf not found"
                    .to_string()
            ]
        );
        assert!(result.warnings.is_empty());

        let rows = rows(&h).await;
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.platform != Platform::Codeforces));
        assert!(rows.iter().all(|r| r.synced_at == fixed_now().fixed_offset()));
    }

    #[tokio::test]
    async fn leetcode_username_comes_from_profile_url() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let h = harness(
            FakeAdapter::new(Platform::LeetCode, move |identity| {
                seen_clone.lock().unwrap().push(identity.to_string());
                Ok(FetchOutcome::default())
            }),
            FakeAdapter::returning(Platform::GeeksforGeeks, vec![]),
            FakeAdapter::returning(Platform::Codeforces, vec![]),
        )
        .await;
        let links = UserProfileLinks {
            leetcode_url: Some("https://leetcode.com/u/alice/".to_string()),
            ..Default::default()
        };

        h.engine.sync_user("user-1", &links, None).await;

        assert_eq!(*seen.lock().unwrap(), vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn resync_is_idempotent() {
        let h = harness(
            FakeAdapter::returning(
                Platform::LeetCode,
                vec![solved(Platform::LeetCode, "Two Sum", "Unknown", 1)],
            ),
            FakeAdapter::returning(
                Platform::GeeksforGeeks,
                vec![solved(Platform::GeeksforGeeks, "Kadane", "Medium", 3)],
            ),
            FakeAdapter::returning(
                Platform::Codeforces,
                vec![solved(Platform::Codeforces, "Watermelon", "800", 4)],
            ),
        )
        .await;

        let first = h.engine.sync_user("user-1", &all_links(), None).await;
        let before = rows(&h).await;
        let second = h.engine.sync_user("user-1", &all_links(), None).await;
        let after = rows(&h).await;

        assert_eq!(first.synced_count, 3);
        assert_eq!(second.synced_count, 3);
        assert_eq!(before.len(), 3);
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn resync_updates_changed_fields() {
        let difficulty = Arc::new(Mutex::new("Unknown".to_string()));
        let difficulty_clone = Arc::clone(&difficulty);
        let h = harness(
            FakeAdapter::new(Platform::LeetCode, move |_| {
                let d = difficulty_clone.lock().unwrap().clone();
                Ok(FetchOutcome::new(vec![solved(
                    Platform::LeetCode,
                    "Two Sum",
                    &d,
                    1,
                )]))
            }),
            FakeAdapter::returning(Platform::GeeksforGeeks, vec![]),
            FakeAdapter::returning(Platform::Codeforces, vec![]),
        )
        .await;

        h.engine.sync_user("user-1", &all_links(), None).await;
        let first = rows(&h).await;
        *difficulty.lock().unwrap() = "Easy".to_string();
        h.engine.sync_user("user-1", &all_links(), None).await;
        let second = rows(&h).await;

        assert_eq!(second.len(), 1);
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].difficulty, "Unknown");
        assert_eq!(second[0].difficulty, "Easy");
    }

    #[tokio::test]
    async fn empty_sources_warn_with_adapter_warning_preferred() {
        let h = harness(
            FakeAdapter::returning(Platform::LeetCode, vec![]),
            FakeAdapter::new(Platform::GeeksforGeeks, |_| {
                Ok(FetchOutcome::default().with_warning("GeeksforGeeks: details missing"))
            }),
            FakeAdapter::returning(
                Platform::Codeforces,
                vec![solved(Platform::Codeforces, "Watermelon", "800", 4)],
            ),
        )
        .await;

        let result = h.engine.sync_user("user-1", &all_links(), None).await;

        assert_eq!(result.synced_count, 1);
        assert!(result.errors.is_empty());
        assert_eq!(
            result.warnings,
            vec![
                "LeetCode: No solved problems found for alice.".to_string(),
                "GeeksforGeeks: details missing".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_leetcode_url_is_an_error_without_calling_adapter() {
        let h = harness(
            FakeAdapter::returning(Platform::LeetCode, vec![]),
            FakeAdapter::returning(Platform::GeeksforGeeks, vec![]),
            FakeAdapter::returning(Platform::Codeforces, vec![]),
        )
        .await;
        let links = UserProfileLinks {
            leetcode_url: Some("///".to_string()),
            ..Default::default()
        };

        let result = h.engine.sync_user("user-1", &links, None).await;

        assert_eq!(h.leetcode.calls(), 0);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("LeetCode: Invalid identity"));
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn merge_order_is_platform_order_not_completion_order() {
        let h = harness(
            FakeAdapter::failing(Platform::LeetCode, "slow").with_delay(StdDuration::from_millis(40)),
            FakeAdapter::failing(Platform::GeeksforGeeks, "medium")
                .with_delay(StdDuration::from_millis(20)),
            FakeAdapter::failing(Platform::Codeforces, "fast"),
        )
        .await;

        let result = h.engine.sync_user("user-1", &all_links(), None).await;

        let prefixes: Vec<&str> = result
            .errors
            .iter()
            .map(|e| e.split(':').next().unwrap())
            .collect();
        assert_eq!(prefixes, vec!["LeetCode", "GeeksforGeeks", "Codeforces"]);
        assert!(result.warnings.is_empty(), "errors suppress the empty warning");
    }

    #[tokio::test]
    async fn progress_events_are_emitted() {
        let h = harness(
            FakeAdapter::returning(
                Platform::LeetCode,
                vec![solved(Platform::LeetCode, "Two Sum", "Unknown", 1)],
            ),
            FakeAdapter::returning(Platform::GeeksforGeeks, vec![]),
            FakeAdapter::failing(Platform::Codeforces, "down"),
        )
        .await;
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let callback: ProgressCallback = Box::new(move |event| {
            events_clone.lock().unwrap().push(event);
        });

        h.engine
            .sync_user("user-1", &all_links(), Some(&callback))
            .await;

        let events = events.lock().unwrap();
        assert!(matches!(
            events.first(),
            Some(SyncProgress::SyncStarted { sources: 3, .. })
        ));
        assert!(events.iter().any(|e| matches!(
            e,
            SyncProgress::SourceFailed {
                platform: Platform::Codeforces,
                ..
            }
        )));
        assert!(matches!(
            events.last(),
            Some(SyncProgress::SyncComplete {
                synced: 1,
                errors: 1,
                warnings: 1,
                ..
            })
        ));
    }

    struct RejectingStore;

    #[async_trait]
    impl ProblemStore for RejectingStore {
        async fn upsert_batch(&self, models: Vec<ActiveModel>) -> Vec<UpsertOutcome> {
            models
                .into_iter()
                .map(|m| UpsertOutcome {
                    problem_name: m.problem_name.unwrap(),
                    platform: Some(m.platform.unwrap()),
                    problem_url: m.problem_url.unwrap(),
                    result: Err("disk full".to_string()),
                })
                .collect()
        }

        async fn find_by_user(&self, _user_id: &str) -> store::Result<Vec<Model>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn failed_writes_are_reported_per_record() {
        let engine = SyncEngine::new(
            Arc::new(FakeAdapter::returning(
                Platform::LeetCode,
                vec![
                    solved(Platform::LeetCode, "Two Sum", "Unknown", 1),
                    solved(Platform::LeetCode, "LRU Cache", "Unknown", 2),
                ],
            )),
            Arc::new(FakeAdapter::returning(Platform::GeeksforGeeks, vec![])),
            Arc::new(FakeAdapter::returning(Platform::Codeforces, vec![])),
            Arc::new(RejectingStore),
        );
        let links = UserProfileLinks {
            leetcode_url: Some("https://leetcode.com/alice".to_string()),
            ..Default::default()
        };

        let result = engine.sync_user("user-1", &links, None).await;

        assert_eq!(result.synced_count, 0);
        assert_eq!(
            result.errors,
            vec![
                "Failed to save problem Two Sum (LeetCode): disk full".to_string(),
                "Failed to save problem LRU Cache (LeetCode): disk full".to_string(),
            ]
        );
        assert!(result.warnings.is_empty());
    }

    /// Real adapters over the mock transport, end to end into SQLite.
    #[tokio::test]
    async fn end_to_end_over_mock_transport() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let store = DbStore::new(Arc::new(db));
        let transport = MockTransport::new();
        let options = SourceOptions {
            leetcode_url: "https://lc.test".to_string(),
            geeksforgeeks_url: "https://gfg.test".to_string(),
            codeforces_url: "https://cf.test/api".to_string(),
            codeforces_page_delay: StdDuration::ZERO,
            ..SourceOptions::default()
        };

        transport.push_json(
            HttpMethod::Post,
            "https://lc.test/graphql",
            json!({ "data": {
                "matchedUser": { "username": "alice", "submitStats": { "acSubmissionNum": [] } },
                "recentSubmissionList": [
                    { "title": "Two Sum", "titleSlug": "two-sum", "timestamp": "1717200000", "statusDisplay": "Accepted" }
                ]
            }}),
        );
        transport.push_json(
            HttpMethod::Get,
            "https://gfg.test/alice_gfg",
            json!({
                "info": { "totalProblemsSolved": 1 },
                "solvedStats": { "medium": { "questions": [
                    { "question": "Kadane", "questionUrl": "https://www.geeksforgeeks.org/problems/kadane/1", "dateSolved": "2024-05-30" }
                ]}}
            }),
        );
        transport.push_status_json(
            HttpMethod::Get,
            "https://cf.test/api/user.status?handle=alice_cf&from=1&count=200",
            400,
            json!({ "status": "FAILED", "comment": "handle: User with handle alice_cf not found" }),
        );

        let engine = SyncEngine::from_options_with_transport(
            &options,
            Arc::new(store.clone()),
            Arc::new(FixedClock(fixed_now())),
            Arc::new(transport.clone()),
        );
        let result = engine.sync_user("user-1", &all_links(), None).await;

        assert_eq!(result.synced_count, 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Codeforces: "));

        let rows = store::find_by_user(store.connection(), "user-1").await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.problem_name.as_str()).collect();
        assert_eq!(names, vec!["Two Sum", "Kadane"]);
        let gfg = &rows[1];
        assert_eq!(gfg.platform, Platform::GeeksforGeeks);
        assert_eq!(gfg.difficulty, "Medium");
    }
}
