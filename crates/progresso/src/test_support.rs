//! Fakes shared by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::clock::Clock;
use crate::entity::platform::Platform;
use crate::platform::{AdapterError, FetchOutcome, PlatformAdapter, Result, SolvedProblem};

type Respond = Box<dyn Fn(&str) -> Result<FetchOutcome> + Send + Sync>;

/// An adapter answering from a closure, counting calls.
pub(crate) struct FakeAdapter {
    platform: Platform,
    respond: Respond,
    delay: StdDuration,
    calls: AtomicUsize,
    /// Advanced after the delay, before answering.
    advance: Option<(std::sync::Arc<ManualClock>, Duration)>,
}

impl FakeAdapter {
    pub(crate) fn new(
        platform: Platform,
        respond: impl Fn(&str) -> Result<FetchOutcome> + Send + Sync + 'static,
    ) -> Self {
        Self {
            platform,
            respond: Box::new(respond),
            delay: StdDuration::ZERO,
            calls: AtomicUsize::new(0),
            advance: None,
        }
    }

    pub(crate) fn returning(platform: Platform, problems: Vec<SolvedProblem>) -> Self {
        Self::new(platform, move |_| Ok(FetchOutcome::new(problems.clone())))
    }

    pub(crate) fn failing(platform: Platform, message: &'static str) -> Self {
        Self::new(platform, move |_| Err(AdapterError::source_failure(message)))
    }

    pub(crate) fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn advancing(mut self, clock: std::sync::Arc<ManualClock>, by: Duration) -> Self {
        self.advance = Some((clock, by));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformAdapter for FakeAdapter {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_solved(&self, identity: &str) -> Result<FetchOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some((clock, by)) = &self.advance {
            clock.advance(*by);
        }
        (self.respond)(identity)
    }
}

/// A clock that only moves when told to.
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock should not be poisoned")
    }
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub(crate) fn solved(platform: Platform, name: &str, difficulty: &str, day: u32) -> SolvedProblem {
    let slug = name.to_lowercase().replace(' ', "-");
    let problem_url = match platform {
        Platform::LeetCode => format!("https://leetcode.com/problems/{slug}/"),
        Platform::GeeksforGeeks => format!("https://www.geeksforgeeks.org/problems/{slug}/1"),
        Platform::Codeforces => format!("https://codeforces.com/problemset/problem/1/{slug}"),
    };
    SolvedProblem {
        platform,
        problem_name: name.to_string(),
        problem_url,
        difficulty: difficulty.to_string(),
        date_solved: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
    }
}
