//! Codeforces API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use url::Url;

use super::convert::to_solved_problems;
use super::types::{CodeforcesDedup, CodeforcesEnvelope, CodeforcesSubmission};
use crate::entity::platform::Platform;
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::platform::{AdapterError, FetchOutcome, PlatformAdapter, Result};

/// Default Codeforces API base.
pub const CODEFORCES_API_URL: &str = "https://codeforces.com/api";

/// Default number of submissions requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Default pause between page requests.
pub const DEFAULT_PAGE_DELAY: StdDuration = StdDuration::from_millis(2500);

/// Adapter over the Codeforces `user.status` endpoint.
#[derive(Clone)]
pub struct CodeforcesAdapter {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    page_size: u32,
    page_delay: StdDuration,
    dedup: CodeforcesDedup,
}

impl CodeforcesAdapter {
    pub fn new(base_url: &str, timeout: StdDuration) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(timeout)?;
        Ok(Self::new_with_transport(base_url, Arc::new(transport)))
    }

    pub fn new_with_transport(base_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            dedup: CodeforcesDedup::default(),
        }
    }

    /// Set the page size. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_page_delay(mut self, page_delay: StdDuration) -> Self {
        self.page_delay = page_delay;
        self
    }

    #[must_use]
    pub fn with_dedup(mut self, dedup: CodeforcesDedup) -> Self {
        self.dedup = dedup;
        self
    }

    fn status_url(&self, handle: &str, from: u32) -> Result<Url> {
        let invalid =
            || AdapterError::config(format!("Invalid Codeforces API URL {:?}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push("user.status");
        url.query_pairs_mut()
            .append_pair("handle", handle)
            .append_pair("from", &from.to_string())
            .append_pair("count", &self.page_size.to_string());
        Ok(url)
    }

    /// Fetch one page of submissions starting at the 1-based `from` offset.
    async fn fetch_page(&self, handle: &str, from: u32) -> Result<Vec<CodeforcesSubmission>> {
        tracing::debug!(handle, from, "fetching Codeforces submissions page");
        let response = self
            .transport
            .send(HttpRequest::get(self.status_url(handle, from)?))
            .await?;
        parse_page(&response)
    }

    /// Fetch every page of a handle's submissions.
    ///
    /// Stops on a page shorter than the page size. Sleeps between pages but
    /// never after the last one.
    pub async fn fetch_submissions(&self, handle: &str) -> Result<Vec<CodeforcesSubmission>> {
        let mut submissions = Vec::new();
        let mut from = 1;

        loop {
            let page = self.fetch_page(handle, from).await?;
            let len = page.len();
            submissions.extend(page);

            if len < self.page_size as usize {
                break;
            }

            from += self.page_size;
            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(submissions)
    }
}

/// Decode a `user.status` response.
///
/// A `FAILED` envelope is a source failure whatever the HTTP status: the API
/// answers unknown handles with a 400 carrying one.
fn parse_page(response: &HttpResponse) -> Result<Vec<CodeforcesSubmission>> {
    let envelope = match serde_json::from_slice::<CodeforcesEnvelope<Vec<CodeforcesSubmission>>>(
        &response.body,
    ) {
        Ok(envelope) => envelope,
        Err(_) if !response.is_success() => {
            return Err(AdapterError::status(response.status, &response.body_text()));
        }
        Err(e) => return Err(e.into()),
    };

    match envelope {
        CodeforcesEnvelope::Failed { comment } => Err(AdapterError::source_failure(
            comment.unwrap_or_else(|| "Codeforces request failed".to_string()),
        )),
        CodeforcesEnvelope::Ok { .. } if !response.is_success() => {
            Err(AdapterError::status(response.status, &response.body_text()))
        }
        CodeforcesEnvelope::Ok { result } => Ok(result),
    }
}

#[async_trait]
impl PlatformAdapter for CodeforcesAdapter {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    async fn fetch_solved(&self, handle: &str) -> Result<FetchOutcome> {
        let submissions = self.fetch_submissions(handle).await?;
        let problems = to_solved_problems(&submissions, self.dedup)?;
        tracing::debug!(
            handle,
            submissions = submissions.len(),
            solved = problems.len(),
            "fetched Codeforces submissions"
        );

        let outcome = FetchOutcome::new(problems);
        if outcome.problems.is_empty() && !submissions.is_empty() {
            return Ok(outcome.with_warning(format!(
                "Codeforces: {handle} has {} submissions, but none were accepted.",
                submissions.len()
            )));
        }
        Ok(outcome)
    }
}
