//! GeeksforGeeks profile client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use url::Url;

use super::convert::to_solved_problems;
use super::types::{GfgResponse, error_message};
use crate::clock::Clock;
use crate::entity::platform::Platform;
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::platform::{AdapterError, FetchOutcome, PlatformAdapter, Result};

/// Default profile API host.
pub const GEEKSFORGEEKS_API_URL: &str = "https://geeks-for-geeks-api.vercel.app";

/// Adapter over a GeeksforGeeks profile API.
#[derive(Clone)]
pub struct GeeksforGeeksAdapter {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl GeeksforGeeksAdapter {
    pub fn new(base_url: &str, timeout: StdDuration, clock: Arc<dyn Clock>) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(timeout)?;
        Ok(Self::new_with_transport(base_url, Arc::new(transport), clock))
    }

    pub fn new_with_transport(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            clock,
        }
    }

    fn profile_url(&self, username: &str) -> Result<Url> {
        let invalid = || {
            AdapterError::config(format!(
                "Invalid GeeksforGeeks API URL {:?}",
                self.base_url
            ))
        };
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push(username);
        Ok(url)
    }
}

#[async_trait]
impl PlatformAdapter for GeeksforGeeksAdapter {
    fn platform(&self) -> Platform {
        Platform::GeeksforGeeks
    }

    async fn fetch_solved(&self, username: &str) -> Result<FetchOutcome> {
        let response = self
            .transport
            .send(HttpRequest::get(self.profile_url(username)?))
            .await?;

        if !response.is_success() {
            // The API reports unknown users as an error object on a 4xx.
            if let Ok(GfgResponse::Error { error }) = serde_json::from_slice(&response.body) {
                return Err(AdapterError::source_failure(error_message(&error)));
            }
            return Err(AdapterError::status(response.status, &response.body_text()));
        }

        let profile = match serde_json::from_slice::<GfgResponse>(&response.body)? {
            GfgResponse::Profile(profile) => profile,
            GfgResponse::Error { error } => {
                return Err(AdapterError::source_failure(error_message(&error)));
            }
        };

        let problems = to_solved_problems(&profile, self.clock.today())?;
        let total = profile.info.total_problems_solved;
        tracing::debug!(
            username,
            total,
            count = problems.len(),
            "fetched GeeksforGeeks solved problems"
        );

        let outcome = FetchOutcome::new(problems);
        if outcome.problems.is_empty() && total > 0 {
            tracing::warn!(username, total, "GeeksforGeeks profile has no problem details");
            return Ok(outcome.with_warning(format!(
                "GeeksforGeeks: {username} reports {total} solved problems, but no problem details were returned."
            )));
        }
        Ok(outcome)
    }
}
