//! API client for the PMG committee-meeting-attendance endpoint.
//!
//! The endpoint is paginated: each page carries a `results` list and a
//! `next` link, which is null on the last page.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{AnnualAttendance, AttendancePage};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// First page of the meetings-by-member listing. Also the cache key for the
/// assembled result set.
pub const ATTENDANCE_URL: &str =
    "https://api.pmg.org.za/committee-meeting-attendance/meetings-by-member/";

/// Spreadsheet of the raw attendance data, linked from the dashboard.
pub const DOWNLOAD_URL: &str = "http://api.pmg.org.za/committee-meeting-attendance/data.xlsx";

/// HTTP request timeout in seconds, applied to each page request.
pub const API_REQUESTS_TIMEOUT_SECS: u64 = 15;

/// Anything that can hand back one page of attendance data.
pub trait AttendanceSource {
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<AttendancePage>> + Send;
}

/// API client for the PMG API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }
}

impl AttendanceSource for ApiClient {
    async fn fetch_page(&self, url: &str) -> Result<AttendancePage> {
        self.get(url).await
    }
}

/// Follow `next` links from `start_url` until they run out, concatenating
/// every page's results in the order they were served. Pages are fetched
/// one after another.
pub async fn fetch_all_pages<S: AttendanceSource>(
    source: &S,
    start_url: &str,
) -> Result<Vec<AnnualAttendance>> {
    let mut results = Vec::new();
    let mut next_url = Some(start_url.to_string());
    let mut pages = 0usize;

    while let Some(url) = next_url.take() {
        let page = source.fetch_page(&url).await?;
        pages += 1;
        debug!(url = %url, results = page.results.len(), "Fetched attendance page");

        results.extend(page.results);
        next_url = page.next.filter(|next| !next.is_empty());
    }

    debug!(pages, years = results.len(), "Finished fetching attendance data");
    Ok(results)
}
