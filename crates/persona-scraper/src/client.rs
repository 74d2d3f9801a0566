//! HTTP client for an account's public activity overview page.

use std::time::Duration;

use chrono::{DateTime, Utc};
use persona_core::{AppConfig, FetchResult};
use rand::Rng;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode, Url};

use crate::error::ScraperError;
use crate::markup::HtmlDocument;
use crate::normalize::{extract_records, ExtractedActivity};
use crate::synthetic::synthetic_activity;

pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches one page of public activity and turns it into a [`FetchResult`].
///
/// Requests carry a browser-like header set. Transport failures and
/// non-200 responses are logged and treated as an empty page; every fetch
/// is followed by a randomized pause.
pub struct ActivityClient {
    client: Client,
    base_url: Url,
    delay_min_ms: u64,
    delay_max_ms: u64,
}

impl ActivityClient {
    /// Creates a client that fetches `<base_url>/user/<identifier>`.
    ///
    /// The post-fetch pause is drawn uniformly from
    /// `delay_min_ms..=delay_max_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        delay_min_ms: u64,
        delay_max_ms: u64,
    ) -> Result<Self, ScraperError> {
        let parsed = Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(browser_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            delay_min_ms: delay_min_ms.min(delay_max_ms),
            delay_max_ms,
        })
    }

    /// Builds a client from the profile and fetch settings in `config`.
    ///
    /// # Errors
    ///
    /// See [`ActivityClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.profile_base_url,
            config.fetch_timeout_secs,
            config.fetch_delay_min_ms,
            config.fetch_delay_max_ms,
        )
    }

    /// The overview page address for `identifier`.
    #[must_use]
    pub fn overview_url(&self, identifier: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["user", identifier]);
        }
        url
    }

    /// Fetches the raw overview markup for `identifier`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any status other than 200.
    /// - [`ScraperError::Http`] on network, timeout or body-read failure.
    pub async fn fetch_overview(&self, identifier: &str) -> Result<String, ScraperError> {
        let url = self.overview_url(identifier);
        tracing::debug!(%url, "requesting activity overview");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches and normalizes public activity for `identifier`.
    ///
    /// Never fails: fetch and parse problems degrade to an empty page, and an
    /// empty page is replaced by synthetic placeholder records.
    pub async fn fetch_activity(&self, identifier: &str) -> FetchResult {
        tracing::info!(identifier, "fetching public activity");

        let page = match self.fetch_overview(identifier).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(identifier, error = %e, "activity fetch failed, continuing with no records");
                None
            }
        };

        self.pause().await;

        let fetched_at = Utc::now();
        let extracted = page
            .map(|body| parse_overview(&body, fetched_at))
            .unwrap_or_default();

        finalize_activity(identifier, extracted, fetched_at)
    }

    async fn pause(&self) {
        let delay = self.pause_duration();
        if !delay.is_zero() {
            tracing::debug!(?delay, "pausing after fetch");
            tokio::time::sleep(delay).await;
        }
    }

    /// Draws the post-fetch pause uniformly from the configured range.
    fn pause_duration(&self) -> Duration {
        let delay_ms = if self.delay_min_ms == self.delay_max_ms {
            self.delay_min_ms
        } else {
            rand::rng().random_range(self.delay_min_ms..=self.delay_max_ms)
        };
        Duration::from_millis(delay_ms)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers
}

/// Parses overview markup, logging and discarding a page-level failure.
fn parse_overview(body: &str, fetched_at: DateTime<Utc>) -> ExtractedActivity {
    let doc = HtmlDocument::parse(body);
    extract_records(&doc, fetched_at).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not split activity page into fragments");
        ExtractedActivity::default()
    })
}

/// Assembles the [`FetchResult`], substituting synthetic records when
/// extraction produced neither posts nor comments.
#[must_use]
pub fn finalize_activity(
    identifier: &str,
    extracted: ExtractedActivity,
    fetched_at: DateTime<Utc>,
) -> FetchResult {
    let (posts, comments) = if extracted.posts.is_empty() && extracted.comments.is_empty() {
        tracing::warn!(identifier, "no activity extracted, substituting sample records");
        synthetic_activity(fetched_at)
    } else {
        (extracted.posts, extracted.comments)
    };

    let mut result = FetchResult::new(identifier, posts, comments);
    result.fetched_at = fetched_at;
    tracing::info!(
        identifier,
        posts = result.total_posts,
        comments = result.total_comments,
        "activity fetch complete"
    );
    result
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
