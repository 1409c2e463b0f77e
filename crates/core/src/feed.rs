//! Scheduling feed client.
//!
//! Issues the single outbound GET for a day's cath lab list and decodes the JSON array of
//! procedure records. The request always covers exactly one calendar day (`dateFrom` = `dateTo`)
//! and sends the upstream's pass-through filters blank.
//!
//! A response is either decoded completely or rejected; a partially decoded collection is never
//! returned.

use crate::config::FeedConfig;
use crate::constants::{
    BLANK_FEED_FILTERS_AFTER_STATUS, BLANK_FEED_FILTERS_BEFORE_STATUS, FEED_DATE_FORMAT,
    FEED_STATUS_PARAM,
};
use crate::error::{FetchError, FetchResult};
use crate::record::RawProcedureRecord;
use chrono::{Local, NaiveDate};
use reqwest::Url;

/// Query parameters for one day of the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedQuery {
    day: NaiveDate,
    status_code: Option<String>,
}

impl FeedQuery {
    pub fn for_day(day: NaiveDate, status_code: Option<&str>) -> Self {
        Self {
            day,
            status_code: status_code.map(str::to_string),
        }
    }

    /// Parameters in the order the upstream documents them.
    ///
    /// `sts` is included only when a status code is set.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let date = self.day.format(FEED_DATE_FORMAT).to_string();

        let mut params = vec![("dateFrom", date.clone()), ("dateTo", date)];
        params.extend(
            BLANK_FEED_FILTERS_BEFORE_STATUS
                .iter()
                .map(|name| (*name, String::new())),
        );
        if let Some(code) = &self.status_code {
            params.push((FEED_STATUS_PARAM, code.clone()));
        }
        params.extend(
            BLANK_FEED_FILTERS_AFTER_STATUS
                .iter()
                .map(|name| (*name, String::new())),
        );
        params
    }
}

/// HTTP client for the scheduling feed.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct FeedClient {
    http: reqwest::Client,
    cfg: FeedConfig,
}

impl FeedClient {
    /// Build a client from the feed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be initialised.
    pub fn new(cfg: FeedConfig) -> FetchResult<Self> {
        if cfg.accept_invalid_certs() {
            tracing::warn!(
                feed = %cfg.base_url(),
                "TLS certificate verification is disabled for the scheduling feed"
            );
        }

        let http = reqwest::Client::builder()
            .user_agent(format!("iclboard/{}", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.timeout())
            .danger_accept_invalid_certs(cfg.accept_invalid_certs())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http, cfg })
    }

    pub fn query_for(&self, day: NaiveDate) -> FeedQuery {
        FeedQuery::for_day(day, self.cfg.status_code())
    }

    /// Full request URL for `day`. Existing query parameters on the base URL are kept.
    pub fn request_url(&self, day: NaiveDate) -> Url {
        let mut url = self.cfg.base_url().clone();
        url.query_pairs_mut()
            .extend_pairs(self.query_for(day).params());
        url
    }

    /// Fetch today's records, using the server's local calendar day.
    pub async fn fetch_today(&self) -> FetchResult<Vec<RawProcedureRecord>> {
        self.fetch_day(Local::now().date_naive()).await
    }

    /// Fetch the records for `day`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if:
    /// - the request fails or times out ([`FetchError::Transport`]),
    /// - the feed answers with a non-success status ([`FetchError::Status`]),
    /// - the body is not a JSON array of objects ([`FetchError::Decode`]).
    pub async fn fetch_day(&self, day: NaiveDate) -> FetchResult<Vec<RawProcedureRecord>> {
        let url = self.request_url(day);
        tracing::debug!(%day, "requesting cath list feed");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let records: Vec<RawProcedureRecord> =
            serde_json::from_slice(&body).map_err(FetchError::Decode)?;

        tracing::debug!(%day, count = records.len(), "decoded cath list feed");
        Ok(records)
    }
}
