//! Listing service.
//!
//! Runs one reconciliation per request: fetch the day's feed, read the relevant identifiers, then
//! hand both to the engine. Any failure abandons the whole request; there are no retries and no
//! partial results.

use crate::config::BoardConfig;
use crate::engine::{reconcile, Reconciliation};
use crate::error::ListingResult;
use crate::feed::FeedClient;
use crate::store::ProcedureStore;
use chrono::{Local, NaiveDate};

/// Produces the board listing. Holds no per-request state, so one instance serves concurrent
/// requests.
#[derive(Clone, Debug)]
pub struct ListingService {
    feed: FeedClient,
    store: ProcedureStore,
}

impl ListingService {
    /// Build the feed client and store handle from the startup configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Fetch`](crate::ListingError::Fetch) if the HTTP client cannot be
    /// built.
    pub fn new(cfg: &BoardConfig) -> ListingResult<Self> {
        Ok(Self {
            feed: FeedClient::new(cfg.feed().clone())?,
            store: ProcedureStore::new(cfg.database_path()),
        })
    }

    pub fn feed(&self) -> &FeedClient {
        &self.feed
    }

    pub fn store(&self) -> &ProcedureStore {
        &self.store
    }

    /// Reconcile today's feed.
    pub async fn listing(&self) -> ListingResult<Reconciliation> {
        self.listing_for(Local::now().date_naive()).await
    }

    /// Reconcile the feed for `day`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError`](crate::ListingError) if:
    /// - the feed cannot be fetched or decoded (the store is then not read),
    /// - the relevant identifiers cannot be read from the store.
    pub async fn listing_for(&self, day: NaiveDate) -> ListingResult<Reconciliation> {
        let feed = self.feed.fetch_day(day).await?;
        let relevant_ids = self.store.load_relevant_row_ids().await?;
        Ok(reconcile(feed, &relevant_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::error::{FetchError, ListingError, StoreError};
    use crate::record::CounterSummary;
    use rusqlite::Connection;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn seed_store(path: &Path, rows: &[(i64, i64, i64)]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE procedure_icl (
                id INTEGER PRIMARY KEY,
                row_id INTEGER,
                patient_status INTEGER NOT NULL,
                status INTEGER NOT NULL
            );",
        )
        .unwrap();
        for (row_id, patient_status, status) in rows {
            conn.execute(
                "INSERT INTO procedure_icl (row_id, patient_status, status) VALUES (?1, ?2, ?3)",
                rusqlite::params![row_id, patient_status, status],
            )
            .unwrap();
        }
    }

    fn service(server: &MockServer, database_path: &Path) -> ListingService {
        let feed = FeedConfig::new(&server.uri()).unwrap();
        let cfg = BoardConfig::new(feed, database_path.to_path_buf()).unwrap();
        ListingService::new(&cfg).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[tokio::test]
    async fn reconciles_feed_against_store() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("iclms.sqlite");
        seed_store(&db, &[(1, 1, 1), (2, 1, 1), (3, 1, 1), (4, 0, 1)]);

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"rowID": 1, "status": "Initial"},
                {"rowID": 2, "status": "done"},
                {"rowID": 3, "status": "initial", "timeIn": "08:00"},
                {"rowID": 4, "status": "initial", "lab": "Lab 1"},
                {"rowID": 5, "status": "Done"}
            ])))
            .mount(&server)
            .await;

        let result = service(&server, &db).listing_for(day()).await.unwrap();

        let listed: Vec<i64> = result
            .records
            .iter()
            .map(|r| r.fields()["rowID"].as_i64().unwrap())
            .collect();
        assert_eq!(listed, vec![1, 2, 3]);
        assert_eq!(
            result.counter,
            CounterSummary {
                initial: 2,
                ongoing: 1,
                done: 2,
            }
        );
    }

    #[tokio::test]
    async fn fetch_failure_abandons_listing() {
        let dir = TempDir::new().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        // The store path does not exist; the feed error must win because the store is never read.
        let err = service(&server, &dir.path().join("absent.sqlite"))
            .listing_for(day())
            .await
            .unwrap_err();

        assert!(matches!(err, ListingError::Fetch(FetchError::Status(_))));
        assert_eq!(err.origin(), "feed");
    }

    #[tokio::test]
    async fn store_failure_abandons_listing() {
        let dir = TempDir::new().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = service(&server, &dir.path().join("absent.sqlite"))
            .listing_for(day())
            .await
            .unwrap_err();

        assert!(matches!(err, ListingError::Store(StoreError::Open { .. })));
        assert_eq!(err.origin(), "local_store");
    }
}
