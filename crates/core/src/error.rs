/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set to the scheduling feed URL")]
    MissingFeedUrl(&'static str),
    #[error("invalid feed URL {value:?}: {reason}")]
    InvalidFeedUrl { value: String, reason: String },
    #[error("invalid feed timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error("invalid boolean for {key}: {value:?}")]
    InvalidFlag { key: &'static str, value: String },
    #[error("database path cannot be empty")]
    EmptyDatabasePath,
}

/// Errors raised while fetching the scheduling feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build feed HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("feed request failed: {0}")]
    Transport(reqwest::Error),
    #[error("feed responded with HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode feed response: {0}")]
    Decode(serde_json::Error),
}

/// Errors raised while reading the relevant identifier set from the local store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open procedure store {path}: {source}", path = path.display())]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to query relevant procedures: {0}")]
    Query(rusqlite::Error),
    #[error("procedure store task did not complete: {0}")]
    Task(String),
}

/// Errors that abandon a listing request.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ListingError {
    /// Short name of the collaborator that failed, for log context.
    pub fn origin(&self) -> &'static str {
        match self {
            ListingError::Fetch(_) => "feed",
            ListingError::Store(_) => "local_store",
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type FetchResult<T> = std::result::Result<T, FetchError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type ListingResult<T> = std::result::Result<T, ListingError>;
