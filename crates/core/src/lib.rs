//! # ICL Board Core
//!
//! Business logic for the cath lab status board.
//!
//! This crate contains:
//! - The scheduling feed client ([`FeedClient`])
//! - The read-only procedure store ([`ProcedureStore`])
//! - The reconciliation and aggregation engine ([`reconcile`])
//! - The listing service tying them together per request ([`ListingService`])
//!
//! **No API concerns**: HTTP serving and response envelopes belong in `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod feed;
pub mod listing;
pub mod record;
pub mod store;

pub use config::{BoardConfig, FeedConfig};
pub use engine::{reconcile, ProcedureStage, Reconciliation};
pub use error::{
    ConfigError, ConfigResult, FetchError, FetchResult, ListingError, ListingResult, StoreError,
    StoreResult,
};
pub use feed::{FeedClient, FeedQuery};
pub use iclboard_types::RowId;
pub use listing::ListingService;
pub use record::{CounterSummary, RawProcedureRecord};
pub use store::ProcedureStore;
