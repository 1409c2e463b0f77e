//! Listing envelope.
//!
//! Success and failure share one shape and one transport status; callers tell them apart by the
//! `status` field. A failure carries only a fixed message and never any `data` or `counter`.
//!
//! ```text
//! { "status": "success", "data": [ ... ], "counter": { "initial": n, "ongoing": n, "done": n } }
//! { "status": "failed", "message": "Internal error happened. Try again" }
//! ```

use iclboard_core::{CounterSummary, RawProcedureRecord, Reconciliation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User-visible message for any failed listing. Internal detail is never exposed.
pub const FAILURE_MESSAGE: &str = "Internal error happened. Try again";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Board counters on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CounterRes {
    pub initial: u64,
    pub ongoing: u64,
    pub done: u64,
}

impl From<CounterSummary> for CounterRes {
    fn from(counter: CounterSummary) -> Self {
        Self {
            initial: counter.initial as u64,
            ongoing: counter.ongoing as u64,
            done: counter.done as u64,
        }
    }
}

/// Response of `GET /display/geticllisting`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListingRes {
    pub status: ResponseStatus,
    /// Feed records relevant to the board, exactly as the feed sent them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub data: Option<Vec<RawProcedureRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<CounterRes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListingRes {
    pub fn success(reconciliation: Reconciliation) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(reconciliation.records),
            counter: Some(reconciliation.counter.into()),
            message: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: ResponseStatus::Failed,
            data: None,
            counter: None,
            message: Some(FAILURE_MESSAGE.to_string()),
        }
    }
}
