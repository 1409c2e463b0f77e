//! Reconciliation and aggregation engine.
//!
//! Intersects a day's feed with the locally relevant identifiers and computes the board counters.
//! Everything here is pure: no I/O and no failure modes. Absent or malformed fields simply do not
//! match.
//!
//! ## Counter scope
//!
//! `initial` and `ongoing` count only the reconciled (locally relevant) records. `done` counts the
//! entire feed, so completed procedures are tallied regardless of local relevance.

use crate::constants::{STATUS_DONE, STATUS_INITIAL};
use crate::record::{CounterSummary, RawProcedureRecord};
use iclboard_types::RowId;
use std::collections::HashSet;

/// Where a procedure stands, reconstructed from a single feed snapshot.
///
/// The lifecycle is `Unknown -> Initial -> Ongoing -> Done`. The feed never reports `Ongoing`
/// directly; an `initial` record with a start time or lab assignment is treated as ongoing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcedureStage {
    /// No status, or a status the board does not track.
    Unknown,
    Initial,
    Ongoing,
    Done,
}

impl ProcedureStage {
    /// Classify a record. Status comparison is case-insensitive.
    pub fn of(record: &RawProcedureRecord) -> Self {
        match record.status().map(str::to_lowercase).as_deref() {
            Some(STATUS_INITIAL) if record.has_started() => ProcedureStage::Ongoing,
            Some(STATUS_INITIAL) => ProcedureStage::Initial,
            Some(STATUS_DONE) => ProcedureStage::Done,
            _ => ProcedureStage::Unknown,
        }
    }

    /// Whether the feed status is `initial`, started or not.
    pub fn is_initial(self) -> bool {
        matches!(self, ProcedureStage::Initial | ProcedureStage::Ongoing)
    }
}

/// Output of a single reconciliation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciliation {
    /// Feed records whose `rowID` is relevant, in feed order, duplicates kept.
    pub records: Vec<RawProcedureRecord>,
    pub counter: CounterSummary,
}

/// Reconcile a feed against the relevant identifier set.
///
/// # Arguments
///
/// * `feed` - Every record the scheduling feed returned for the day.
/// * `relevant_ids` - Identifiers the local store marks active and in progress.
///
/// # Returns
///
/// The filtered listing and its [`CounterSummary`]. An empty `relevant_ids` yields no records and
/// zero `initial`/`ongoing`, while `done` still reflects the whole feed.
pub fn reconcile(feed: Vec<RawProcedureRecord>, relevant_ids: &HashSet<RowId>) -> Reconciliation {
    let done = feed
        .iter()
        .filter(|r| ProcedureStage::of(r) == ProcedureStage::Done)
        .count();

    let records: Vec<RawProcedureRecord> = feed
        .into_iter()
        .filter(|r| r.row_id().is_some_and(|id| relevant_ids.contains(&id)))
        .collect();

    let mut counter = CounterSummary {
        done,
        ..CounterSummary::default()
    };
    for stage in records.iter().map(ProcedureStage::of) {
        if stage.is_initial() {
            counter.initial += 1;
        }
        if stage == ProcedureStage::Ongoing {
            counter.ongoing += 1;
        }
    }

    Reconciliation { records, counter }
}
