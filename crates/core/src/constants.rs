//! Constants used throughout the ICL board core crate.
//!
//! Wire field names, status labels and store schema names live here so the feed client, the
//! engine and the local store agree on them.

/// Default SQLite database holding the local procedure records.
pub const DEFAULT_DATABASE_PATH: &str = "iclms.sqlite";

/// Default upper bound on a single feed request, in seconds.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Date format expected by the scheduling feed (`D/M/YYYY`, no zero padding).
pub const FEED_DATE_FORMAT: &str = "%-d/%-m/%Y";

/// Feed filters that are always sent, blank, after the date range.
pub const BLANK_FEED_FILTERS_BEFORE_STATUS: [&str; 3] = ["mrn", "conDr", "regDr"];

/// Feed filters that are always sent, blank, after the optional `sts` filter.
pub const BLANK_FEED_FILTERS_AFTER_STATUS: [&str; 4] = ["proc", "ic", "cath", "lab"];

/// Query parameter carrying the optional status-code constraint.
pub const FEED_STATUS_PARAM: &str = "sts";

/// Feed record field correlating with the local store.
pub const ROW_ID_FIELD: &str = "rowID";

/// Feed record field holding the free-text status label.
pub const STATUS_FIELD: &str = "status";

/// Feed record field set once the patient is in the lab.
pub const TIME_IN_FIELD: &str = "timeIn";

/// Feed record field holding the lab assignment.
pub const LAB_FIELD: &str = "lab";

/// Case-folded status label for procedures that have not finished.
pub const STATUS_INITIAL: &str = "initial";

/// Case-folded status label for completed procedures.
pub const STATUS_DONE: &str = "done";

/// `procedure_icl.patient_status` value for an active patient.
pub const ACTIVE_PATIENT_STATUS: i64 = 1;

/// `procedure_icl.status` value for a procedure in progress.
pub const IN_PROGRESS_STATUS: i64 = 1;
