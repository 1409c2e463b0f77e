//! Feed record and counter models.
//!
//! A [`RawProcedureRecord`] keeps the feed object exactly as received so every field the
//! scheduling system sends is echoed back to the board. Typed access is limited to the four fields
//! the engine reads. A field of an unexpected JSON type reads as absent rather than failing the
//! whole feed.

use crate::constants::{LAB_FIELD, ROW_ID_FIELD, STATUS_FIELD, TIME_IN_FIELD};
use iclboard_types::RowId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One procedure as reported by the scheduling feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProcedureRecord(Map<String, Value>);

impl RawProcedureRecord {
    /// All fields of the record, unmodified.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The `rowID`, normalised through [`RowId`]'s deserializer. Strings are trimmed; whole
    /// numbers (including `101.0`) use their integer form.
    pub fn row_id(&self) -> Option<RowId> {
        self.0
            .get(ROW_ID_FIELD)
            .and_then(|value| RowId::deserialize(value).ok())
    }

    /// The free-text status label, if it is a string.
    pub fn status(&self) -> Option<&str> {
        self.0.get(STATUS_FIELD).and_then(Value::as_str)
    }

    pub fn time_in(&self) -> Option<&Value> {
        self.0.get(TIME_IN_FIELD)
    }

    pub fn lab(&self) -> Option<&Value> {
        self.0.get(LAB_FIELD)
    }

    /// True when the feed shows a start time or a lab assignment.
    pub fn has_started(&self) -> bool {
        self.time_in().is_some_and(is_filled) || self.lab().is_some_and(is_filled)
    }
}

/// Whether a feed value carries content: null, `false`, `""`, `[]` and `{}` do not.
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Status counters shown on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSummary {
    /// Relevant procedures whose status is `initial`.
    pub initial: usize,
    /// The subset of `initial` that has a start time or lab assignment.
    pub ongoing: usize,
    /// Procedures in the whole feed whose status is `done`.
    pub done: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawProcedureRecord {
        serde_json::from_value(value).expect("test record should be an object")
    }

    #[test]
    fn row_id_accepts_numbers_and_strings() {
        assert_eq!(
            record(json!({"rowID": 31})).row_id(),
            Some(RowId::from(31_i64))
        );
        assert_eq!(
            record(json!({"rowID": " 31 "})).row_id(),
            Some(RowId::from(31_i64))
        );
    }

    #[test]
    fn row_id_absent_for_missing_blank_or_odd_types() {
        assert_eq!(record(json!({})).row_id(), None);
        assert_eq!(record(json!({"rowID": null})).row_id(), None);
        assert_eq!(record(json!({"rowID": ""})).row_id(), None);
        assert_eq!(record(json!({"rowID": [1]})).row_id(), None);
        assert_eq!(record(json!({"rowID": 101.5})).row_id(), None);
    }

    #[test]
    fn row_id_accepts_whole_float() {
        assert_eq!(
            record(json!({"rowID": 101.0})).row_id(),
            Some(RowId::from(101_i64))
        );
    }

    #[test]
    fn status_ignores_non_string_values() {
        assert_eq!(record(json!({"status": "Initial"})).status(), Some("Initial"));
        assert_eq!(record(json!({"status": 1})).status(), None);
        assert_eq!(record(json!({"status": null})).status(), None);
    }

    #[test]
    fn has_started_requires_non_empty_time_in_or_lab() {
        assert!(record(json!({"timeIn": "08:15"})).has_started());
        assert!(record(json!({"lab": "Lab 2"})).has_started());
        assert!(record(json!({"timeIn": "", "lab": "Lab 1"})).has_started());

        assert!(!record(json!({})).has_started());
        assert!(!record(json!({"timeIn": "", "lab": ""})).has_started());
        assert!(!record(json!({"timeIn": null, "lab": null})).has_started());
    }

    #[test]
    fn unknown_fields_survive_serialisation() {
        let input = json!({
            "rowID": 9,
            "status": "initial",
            "mrn": "A1234567",
            "procedure": "PCI",
            "consultant": "Dr Tan"
        });
        let output = serde_json::to_value(record(input.clone())).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn non_object_record_fails_to_decode() {
        assert!(serde_json::from_value::<RawProcedureRecord>(json!("rowID")).is_err());
    }
}
