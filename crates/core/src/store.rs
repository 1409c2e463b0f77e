//! Read side of the local procedure store.
//!
//! The store is owned by the ICL management system; this crate only ever opens it read-only and
//! projects the identifiers of procedures that are both for an active patient and in progress.
//!
//! ## Schema read
//!
//! ```text
//! procedure_icl(
//!     row_id          INTEGER | TEXT   -- correlates with the feed's rowID
//!     patient_status  INTEGER          -- 1 = active
//!     status          INTEGER          -- 1 = in progress
//!     ...
//! )
//! ```
//!
//! The set is read fresh on every call. Nothing is cached between calls.

use crate::constants::{ACTIVE_PATIENT_STATUS, IN_PROGRESS_STATUS};
use crate::error::{StoreError, StoreResult};
use iclboard_types::RowId;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const RELEVANT_ROW_IDS_SQL: &str =
    "SELECT row_id FROM procedure_icl WHERE patient_status = ?1 AND status = ?2";

/// Read-only handle on the SQLite procedure store.
#[derive(Clone, Debug)]
pub struct ProcedureStore {
    database_path: PathBuf,
}

impl ProcedureStore {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Identifiers of active, in-progress procedures. Blocking.
    ///
    /// NULL and blank `row_id` values are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if:
    /// - the database cannot be opened read-only ([`StoreError::Open`]),
    /// - the query cannot be prepared or a row cannot be read ([`StoreError::Query`]).
    pub fn relevant_row_ids(&self) -> StoreResult<HashSet<RowId>> {
        let conn = Connection::open_with_flags(
            &self.database_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Open {
            path: self.database_path.clone(),
            source,
        })?;

        let mut stmt = conn
            .prepare(RELEVANT_ROW_IDS_SQL)
            .map_err(StoreError::Query)?;
        let rows = stmt
            .query_map(params![ACTIVE_PATIENT_STATUS, IN_PROGRESS_STATUS], |row| {
                row.get_ref(0).map(row_id_from_column)
            })
            .map_err(StoreError::Query)?;

        let mut ids = HashSet::new();
        for row in rows {
            if let Some(id) = row.map_err(StoreError::Query)? {
                ids.insert(id);
            }
        }

        tracing::debug!(count = ids.len(), "loaded relevant procedure identifiers");
        Ok(ids)
    }

    /// [`relevant_row_ids`](Self::relevant_row_ids) on the blocking thread pool.
    pub async fn load_relevant_row_ids(&self) -> StoreResult<HashSet<RowId>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.relevant_row_ids())
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn row_id_from_column(value: ValueRef<'_>) -> Option<RowId> {
    match value {
        ValueRef::Integer(i) => Some(RowId::from(i)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| RowId::new(s).ok()),
        _ => None,
    }
}
