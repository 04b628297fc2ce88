//! # Storage Layer
//!
//! This module defines the storage abstraction for the phonebook. The
//! [`DataStore`] trait lets the commands work against different backends.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage in a single `;`-delimited file
//!   - Header row naming the columns, then one record per line
//!   - Every call opens and closes the file, nothing is cached in between
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!
//! ## Mutation Paths
//!
//! Creating a record appends a single line. Anything that changes or removes
//! an existing record loads the whole collection and rewrites the file.
//! Lines that never parsed as records are carried through a rewrite
//! unchanged, as are the rows of records that did not change.
//! There is no partial-write recovery: a crash during a rewrite can leave a
//! truncated file behind.
//!
//! ## Identifiers
//!
//! Identifiers grow by one per created record and are never handed out
//! twice, even after the newest record is deleted. The file store finds the
//! next one by reading the file backwards (see [`reverse`]) instead of
//! loading every row.

use crate::error::{PhonebookError, Result};
use crate::model::{Field, FieldMap, NewRecord, Record};
use log::{debug, info};

pub mod fs;
pub mod memory;
pub mod reverse;
pub mod row;

/// A data row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based line number in the backing file
    pub line: usize,
    pub reason: String,
}

/// Result of loading the store: the records plus the rows that were skipped.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub malformed: Vec<MalformedRow>,
}

/// Abstract interface for record storage.
///
/// Backends provide the raw load/append/rewrite primitives and identifier
/// generation; lookups and edits are built on top of them.
pub trait DataStore {
    /// Load every record, reporting the rows that had to be skipped
    fn load_report(&self) -> Result<LoadReport>;

    /// Add one record at the end without touching the others
    fn append(&mut self, record: &Record) -> Result<()>;

    /// Add one row that lacks the identifier column.
    ///
    /// Only the legacy generator layout writes these; loading skips them.
    fn append_unnumbered(&mut self, record: &NewRecord) -> Result<()>;

    /// Replace the whole collection.
    ///
    /// Rows that never parsed as records are not part of the collection
    /// and stay where they are.
    fn rewrite(&mut self, records: &[Record]) -> Result<()>;

    /// The identifier the next created record gets
    fn next_id(&self) -> Result<u64>;

    /// The identifier handed out when the store holds none yet
    fn set_first_id(&mut self, first_id: u64);

    /// Load every record, silently skipping malformed rows
    fn load(&self) -> Result<Vec<Record>> {
        Ok(self.load_report()?.records)
    }

    /// Assign the next identifier to a new record and append it
    fn insert(&mut self, new: NewRecord) -> Result<Record> {
        let record = new.into_record(self.next_id()?);
        self.append(&record)?;
        info!("event=record_append id={}", record.id);
        Ok(record)
    }

    fn find_by_id(&self, id: u64) -> Result<Option<Record>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Remove a record and rewrite the store.
    ///
    /// Returns [`PhonebookError::RecordNotFound`] without writing anything
    /// when no record has this identifier.
    fn delete(&mut self, id: u64) -> Result<Record> {
        let mut records = self.load()?;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(PhonebookError::RecordNotFound(id))?;
        let removed = records.remove(position);
        self.rewrite(&records)?;
        info!("event=record_delete id={} remaining={}", id, records.len());
        Ok(removed)
    }

    /// Overwrite the listed fields of one record and rewrite the store.
    ///
    /// Fields absent from `fields` and every other record stay as they are.
    fn update_fields(&mut self, id: u64, fields: &FieldMap) -> Result<Record> {
        if fields.contains_key(&Field::Id) {
            return Err(PhonebookError::Api(
                "The identifier of a record cannot be changed".to_string(),
            ));
        }

        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(PhonebookError::RecordNotFound(id))?;
        for (field, value) in fields {
            record.set(*field, value.clone());
        }
        let updated = record.clone();

        self.rewrite(&records)?;
        debug!(
            "event=record_update id={} fields={:?}",
            id,
            fields.keys().collect::<Vec<_>>()
        );
        Ok(updated)
    }
}
