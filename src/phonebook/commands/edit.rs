//! Editing one group of fields of an existing record.
//!
//! Each field of the group is asked for in turn. In the name and phone
//! groups an empty answer keeps the current value; a company is always
//! required. Answers are validated like new records and an invalid answer
//! asks the same field again. Only the fields that actually changed are
//! written, and quitting at any prompt writes nothing.

use crate::commands::prompt::{Answer, Prompter};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PhonebookError, Result};
use crate::model::{FieldGroup, FieldMap, Record};
use crate::store::DataStore;
use crate::validation::validate_field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(Record),
    /// Every field was skipped or given its current value
    Unchanged(Record),
    Cancelled,
}

/// Collects the changes for `group` without touching the store.
pub fn collect_changes<P: Prompter>(
    record: &Record,
    group: FieldGroup,
    prompter: &mut P,
) -> Result<Option<FieldMap>> {
    let mut changes = FieldMap::new();

    for &field in group.fields() {
        let current = record.value(field);
        loop {
            let text = match prompter.ask(field, Some(current.as_ref()))? {
                Answer::Quit => return Ok(None),
                Answer::Text(text) => text,
            };
            if text.trim().is_empty() && group.allows_skip() {
                break;
            }
            match validate_field(field, &text, !field.is_optional()) {
                Ok(value) => {
                    if value != current {
                        changes.insert(field, value);
                    }
                    break;
                }
                Err(e) => prompter.rejected(field, &e),
            }
        }
    }

    Ok(Some(changes))
}

pub fn edit<S: DataStore, P: Prompter>(
    store: &mut S,
    prompter: &mut P,
    id: u64,
    group: FieldGroup,
) -> Result<EditOutcome> {
    let record = store
        .find_by_id(id)?
        .ok_or(PhonebookError::RecordNotFound(id))?;

    match collect_changes(&record, group, prompter)? {
        None => Ok(EditOutcome::Cancelled),
        Some(changes) if changes.is_empty() => Ok(EditOutcome::Unchanged(record)),
        Some(changes) => Ok(EditOutcome::Updated(store.update_fields(id, &changes)?)),
    }
}

pub fn run<S: DataStore, P: Prompter>(
    store: &mut S,
    prompter: &mut P,
    id: u64,
    group: FieldGroup,
) -> Result<CmdResult> {
    match edit(store, prompter, id, group)? {
        EditOutcome::Cancelled => Ok(CmdResult::cancelled()),
        EditOutcome::Unchanged(record) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!(
                "Nothing changed ({}): {}",
                record.id,
                record.full_name()
            )));
            Ok(result)
        }
        EditOutcome::Updated(record) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Record updated ({}): {}",
                record.id,
                record.full_name()
            )));
            Ok(result.with_affected_records(vec![record]))
        }
    }
}
