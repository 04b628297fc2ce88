use crate::commands::prompt::{Answer, Prompter};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PhonebookError, Result};
use crate::model::{Field, NewRecord};
use crate::store::DataStore;
use crate::validation::validate_field;

/// Validates every field of `record` and appends it with the next identifier.
pub fn run<S: DataStore>(store: &mut S, record: NewRecord) -> Result<CmdResult> {
    let mut validated = NewRecord::default();
    for field in Field::EDITABLE {
        let raw = raw_value(&record, field);
        let value = validate_field(field, raw, !field.is_optional())
            .map_err(|source| PhonebookError::InvalidField { field, source })?;
        validated.set(field, value);
    }
    save(store, validated)
}

/// Asks for each field in turn until all are valid, then appends the record.
///
/// An invalid answer is reported and the same field is asked again. Quitting
/// at any prompt returns a cancelled result and writes nothing.
pub fn interactive<S: DataStore, P: Prompter>(
    store: &mut S,
    prompter: &mut P,
) -> Result<CmdResult> {
    let mut draft = NewRecord::default();
    for field in Field::EDITABLE {
        loop {
            let text = match prompter.ask(field, None)? {
                Answer::Quit => return Ok(CmdResult::cancelled()),
                Answer::Text(text) => text,
            };
            match validate_field(field, &text, !field.is_optional()) {
                Ok(value) => {
                    draft.set(field, value);
                    break;
                }
                Err(e) => prompter.rejected(field, &e),
            }
        }
    }
    save(store, draft)
}

fn save<S: DataStore>(store: &mut S, record: NewRecord) -> Result<CmdResult> {
    let record = store.insert(record)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record added ({}): {}",
        record.id,
        record.full_name()
    )));
    Ok(result.with_affected_records(vec![record]))
}

fn raw_value(record: &NewRecord, field: Field) -> &str {
    match field {
        Field::Id => "",
        Field::FirstName => &record.first_name,
        Field::LastName => &record.last_name,
        Field::MiddleName => &record.middle_name,
        Field::Company => &record.company,
        Field::WorkPhone => &record.work_phone,
        Field::PersonalPhone => &record.personal_phone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::prompt::ScriptedPrompter;
    use crate::store::memory::InMemoryStore;
    use crate::validation::ValidationError;

    #[test]
    fn interactive_add_normalizes_phones() {
        let mut store = InMemoryStore::new();
        let mut prompter = ScriptedPrompter::new([
            "Anna",
            "Ivanova",
            "",
            "Acme",
            "8 (495) 000-00-00",
            "+7(123)456-78-90",
        ]);

        let result = interactive(&mut store, &mut prompter).unwrap();
        let record = &result.affected_records[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.middle_name, "");
        assert_eq!(record.work_phone, "84950000000");
        assert_eq!(record.personal_phone, "71234567890");
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn invalid_answer_asks_the_same_field_again() {
        let mut store = InMemoryStore::new();
        let mut prompter = ScriptedPrompter::new([
            "Anna1", "Anna", "Ivanova", "", "Acme", "123", "89990000000", "79990000000",
        ]);

        interactive(&mut store, &mut prompter).unwrap();
        assert_eq!(
            prompter.rejections,
            vec![
                (Field::FirstName, ValidationError::InvalidCharacter('1')),
                (Field::WorkPhone, ValidationError::InvalidStart('1')),
            ]
        );
        assert_eq!(prompter.asked[0], Field::FirstName);
        assert_eq!(prompter.asked[1], Field::FirstName);
    }

    #[test]
    fn quitting_writes_nothing() {
        let mut store = InMemoryStore::new();
        let mut prompter = ScriptedPrompter::new(["Anna", "Ivanova", "q"]);

        let result = interactive(&mut store, &mut prompter).unwrap();
        assert!(result.cancelled);
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.next_id().unwrap(), 1);
    }

    #[test]
    fn run_rejects_invalid_fields() {
        let mut store = InMemoryStore::new();
        let record = NewRecord {
            first_name: "Anna".into(),
            last_name: "Ivanova".into(),
            company: String::new(),
            work_phone: "84950000000".into(),
            personal_phone: "71234567890".into(),
            ..NewRecord::default()
        };

        let err = run(&mut store, record).err().unwrap();
        assert!(matches!(
            err,
            PhonebookError::InvalidField {
                field: Field::Company,
                source: ValidationError::Empty
            }
        ));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn ids_keep_increasing_across_deletes() {
        let mut store = InMemoryStore::new();
        let mut ids = Vec::new();
        for name in ["Anna", "Boris", "Vera", "Gleb"] {
            let record = NewRecord {
                first_name: name.into(),
                last_name: "Doe".into(),
                company: "Acme".into(),
                work_phone: "84950000000".into(),
                personal_phone: "71234567890".into(),
                ..NewRecord::default()
            };
            let result = run(&mut store, record).unwrap();
            ids.push(result.affected_records[0].id);
            if name == "Boris" {
                store.delete(2).unwrap();
            }
        }
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
