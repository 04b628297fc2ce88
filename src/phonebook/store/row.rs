//! The delimited row format shared by the file store.

use crate::error::{PhonebookError, Result};
use crate::model::{Field, NewRecord, Record};

pub const DELIMITER: char = ';';

/// What a single line of the backing file holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Record(Record),
    /// A bare identifier marking the highest one ever assigned.
    Watermark(u64),
    Blank,
    Malformed(String),
}

pub fn header_line() -> String {
    Field::ALL
        .iter()
        .map(|f| f.header())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

pub fn is_header(line: &str) -> bool {
    line.trim_end_matches('\r') == header_line()
}

pub fn format_row(record: &Record) -> Result<String> {
    let mut values = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let value = record.value(field);
        if value.contains(DELIMITER) || value.contains('\n') || value.contains('\r') {
            return Err(PhonebookError::Store(format!(
                "{} of record {} cannot contain '{}' or line breaks",
                field, record.id, DELIMITER
            )));
        }
        values.push(value);
    }
    Ok(values.join(&DELIMITER.to_string()))
}

/// A row without the identifier column, as older releases generated them.
///
/// Such rows have one field too few and are skipped when loading.
pub fn format_unnumbered_row(record: &NewRecord) -> Result<String> {
    let full = format_row(&record.clone().into_record(0))?;
    Ok(full
        .split_once(DELIMITER)
        .map(|(_, rest)| rest.to_string())
        .unwrap_or(full))
}

pub fn parse_row(line: &str) -> Row {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return Row::Blank;
    }

    let parts: Vec<&str> = line.split(DELIMITER).collect();
    if parts.len() == 1 {
        return match parts[0].trim().parse() {
            Ok(id) => Row::Watermark(id),
            Err(_) => Row::Malformed("expected 7 fields, found 1".to_string()),
        };
    }
    if parts.len() != Field::ALL.len() {
        return Row::Malformed(format!(
            "expected {} fields, found {}",
            Field::ALL.len(),
            parts.len()
        ));
    }

    let id = match parts[0].trim().parse() {
        Ok(id) => id,
        Err(_) => return Row::Malformed(format!("invalid identifier '{}'", parts[0])),
    };

    Row::Record(Record {
        id,
        first_name: parts[1].to_string(),
        last_name: parts[2].to_string(),
        middle_name: parts[3].to_string(),
        company: parts[4].to_string(),
        work_phone: parts[5].to_string(),
        personal_phone: parts[6].to_string(),
    })
}

/// Splits file content into lines without decoding them.
///
/// The `\n` terminators are dropped; a `\r` before one stays part of the
/// line so that untouched rows can be written back byte for byte.
pub fn raw_lines(bytes: &[u8]) -> Vec<&[u8]> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|b| *b == b'\n').collect()
}

/// Like [`parse_row`] for an undecoded line. Invalid UTF-8 is malformed.
pub fn parse_raw_row(raw: &[u8]) -> Row {
    match std::str::from_utf8(raw) {
        Ok(line) => parse_row(line),
        Err(_) => Row::Malformed("line is not valid UTF-8".to_string()),
    }
}

pub fn is_raw_header(raw: &[u8]) -> bool {
    std::str::from_utf8(raw).is_ok_and(is_header)
}

/// The identifier at the start of a line, if it has one.
pub fn leading_id(line: &str) -> Option<u64> {
    line.split(DELIMITER).next()?.trim().parse().ok()
}
