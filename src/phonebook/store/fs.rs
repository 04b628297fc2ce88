use super::reverse::ReverseLines;
use super::row::{
    format_row, format_unnumbered_row, header_line, is_raw_header, leading_id, parse_raw_row,
    raw_lines, Row,
};
use super::{DataStore, LoadReport, MalformedRow};
use crate::error::{PhonebookError, Result};
use crate::model::{NewRecord, Record};
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

const FILE_EXT: &str = "csv";

pub struct FileStore {
    path: PathBuf,
    first_id: u64,
}

impl FileStore {
    /// Opens the phonebook at `path`, creating it with just the header row
    /// if it does not exist yet.
    ///
    /// The path must end in `.csv` and its directory must already exist;
    /// no directories are created here.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        let has_csv_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXT));
        if !has_csv_ext {
            return Err(PhonebookError::InvalidExtension(path));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(PhonebookError::DirectoryNotFound(parent.to_path_buf()));
            }
        }

        if !path.exists() {
            fs::write(&path, format!("{}\n", header_line())).map_err(PhonebookError::Io)?;
            info!("event=store_create path={}", path.display());
        }

        Ok(Self { path, first_id: 1 })
    }

    /// Identifier given to the first record of an empty store.
    pub fn with_first_id(mut self, first_id: u64) -> Self {
        self.first_id = first_id;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The highest identifier recorded in the file, from its last
    /// identifier-bearing line.
    fn last_assigned_id(&self) -> Result<Option<u64>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PhonebookError::Io(e)),
        };

        for line in ReverseLines::new(file).map_err(PhonebookError::Io)? {
            let line = line.map_err(PhonebookError::Io)?;
            if let Some(id) = leading_id(&line) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(PhonebookError::Io)?;

        let len = file.metadata().map_err(PhonebookError::Io)?.len();
        let mut prefix = String::new();
        if len == 0 {
            prefix.push_str(&header_line());
            prefix.push('\n');
        } else {
            // Only the final byte is read: a file saved without a trailing
            // newline must not glue the new row onto its last line.
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1)).map_err(PhonebookError::Io)?;
            file.read_exact(&mut last).map_err(PhonebookError::Io)?;
            if last[0] != b'\n' {
                prefix.push('\n');
            }
        }

        writeln!(file, "{}{}", prefix, line).map_err(PhonebookError::Io)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_report(&self) -> Result<LoadReport> {
        let bytes = fs::read(&self.path).map_err(PhonebookError::Io)?;
        let mut report = LoadReport::default();

        for (index, raw) in raw_lines(&bytes).into_iter().enumerate() {
            let line_number = index + 1;
            if line_number == 1 && is_raw_header(raw) {
                continue;
            }
            match parse_raw_row(raw) {
                Row::Record(record) => report.records.push(record),
                Row::Watermark(_) | Row::Blank => {}
                Row::Malformed(reason) => {
                    warn!(
                        "event=row_skip path={} line={} reason={}",
                        self.path.display(),
                        line_number,
                        reason
                    );
                    report.malformed.push(MalformedRow {
                        line: line_number,
                        reason,
                    });
                }
            }
        }

        debug!(
            "event=store_load records={} skipped={}",
            report.records.len(),
            report.malformed.len()
        );
        Ok(report)
    }

    fn append(&mut self, record: &Record) -> Result<()> {
        let line = format_row(record)?;
        self.append_line(&line)
    }

    fn append_unnumbered(&mut self, record: &NewRecord) -> Result<()> {
        let line = format_unnumbered_row(record)?;
        self.append_line(&line)
    }

    fn rewrite(&mut self, records: &[Record]) -> Result<()> {
        let existing = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(PhonebookError::Io(e)),
        };
        let high = self.last_assigned_id()?;

        let mut content = header_line().into_bytes();
        content.push(b'\n');

        // Existing record rows are matched against `records` in order: a
        // row without a match was removed, an unchanged one is copied as
        // it was. Rows that never parsed are copied in place.
        let mut pending = records.iter().peekable();
        let mut unparsed = 0;
        for (index, raw) in raw_lines(&existing).into_iter().enumerate() {
            if index == 0 && is_raw_header(raw) {
                continue;
            }
            match parse_raw_row(raw) {
                Row::Record(old) => {
                    if let Some(new) = pending.next_if(|r| r.id == old.id) {
                        if *new == old {
                            content.extend_from_slice(raw);
                        } else {
                            content.extend_from_slice(format_row(new)?.as_bytes());
                        }
                        content.push(b'\n');
                    }
                }
                Row::Watermark(_) | Row::Blank => {}
                Row::Malformed(_) => {
                    content.extend_from_slice(raw);
                    content.push(b'\n');
                    unparsed += 1;
                }
            }
        }
        for record in pending {
            content.extend_from_slice(format_row(record)?.as_bytes());
            content.push(b'\n');
        }

        // Keep the highest identifier ever assigned in the file, otherwise
        // deleting the newest record would let its identifier come back.
        let highest_kept = records.iter().map(|r| r.id).max();
        if let Some(high) = high {
            if highest_kept.map_or(true, |kept| kept < high) {
                content.extend_from_slice(format!("{}\n", high).as_bytes());
            }
        }

        fs::write(&self.path, content).map_err(PhonebookError::Io)?;
        debug!(
            "event=store_rewrite path={} records={} unparsed_kept={}",
            self.path.display(),
            records.len(),
            unparsed
        );
        Ok(())
    }

    fn next_id(&self) -> Result<u64> {
        match self.last_assigned_id()? {
            Some(id) => id
                .checked_add(1)
                .ok_or_else(|| PhonebookError::Store("Identifier space exhausted".to_string())),
            None => Ok(self.first_id),
        }
    }

    fn set_first_id(&mut self, first_id: u64) {
        self.first_id = first_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, FieldMap, NewRecord};
    use tempfile::TempDir;

    fn new_record(first: &str, company: &str) -> NewRecord {
        NewRecord {
            first_name: first.into(),
            last_name: "Smith".into(),
            middle_name: String::new(),
            company: company.into(),
            work_phone: "84950000000".into(),
            personal_phone: "71234567890".into(),
        }
    }

    /// File content: the header, then `rows` one per line.
    fn file_with(rows: &[&str]) -> String {
        let mut content = header_line();
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        content
    }

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("book.csv")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_file_with_header_only() {
        let (_dir, store) = setup();
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, format!("{}\n", header_line()));
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.next_id().unwrap(), 1);
    }

    #[test]
    fn open_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let err = FileStore::open(dir.path().join("book.txt")).err().unwrap();
        assert!(matches!(err, PhonebookError::InvalidExtension(_)));
        let err = FileStore::open(dir.path().join("book")).err().unwrap();
        assert!(matches!(err, PhonebookError::InvalidExtension(_)));
    }

    #[test]
    fn open_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = FileStore::open(missing.join("book.csv")).err().unwrap();
        assert!(matches!(err, PhonebookError::DirectoryNotFound(p) if p == missing));
        assert!(!missing.exists());
    }

    #[test]
    fn open_keeps_existing_content() {
        let (_dir, mut store) = setup();
        store.insert(new_record("Anna", "Acme")).unwrap();
        let reopened = FileStore::open(store.path().to_path_buf()).unwrap();
        assert_eq!(reopened.load().unwrap().len(), 1);
    }

    #[test]
    fn append_writes_one_line() {
        let (_dir, mut store) = setup();
        store.insert(new_record("Anna", "Acme")).unwrap();
        store.insert(new_record("Boris", "Globex")).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "2;Boris;Smith;;Globex;84950000000;71234567890");
    }

    #[test]
    fn append_repairs_missing_trailing_newline() {
        let (_dir, mut store) = setup();
        fs::write(
            store.path(),
            format!("{}\n1;Anna;Smith;;Acme;84950000000;71234567890", header_line()),
        )
        .unwrap();

        let added = store.insert(new_record("Boris", "Globex")).unwrap();
        assert_eq!(added.id, 2);
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn rewrite_round_trips_every_field() {
        let (_dir, mut store) = setup();
        let records = vec![
            new_record("Анна", "ООО \"Ромашка\"").into_record(1),
            NewRecord {
                middle_name: "Jean-Luc".into(),
                ..new_record("Boris", "Globex")
            }
            .into_record(2),
        ];
        store.rewrite(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn load_skips_malformed_rows() {
        let (_dir, store) = setup();
        let content = file_with(&[
            "1;Anna;Smith;;Acme;849;712",
            "broken;row",
            "",
            "x;a;b;c;d;e;f",
            "2;Boris;Smith;;Acme;849;712",
        ]);
        fs::write(store.path(), content).unwrap();

        let report = store.load_report().unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(
            report.malformed.iter().map(|m| m.line).collect::<Vec<_>>(),
            vec![3, 5]
        );
    }

    #[test]
    fn unparsed_rows_survive_edits_and_deletes() {
        let (_dir, mut store) = setup();
        let content = file_with(&[
            "1;Anna;Smith;;Acme;849;712",
            "Ivan;Petrov;;Globex;849;712",
            ";Vera;Orlova;;Initech;849;712",
            "2;Boris;Smith;;Acme;849;712",
        ]);
        fs::write(store.path(), content).unwrap();

        let mut fields = FieldMap::new();
        fields.insert(Field::Company, "Initech".into());
        store.update_fields(1, &fields).unwrap();
        store.delete(2).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let expected = file_with(&[
            "1;Anna;Smith;;Initech;849;712",
            "Ivan;Petrov;;Globex;849;712",
            ";Vera;Orlova;;Initech;849;712",
            "2",
        ]);
        assert_eq!(content, expected);
        assert_eq!(store.load_report().unwrap().malformed.len(), 2);
    }

    #[test]
    fn untouched_rows_stay_byte_identical() {
        let (_dir, mut store) = setup();
        let mut original = file_with(&["1;Anna;Smith;;Acme;849;712\r"]).into_bytes();
        original.extend_from_slice(b"2;B\xFFris;Smith;;Acme;849;712\n");
        original.extend_from_slice(b"3;Vera;Smith;;Acme;849;712\n");
        fs::write(store.path(), &original).unwrap();

        let report = store.load_report().unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.malformed[0].line, 3);

        let mut fields = FieldMap::new();
        fields.insert(Field::Company, "Globex".into());
        store.update_fields(3, &fields).unwrap();

        let mut expected = file_with(&["1;Anna;Smith;;Acme;849;712\r"]).into_bytes();
        expected.extend_from_slice(b"2;B\xFFris;Smith;;Acme;849;712\n");
        expected.extend_from_slice(b"3;Vera;Smith;;Globex;849;712\n");
        assert_eq!(fs::read(store.path()).unwrap(), expected);
    }

    #[test]
    fn next_id_skips_trailing_blank_lines() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            format!("{}\n5;Anna;Smith;;Acme;849;712\n\n\n", header_line()),
        )
        .unwrap();
        assert_eq!(store.next_id().unwrap(), 6);
    }

    #[test]
    fn first_id_is_configurable() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path().join("book.csv"))
            .unwrap()
            .with_first_id(0);
        assert_eq!(store.insert(new_record("Anna", "Acme")).unwrap().id, 0);
        assert_eq!(store.insert(new_record("Boris", "Acme")).unwrap().id, 1);
    }

    #[test]
    fn ids_never_repeat_after_deleting_the_newest() {
        let (_dir, mut store) = setup();
        store.insert(new_record("Anna", "Acme")).unwrap();
        store.insert(new_record("Boris", "Acme")).unwrap();
        store.delete(2).unwrap();

        assert_eq!(store.load().unwrap().len(), 1);
        assert_eq!(store.insert(new_record("Vera", "Acme")).unwrap().id, 3);
    }

    #[test]
    fn watermark_survives_further_rewrites() {
        let (_dir, mut store) = setup();
        store.insert(new_record("Anna", "Acme")).unwrap();
        store.insert(new_record("Boris", "Acme")).unwrap();
        store.delete(2).unwrap();
        store.delete(1).unwrap();

        assert!(store.load_report().unwrap().malformed.is_empty());
        assert_eq!(store.next_id().unwrap(), 3);

        let mut fields = FieldMap::new();
        fields.insert(Field::Company, "Globex".into());
        let anna = store.insert(new_record("Anna", "Acme")).unwrap();
        store.update_fields(anna.id, &fields).unwrap();
        assert_eq!(store.next_id().unwrap(), 4);
    }

    #[test]
    fn delete_missing_id_leaves_file_untouched() {
        let (_dir, mut store) = setup();
        store.insert(new_record("Anna", "Acme")).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.delete(99).err().unwrap();
        assert!(matches!(err, PhonebookError::RecordNotFound(99)));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn update_fields_changes_only_named_fields() {
        let (_dir, mut store) = setup();
        store.insert(new_record("Anna", "Initech")).unwrap();
        store.insert(new_record("Boris", "Globex")).unwrap();
        let before = store.load().unwrap();

        let mut fields = FieldMap::new();
        fields.insert(Field::Company, "Acme".into());
        store.update_fields(1, &fields).unwrap();

        let after = store.load().unwrap();
        let mut expected = before.clone();
        expected[0].company = "Acme".into();
        assert_eq!(after, expected);
    }
}
