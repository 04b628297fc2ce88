use super::row::{format_unnumbered_row, parse_row, Row};
use super::{DataStore, LoadReport, MalformedRow};
use crate::error::Result;
use crate::model::{NewRecord, Record};

/// In-memory storage for testing and development.
/// Does NOT persist data.
pub struct InMemoryStore {
    records: Vec<Record>,
    /// Rows written without an identifier; reported by loads, never edited.
    unnumbered: Vec<String>,
    last_id: Option<u64>,
    first_id: u64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            unnumbered: Vec::new(),
            last_id: None,
            first_id: 1,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_id(mut self, first_id: u64) -> Self {
        self.first_id = first_id;
        self
    }

    fn track(&mut self, id: u64) {
        self.last_id = Some(self.last_id.map_or(id, |last| last.max(id)));
    }
}

impl DataStore for InMemoryStore {
    fn load_report(&self) -> Result<LoadReport> {
        // Line numbers as a file with a header and the unnumbered rows last
        // would have them.
        let malformed = self
            .unnumbered
            .iter()
            .enumerate()
            .filter_map(|(i, line)| match parse_row(line) {
                Row::Malformed(reason) => Some(MalformedRow {
                    line: self.records.len() + i + 2,
                    reason,
                }),
                _ => None,
            })
            .collect();

        Ok(LoadReport {
            records: self.records.clone(),
            malformed,
        })
    }

    fn append(&mut self, record: &Record) -> Result<()> {
        self.track(record.id);
        self.records.push(record.clone());
        Ok(())
    }

    fn append_unnumbered(&mut self, record: &NewRecord) -> Result<()> {
        self.unnumbered.push(format_unnumbered_row(record)?);
        Ok(())
    }

    fn rewrite(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            self.track(record.id);
        }
        self.records = records.to_vec();
        Ok(())
    }

    fn next_id(&self) -> Result<u64> {
        Ok(self.last_id.map_or(self.first_id, |last| last + 1))
    }

    fn set_first_id(&mut self, first_id: u64) {
        self.first_id = first_id;
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_record(mut self, first_name: &str, company: &str, phone: &str) -> Self {
            let record = NewRecord {
                first_name: first_name.to_string(),
                last_name: "Doe".to_string(),
                middle_name: String::new(),
                company: company.to_string(),
                work_phone: "84950000000".to_string(),
                personal_phone: phone.to_string(),
            };
            self.store.insert(record).unwrap();
            self
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let record = NewRecord {
                    first_name: format!("Person {}", letters(i)),
                    last_name: "Doe".to_string(),
                    middle_name: String::new(),
                    company: format!("Company {}", letters(i)),
                    work_phone: format!("8495{:07}", i),
                    personal_phone: format!("7900{:07}", i),
                };
                self.store.insert(record).unwrap();
            }
            self
        }
    }

    fn letters(mut n: usize) -> String {
        let mut out = Vec::new();
        loop {
            out.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        out.iter().rev().collect()
    }
}
