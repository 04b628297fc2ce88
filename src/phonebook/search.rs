//! Free-text record search.
//!
//! A query is split on whitespace into terms. A record matches when every
//! term occurs, case-insensitively, somewhere in its field values. Terms
//! may hit different fields: `acme 7123` finds the Acme contact whose
//! number contains `7123`.

use crate::error::{PhonebookError, Result};
use crate::model::Record;

/// A non-empty list of lower-cased search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Returns [`PhonebookError::EmptyQuery`] for a blank query, so there is
    /// no way to ask for "everything" through search.
    pub fn parse(query: &str) -> Result<Self> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Err(PhonebookError::EmptyQuery);
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches(&self, record: &Record) -> bool {
        let haystack = record.search_text().to_lowercase();
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

/// Records matching `query`, in their original order.
pub fn search(records: &[Record], query: &SearchQuery) -> Vec<Record> {
    records
        .iter()
        .filter(|r| query.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewRecord;

    fn record(id: u64, first: &str, company: &str, phone: &str) -> Record {
        NewRecord {
            first_name: first.into(),
            last_name: "Doe".into(),
            middle_name: String::new(),
            company: company.into(),
            work_phone: "84950000000".into(),
            personal_phone: phone.into(),
        }
        .into_record(id)
    }

    fn records() -> Vec<Record> {
        vec![
            record(1, "Anna", "Acme", "71234567890"),
            record(2, "Boris", "Globex", "79990001122"),
            record(3, "Вера", "Acme", "79990003344"),
        ]
    }

    #[test]
    fn all_terms_must_match() {
        let query = SearchQuery::parse("acme 71234567890").unwrap();
        let found = search(&records(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn unknown_term_matches_nothing() {
        let query = SearchQuery::parse("xyz").unwrap();
        assert!(search(&records(), &query).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_and_keeps_order() {
        let query = SearchQuery::parse("ACME").unwrap();
        let ids: Vec<_> = search(&records(), &query).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let query = SearchQuery::parse("вЕрА").unwrap();
        assert_eq!(search(&records(), &query)[0].id, 3);
    }

    #[test]
    fn terms_may_hit_different_fields() {
        let query = SearchQuery::parse("boris 7999").unwrap();
        let found = search(&records(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Boris");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(matches!(
            SearchQuery::parse("   "),
            Err(PhonebookError::EmptyQuery)
        ));
        assert!(matches!(SearchQuery::parse(""), Err(PhonebookError::EmptyQuery)));
    }
}
