use crate::commands::CmdResult;
use crate::error::Result;
use crate::pagination::PaginationState;
use crate::search::{search, SearchQuery};
use crate::store::DataStore;
use log::debug;

/// One page of the records matching every term of `query`.
///
/// A blank query is an error (`PhonebookError::EmptyQuery`), never a
/// listing of everything.
pub fn run<S: DataStore>(store: &S, query: &str, state: PaginationState) -> Result<CmdResult> {
    let query = SearchQuery::parse(query)?;
    let report = store.load_report()?;
    let matches = search(&report.records, &query);
    debug!(
        "event=search terms={} matches={}",
        query.terms().len(),
        matches.len()
    );
    Ok(CmdResult::default()
        .with_page(&matches, state)
        .with_malformed_rows(&report.malformed))
}
