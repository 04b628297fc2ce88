use crate::commands::CmdResult;
use crate::error::Result;
use crate::pagination::PaginationState;
use crate::store::DataStore;

/// One page of every record, in file order.
///
/// Rows that could not be read are skipped and reported as warnings.
pub fn run<S: DataStore>(store: &S, state: PaginationState) -> Result<CmdResult> {
    let report = store.load_report()?;
    Ok(CmdResult::default()
        .with_page(&report.records, state)
        .with_malformed_rows(&report.malformed))
}
