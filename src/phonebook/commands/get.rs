use crate::commands::CmdResult;
use crate::error::{PhonebookError, Result};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, id: u64) -> Result<CmdResult> {
    let record = store
        .find_by_id(id)?
        .ok_or(PhonebookError::RecordNotFound(id))?;
    let mut result = CmdResult::default();
    result.listed_records.push(record);
    result.total = 1;
    Ok(result)
}
