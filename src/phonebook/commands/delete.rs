use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Removes the record with `id`.
///
/// A missing identifier comes back as `PhonebookError::RecordNotFound` and
/// leaves the store untouched.
pub fn run<S: DataStore>(store: &mut S, id: u64) -> Result<CmdResult> {
    let removed = store.delete(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record deleted ({}): {}",
        removed.id,
        removed.full_name()
    )));
    Ok(result.with_affected_records(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhonebookError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn removes_only_the_matching_record() {
        let mut store = StoreFixture::new().with_records(3).store;
        let result = run(&mut store, 2).unwrap();

        assert_eq!(result.affected_records[0].id, 2);
        let ids: Vec<_> = store.load().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn missing_id_is_not_found() {
        let mut store = StoreFixture::new().with_records(3).store;
        let before = store.load().unwrap();

        let err = run(&mut store, 9).err().unwrap();
        assert!(matches!(err, PhonebookError::RecordNotFound(9)));
        assert_eq!(store.load().unwrap(), before);
    }
}
