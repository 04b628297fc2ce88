//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single
//! entry point for every phonebook operation, whatever UI drives it.
//!
//! It dispatches to the matching command function, normalizes raw input
//! (identifiers typed as text, field groups named by menu number) and
//! returns structured `Result<CmdResult>` values. It never prints and never
//! holds business rules of its own.
//!
//! `PhonebookApi<S: DataStore>` is generic over the storage backend:
//! `PhonebookApi<FileStore>` in production, `PhonebookApi<InMemoryStore>`
//! in tests. Tests here check dispatch only; the behavior itself is tested
//! in the command and store modules.

use crate::commands::{self, prompt::Prompter};
use crate::config::PhonebookConfig;
use crate::error::{PhonebookError, Result};
use crate::model::{FieldGroup, FieldMap, NewRecord};
use crate::pagination::PaginationState;
use crate::store::DataStore;

pub struct PhonebookApi<S: DataStore> {
    store: S,
    config: PhonebookConfig,
    paths: commands::PhonebookPaths,
}

impl<S: DataStore> PhonebookApi<S> {
    pub fn new(store: S, config: PhonebookConfig, paths: commands::PhonebookPaths) -> Self {
        Self {
            store,
            config,
            paths,
        }
    }

    pub fn add_record(&mut self, record: NewRecord) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, record)
    }

    pub fn add_interactive<P: Prompter>(
        &mut self,
        prompter: &mut P,
    ) -> Result<commands::CmdResult> {
        commands::add::interactive(&mut self.store, prompter)
    }

    pub fn edit_interactive<P: Prompter>(
        &mut self,
        prompter: &mut P,
        id: &str,
        group: &str,
    ) -> Result<commands::CmdResult> {
        let id = parse_id(id)?;
        let group: FieldGroup = group.parse().map_err(PhonebookError::Api)?;
        commands::edit::run(&mut self.store, prompter, id, group)
    }

    pub fn update_fields(&mut self, id: &str, fields: &FieldMap) -> Result<commands::CmdResult> {
        let record = self.store.update_fields(parse_id(id)?, fields)?;
        Ok(commands::CmdResult::default().with_affected_records(vec![record]))
    }

    pub fn delete_record(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, parse_id(id)?)
    }

    pub fn get_record(&self, id: &str) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, parse_id(id)?)
    }

    pub fn list_records(&self, state: PaginationState) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, state)
    }

    pub fn search_records(
        &self,
        query: &str,
        state: PaginationState,
    ) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, query, state)
    }

    /// Generates `count` sample records in the configured layout.
    pub fn generate(&mut self, count: &str) -> Result<commands::CmdResult> {
        let count = count.trim().parse::<usize>().map_err(|_| {
            PhonebookError::Api(format!("'{}' is not a whole number", count.trim()))
        })?;
        commands::generate::run(&mut self.store, count, self.config.generator_layout)
    }

    pub fn next_id(&self) -> Result<u64> {
        self.store.next_id()
    }

    /// Runs a config action. A saved change applies to this session too,
    /// including the first identifier of a still empty store.
    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.paths.config_dir, action)?;
        if let Some(config) = &result.config {
            self.store.set_first_id(config.first_id);
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn paths(&self) -> &commands::PhonebookPaths {
        &self.paths
    }
}

/// Identifiers arrive as typed text; anything but a whole number is refused
/// before the store is touched.
fn parse_id(input: &str) -> Result<u64> {
    input.trim().parse().map_err(|_| {
        PhonebookError::Api(format!("'{}' is not a valid identifier", input.trim()))
    })
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, PhonebookPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::prompt::ScriptedPrompter;
    use crate::config::GeneratorLayout;
    use crate::model::Field;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn api_with(store: InMemoryStore, dir: &TempDir) -> PhonebookApi<InMemoryStore> {
        PhonebookApi::new(
            store,
            PhonebookConfig::default(),
            PhonebookPaths::under(dir.path()),
        )
    }

    #[test]
    fn identifiers_are_parsed_from_text() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(StoreFixture::new().with_records(3).store, &dir);

        assert_eq!(api.get_record(" 2 ").unwrap().listed_records[0].id, 2);
        assert!(matches!(
            api.delete_record("two"),
            Err(PhonebookError::Api(_))
        ));
        assert!(matches!(
            api.delete_record("-1"),
            Err(PhonebookError::Api(_))
        ));
        assert_eq!(api.delete_record("3").unwrap().affected_records[0].id, 3);
        assert_eq!(api.next_id().unwrap(), 4);
    }

    #[test]
    fn edit_takes_the_group_by_menu_number() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(StoreFixture::new().with_records(1).store, &dir);
        let mut prompter = ScriptedPrompter::new(["Acme"]);

        let result = api.edit_interactive(&mut prompter, "1", "2").unwrap();
        assert_eq!(result.affected_records[0].company, "Acme");
        assert_eq!(prompter.asked, vec![Field::Company]);
        assert!(api
            .edit_interactive(&mut prompter, "1", "7")
            .is_err());
    }

    #[test]
    fn update_fields_dispatches_to_the_store() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(StoreFixture::new().with_records(2).store, &dir);
        let mut fields = FieldMap::new();
        fields.insert(Field::MiddleName, "Olegovich".to_string());

        let result = api.update_fields("2", &fields).unwrap();
        assert_eq!(result.affected_records[0].middle_name, "Olegovich");
    }

    #[test]
    fn listing_and_search_return_pages() {
        let dir = TempDir::new().unwrap();
        let api = api_with(StoreFixture::new().with_records(11).store, &dir);

        let listed = api.list_records(PaginationState::new(0)).unwrap();
        assert_eq!(listed.listed_records.len(), 9);
        let found = api
            .search_records("company k", PaginationState::new(0))
            .unwrap();
        assert_eq!(found.total, 1);
    }

    #[test]
    fn generate_follows_the_configured_layout() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(InMemoryStore::new(), &dir);

        api.generate("4").unwrap();
        assert_eq!(api.list_records(PaginationState::new(0)).unwrap().total, 4);

        api.config(ConfigAction::Set(
            "generator-layout".into(),
            "without_id".into(),
        ))
        .unwrap();
        assert_eq!(api.config.generator_layout, GeneratorLayout::WithoutId);
        api.generate("2").unwrap();
        let listed = api.list_records(PaginationState::new(0)).unwrap();
        assert_eq!(listed.total, 4);
        assert_eq!(listed.messages.len(), 2);

        assert!(api.generate("lots").is_err());
    }

    #[test]
    fn first_id_change_applies_without_restart() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(InMemoryStore::new(), &dir);
        assert_eq!(api.next_id().unwrap(), 1);

        api.config(ConfigAction::Set("first-id".into(), "5".into()))
            .unwrap();
        assert_eq!(api.next_id().unwrap(), 5);
        api.add_record(NewRecord {
            first_name: "Anna".into(),
            last_name: "Smith".into(),
            middle_name: String::new(),
            company: "Acme".into(),
            work_phone: "84950000000".into(),
            personal_phone: "79120000000".into(),
        })
        .unwrap();
        let found = api.get_record("5").unwrap();
        assert_eq!(found.listed_records[0].first_name, "Anna");
    }
}
