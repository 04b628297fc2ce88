use crate::api::{PhonebookApi, PhonebookPaths};
use crate::config::PhonebookConfig;
use crate::error::{PhonebookError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use log::warn;
use std::fs;
use std::path::PathBuf;

/// Overrides the platform directories; everything lives under this one root.
pub const HOME_ENV: &str = "PHONEBOOK_HOME";
pub const DEFAULT_FILE_NAME: &str = "phonebook_data.csv";

pub struct PhonebookContext {
    pub api: PhonebookApi<FileStore>,
    pub config: PhonebookConfig,
    /// The data file in use
    pub file: PathBuf,
}

pub fn resolve_paths() -> Result<PhonebookPaths> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PhonebookPaths::under(home));
    }

    let dirs = ProjectDirs::from("com", "phonebook", "phonebook").ok_or_else(|| {
        PhonebookError::Api("Could not determine the home directory".to_string())
    })?;
    Ok(PhonebookPaths {
        data_dir: dirs.data_dir().to_path_buf(),
        config_dir: dirs.config_dir().to_path_buf(),
        log_dir: dirs.data_dir().join("logs"),
    })
}

/// Opens the data file and wires up the API.
///
/// A user-supplied `file` must already sit in an existing directory. Without
/// one the default file in the data directory is used, and that directory is
/// created when missing.
pub fn initialize(file: Option<PathBuf>) -> Result<PhonebookContext> {
    let paths = resolve_paths()?;
    initialize_with(paths, file)
}

pub fn initialize_with(paths: PhonebookPaths, file: Option<PathBuf>) -> Result<PhonebookContext> {
    let config = PhonebookConfig::load(&paths.config_dir).unwrap_or_else(|e| {
        warn!("event=config_unreadable error={}", e);
        PhonebookConfig::default()
    });

    let file = match file {
        Some(file) => file,
        None => {
            fs::create_dir_all(&paths.data_dir)?;
            paths.data_dir.join(DEFAULT_FILE_NAME)
        }
    };

    let store = FileStore::open(&file)?.with_first_id(config.first_id);
    let api = PhonebookApi::new(store, config.clone(), paths);

    Ok(PhonebookContext { api, config, file })
}
