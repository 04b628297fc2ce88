use crate::model::Field;
use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhonebookError {
    #[error("Record not found: {0}")]
    RecordNotFound(u64),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Not a .csv file: {0}")]
    InvalidExtension(PathBuf),

    #[error("Invalid {field}: {source}")]
    InvalidField {
        field: Field,
        #[source]
        source: ValidationError,
    },

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl PhonebookError {
    /// Errors that mean the backing file cannot be used at all.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(
            self,
            PhonebookError::DirectoryNotFound(_)
                | PhonebookError::InvalidExtension(_)
                | PhonebookError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PhonebookError>;
