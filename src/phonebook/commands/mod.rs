use crate::config::PhonebookConfig;
use crate::model::Record;
use crate::pagination::PaginationState;
use crate::store::MalformedRow;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod get;
pub mod list;
pub mod prompt;
pub mod search;

/// Where the phonebook keeps its own files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookPaths {
    /// Holds the default data file
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PhonebookPaths {
    /// All three directories under one root, as `PHONEBOOK_HOME` lays them out.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            config_dir: root.join("config"),
            log_dir: root.join("logs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created, changed or removed by the command
    pub affected_records: Vec<Record>,
    /// The page of records to show
    pub listed_records: Vec<Record>,
    /// Number of records the listing was paged from
    pub total: usize,
    pub page: Option<PaginationState>,
    pub config: Option<PhonebookConfig>,
    /// The user quit an interactive flow; nothing was written
    pub cancelled: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn cancelled() -> Self {
        let mut result = Self {
            cancelled: true,
            ..Self::default()
        };
        result.add_message(CmdMessage::info("Cancelled, nothing was saved."));
        result
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_config(mut self, config: PhonebookConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Shows the page of `records` that `state` points at, after fitting the
    /// state to the number of records.
    pub fn with_page(mut self, records: &[Record], state: PaginationState) -> Self {
        let state = state.with_total(records.len());
        self.listed_records = state.slice(records).to_vec();
        self.total = records.len();
        self.page = Some(state);
        self
    }

    pub fn with_malformed_rows(mut self, rows: &[MalformedRow]) -> Self {
        for row in rows {
            self.add_message(CmdMessage::warning(format!(
                "Skipped line {}: {}",
                row.line, row.reason
            )));
        }
        self
    }
}
