//! # Phonebook Architecture
//!
//! Phonebook is a personal contact register kept in a single `;`-delimited
//! text file. The core is a library; the interactive menu and the
//! subcommands of the binary are one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menu loop, prompts, paging keys, argument parsing        │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses typed identifiers and field group choices         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, paging, search and edit flows                │
//! │  - Returns CmdResult values, never prints                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Interactive Flows
//!
//! Adding and editing ask for one field at a time through the
//! [`commands::prompt::Prompter`] trait, so the same flows run against the
//! console and against scripted answers in tests. Typing `q` at any prompt
//! abandons the flow without writing.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user operation
//! - [`store`]: Storage abstraction, the file format and identifier assignment
//! - [`model`]: `Record`, `Field` and field groups
//! - [`validation`]: Name and phone number rules
//! - [`search`]: Free-text matching
//! - [`pagination`]: Fixed-size pages
//! - [`config`]: Configuration file
//! - [`init`]: Resolving directories and opening the data file
//! - [`logging`]: File logger setup for the binary
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod search;
pub mod store;
pub mod validation;
