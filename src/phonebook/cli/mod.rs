//! # CLI Behavior
//!
//! This is one possible UI client for the phonebook, not the application
//! itself. It is the only place that reads stdin, writes to the terminal or
//! decides exit codes.
//!
//! ## Naked Execution (`phonebook`)
//!
//! Without a subcommand the interactive menu starts. Each screen clears the
//! terminal first; typing `q` leaves the current screen or, in the main
//! menu, the program.
//!
//! ## One-shot Subcommands
//!
//! `list`, `search`, `delete`, `generate` and `config` run a single
//! operation and exit. They print the same output the menu would.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and dispatch of subcommands
//! - `menu`: The interactive menu and the pager
//! - `print`: Tables and colored messages
//! - `prompt`: Reading answers from stdin
//! - `setup`: Argument parsing via clap

mod commands;
mod menu;
mod print;
mod prompt;
pub mod setup;

pub use commands::run;
