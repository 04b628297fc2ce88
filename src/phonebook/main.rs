//! # Phonebook Binary
//!
//! The binary is thin: argument parsing, the interactive menu and terminal
//! output live in `cli/`, and this file only invokes `cli::run()` and turns
//! a failure into exit code 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        if e.is_storage_unavailable() {
            eprintln!("Pass an existing directory and a .csv file name with --file.");
        }
        std::process::exit(1);
    }
}
