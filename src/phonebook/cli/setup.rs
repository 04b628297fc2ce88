use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phonebook", bin_name = "phonebook", version)]
#[command(about = "Personal phonebook kept in a ;-delimited file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Phonebook file to use; must end in .csv and sit in an existing directory
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records, nine per page
    #[command(alias = "ls")]
    List {
        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show records containing every search term
    Search {
        /// Terms to match against any field
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Delete a record by identifier
    #[command(alias = "rm")]
    Delete {
        /// Identifier of the record
        id: String,
    },

    /// Append sample records
    Generate {
        /// Number of records to create
        count: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (first-id, generator-layout, log-level)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["phonebook", "-f", "book.csv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("book.csv")));
    }

    #[test]
    fn file_flag_works_after_the_subcommand() {
        let args = ["phonebook", "search", "acme", "7123", "--file", "b.csv"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Search { terms, page }) => {
                assert_eq!(terms, vec!["acme", "7123"]);
                assert_eq!(page, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.file, Some(PathBuf::from("b.csv")));
    }

    #[test]
    fn search_needs_a_term() {
        assert!(Cli::try_parse_from(["phonebook", "search"]).is_err());
    }
}
