use super::print::{print_messages, print_page, print_records};
use super::prompt::{ask_line, read_line, ConsolePrompter};
use colored::Colorize;
use console::Term;
use phonebook::api::{CmdMessage, CmdResult, PhonebookApi};
use phonebook::commands::prompt::{Answer, QUIT_TOKEN};
use phonebook::error::{PhonebookError, Result};
use phonebook::pagination::PaginationState;
use phonebook::store::DataStore;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MenuCommand {
    Add,
    Delete,
    Edit,
    List,
    Search,
    Generate,
    Quit,
}

impl MenuCommand {
    const ALL: [MenuCommand; 7] = [
        MenuCommand::Add,
        MenuCommand::Delete,
        MenuCommand::Edit,
        MenuCommand::List,
        MenuCommand::Search,
        MenuCommand::Generate,
        MenuCommand::Quit,
    ];

    fn key(&self) -> &'static str {
        match self {
            MenuCommand::Add => "1",
            MenuCommand::Delete => "2",
            MenuCommand::Edit => "3",
            MenuCommand::List => "4",
            MenuCommand::Search => "5",
            MenuCommand::Generate => "6",
            MenuCommand::Quit => QUIT_TOKEN,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MenuCommand::Add => "Add a record",
            MenuCommand::Delete => "Delete a record",
            MenuCommand::Edit => "Edit a record",
            MenuCommand::List => "Show all records",
            MenuCommand::Search => "Search records",
            MenuCommand::Generate => "Generate sample records",
            MenuCommand::Quit => "Quit",
        }
    }
}

impl std::str::FromStr for MenuCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        MenuCommand::ALL
            .into_iter()
            .find(|command| command.key() == s)
            .ok_or_else(|| format!("'{}' is not a menu item, pick one of the listed keys", s))
    }
}

/// Keys understood while paging through records. A number picks the
/// record with that identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKey {
    Next,
    Prev,
    Select(u64),
    Leave,
}

impl PageKey {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "n" | ">" => Some(PageKey::Next),
            "p" | "<" => Some(PageKey::Prev),
            QUIT_TOKEN => Some(PageKey::Leave),
            other if !other.is_empty() && other.bytes().all(|b| b.is_ascii_digit()) => {
                other.parse().ok().map(PageKey::Select)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerExit {
    Left,
    Selected(u64),
}

/// What a pager lists.
#[derive(Debug, Clone, Copy)]
enum Listing<'a> {
    All,
    Search(&'a str),
}

fn clear_screen() {
    let term = Term::stdout();
    if term.is_term() {
        let _ = term.clear_screen();
    }
}

/// Runs the interactive menu until the user quits or the input ends.
///
/// Every failure inside a screen is shown on the next menu screen; none of
/// them ends the loop.
pub(super) fn run_menu<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
) -> Result<()> {
    let mut notices: Vec<CmdMessage> = Vec::new();

    loop {
        clear_screen();
        print_messages(&notices);
        for command in MenuCommand::ALL {
            println!("{}. {}", command.key().bold(), command.label());
        }

        let Some(line) = read_line(input)? else {
            break;
        };
        let command = match line.parse::<MenuCommand>() {
            Ok(command) => command,
            Err(e) => {
                notices = vec![CmdMessage::error(e)];
                continue;
            }
        };

        let outcome = match command {
            MenuCommand::Quit => break,
            MenuCommand::Add => add(api, input),
            MenuCommand::Delete => delete(api, input),
            MenuCommand::Edit => edit(api, input),
            MenuCommand::List => browse(api, input, "All records", Listing::All),
            MenuCommand::Search => search(api, input),
            MenuCommand::Generate => generate(api, input),
        };
        notices = match outcome {
            Ok(messages) => messages,
            Err(e) => vec![error_message(&e)],
        };
    }

    println!("Goodbye!");
    Ok(())
}

fn error_message(e: &PhonebookError) -> CmdMessage {
    match e {
        PhonebookError::RecordNotFound(_)
        | PhonebookError::EmptyQuery
        | PhonebookError::InvalidField { .. } => CmdMessage::warning(e.to_string()),
        _ => CmdMessage::error(e.to_string()),
    }
}

fn intro(title: &str, lines: &[&str]) {
    clear_screen();
    println!("{}", format!("-- {} --", title).bold());
    println!("Type {} to return to the main menu", QUIT_TOKEN);
    for line in lines {
        println!("{}", line);
    }
    println!();
}

fn add<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
) -> Result<Vec<CmdMessage>> {
    intro(
        "Add a record",
        &[
            "Names may hold letters, spaces, hyphens and double quotes",
            "Numbers must start with +, 7 or 8",
        ],
    );
    let result = api.add_interactive(&mut ConsolePrompter::new(input))?;
    Ok(result.messages)
}

fn delete<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
) -> Result<Vec<CmdMessage>> {
    intro("Delete a record", &[]);
    let Answer::Text(id) = ask_line(input, "Record id")? else {
        return Ok(CmdResult::cancelled().messages);
    };
    Ok(api.delete_record(&id)?.messages)
}

fn edit<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
) -> Result<Vec<CmdMessage>> {
    intro("Edit a record", &[]);
    let Answer::Text(id) = ask_line(input, "Record id")? else {
        return Ok(CmdResult::cancelled().messages);
    };
    let found = api.get_record(&id)?;
    print_records(&found.listed_records);
    println!();
    edit_record(api, input, &id)
}

/// Asks for a field group and edits it on the record `id`, which the
/// caller has already shown.
fn edit_record<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
    id: &str,
) -> Result<Vec<CmdMessage>> {
    println!("1. Name  2. Company  3. Phone numbers");
    println!("{}", "An empty answer keeps the current name or number".dimmed());

    let Answer::Text(group) = ask_line(input, "Fields to edit")? else {
        return Ok(CmdResult::cancelled().messages);
    };
    let result = api.edit_interactive(&mut ConsolePrompter::new(input), id, &group)?;
    Ok(result.messages)
}

fn search<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
) -> Result<Vec<CmdMessage>> {
    intro("Search records", &["Every word must appear in some field of the record"]);
    let Answer::Text(query) = ask_line(input, "Search")? else {
        return Ok(Vec::new());
    };
    // Reject a blank query before opening the pager.
    api.search_records(&query, PaginationState::new(0))?;
    let title = format!("Search: {}", query.trim());
    browse(api, input, &title, Listing::Search(&query))
}

fn generate<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
) -> Result<Vec<CmdMessage>> {
    intro("Generate sample records", &[]);
    loop {
        let Answer::Text(count) = ask_line(input, "Number of records")? else {
            return Ok(Vec::new());
        };
        match api.generate(&count) {
            Ok(result) => return Ok(result.messages),
            Err(e) => print_messages(&[error_message(&e)]),
        }
    }
}

/// Pages through `listing`. Picking a record by its number opens it for
/// editing or deletion and then returns to the main menu.
fn browse<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
    title: &str,
    listing: Listing<'_>,
) -> Result<Vec<CmdMessage>> {
    let exit = page_through(input, title, |state| match listing {
        Listing::All => api.list_records(state),
        Listing::Search(query) => api.search_records(query, state),
    })?;
    match exit {
        PagerExit::Left => Ok(Vec::new()),
        PagerExit::Selected(id) => record_action(api, input, id),
    }
}

fn record_action<S: DataStore, R: BufRead>(
    api: &mut PhonebookApi<S>,
    input: &mut R,
    id: u64,
) -> Result<Vec<CmdMessage>> {
    let id = id.to_string();
    let found = api.get_record(&id)?;
    clear_screen();
    print_records(&found.listed_records);
    println!();
    println!("1. Edit  2. Delete");
    loop {
        let Answer::Text(choice) = ask_line(input, "Action")? else {
            return Ok(CmdResult::cancelled().messages);
        };
        match choice.trim() {
            "1" => return edit_record(api, input, &id),
            "2" => return Ok(api.delete_record(&id)?.messages),
            other => print_messages(&[CmdMessage::warning(format!(
                "'{}' is not an action, type 1 or 2",
                other
            ))]),
        }
    }
}

/// Shows one page at a time until the user leaves or picks a record. The
/// page state is refitted on every fetch, so it stays valid if the record
/// count changes.
fn page_through<R, F>(input: &mut R, title: &str, mut fetch: F) -> Result<PagerExit>
where
    R: BufRead,
    F: FnMut(PaginationState) -> Result<CmdResult>,
{
    let mut state = PaginationState::new(0);
    loop {
        let result = fetch(state)?;
        state = result.page.unwrap_or(state);

        clear_screen();
        println!("{}", format!("-- {} --", title).bold());
        let mut keys = Vec::new();
        if !state.is_last() {
            keys.push("n or > for the next page");
        }
        if !state.is_first() {
            keys.push("p or < for the previous page");
        }
        keys.push("a record id to edit or delete it");
        keys.push("q to return");
        println!("Type {}", keys.join(", "));
        println!();
        print_messages(&result.messages);
        print_records(&result.listed_records);
        println!();
        print_page(state, result.total);

        let Some(line) = read_line(input)? else {
            return Ok(PagerExit::Left);
        };
        match PageKey::parse(&line) {
            Some(PageKey::Next) => state = state.next(),
            Some(PageKey::Prev) => state = state.prev(),
            Some(PageKey::Select(id)) => return Ok(PagerExit::Selected(id)),
            Some(PageKey::Leave) => return Ok(PagerExit::Left),
            None => {}
        }
    }
}
