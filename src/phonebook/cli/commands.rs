//! Context setup and dispatch.
//!
//! Start-up failures (an unusable file path, an unreadable home directory)
//! and failed one-shot subcommands are returned to `main`, which exits with
//! code 1. The interactive menu handles its own errors.

use super::menu::run_menu;
use super::print::{print_config, print_messages, print_page, print_records};
use super::setup::{Cli, Commands};
use clap::Parser;
use colored::Colorize;
use phonebook::api::{CmdResult, ConfigAction, PhonebookApi};
use phonebook::error::Result;
use phonebook::init::initialize;
use phonebook::logging::{init_logging, logging_status};
use phonebook::pagination::PaginationState;
use phonebook::store::fs::FileStore;

struct AppContext {
    api: PhonebookApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { page }) => handle_list(&mut ctx, page),
        Some(Commands::Search { terms, page }) => handle_search(&mut ctx, terms, page),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::Generate { count }) => handle_generate(&mut ctx, count),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => run_menu(&mut ctx.api, &mut std::io::stdin().lock()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.file.clone())?;

    if let Err(e) = init_logging(&ctx.config.log_level, &ctx.api.paths().log_dir) {
        eprintln!("{}", format!("Warning: logging disabled: {}", e).yellow());
    }
    log::debug!("event=context_ready file={}", ctx.file.display());

    Ok(AppContext { api: ctx.api })
}

/// A state pointing at `page`; listing clamps it to the pages that exist.
fn page_state(page: usize) -> PaginationState {
    PaginationState {
        page: page.max(1),
        pages: page.max(1),
    }
}

fn print_listing(result: &CmdResult) {
    print_messages(&result.messages);
    print_records(&result.listed_records);
    if let Some(state) = result.page {
        print_page(state, result.total);
    }
}

fn handle_list(ctx: &mut AppContext, page: usize) -> Result<()> {
    let result = ctx.api.list_records(page_state(page))?;
    print_listing(&result);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, terms: Vec<String>, page: usize) -> Result<()> {
    let result = ctx.api.search_records(&terms.join(" "), page_state(page))?;
    print_listing(&result);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: String) -> Result<()> {
    let result = ctx.api.delete_record(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_generate(ctx: &mut AppContext, count: String) -> Result<()> {
    let result = ctx.api.generate(&count)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let showing_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    print_messages(&result.messages);
    if showing_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
        if let Some((level, dir)) = logging_status() {
            println!("Logging at {} to {}", level, dir.display());
        }
    }
    Ok(())
}
