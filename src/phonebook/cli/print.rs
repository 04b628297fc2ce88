use colored::Colorize;
use phonebook::api::{CmdMessage, MessageLevel};
use phonebook::config::PhonebookConfig;
use phonebook::model::{Field, Record};
use phonebook::pagination::PaginationState;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 36;
const COMPANY_WIDTH: usize = 20;
const PHONE_WIDTH: usize = 15;
const ID_MIN_WIDTH: usize = 3;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }
    for line in record_table(records) {
        println!("{}", line);
    }
}

pub(super) fn print_page(state: PaginationState, total: usize) {
    println!("{}", format!("Page {} ({} records)", state, total).dimmed());
}

pub(super) fn print_config(config: &PhonebookConfig) {
    for key in PhonebookConfig::KEYS {
        if let Ok(value) = config.get(key) {
            println!("{} = {}", key.bold(), value);
        }
    }
}

/// Lays records out in aligned columns, measuring display width rather than
/// bytes so Cyrillic names line up.
fn record_table(records: &[Record]) -> Vec<String> {
    let id_width = records
        .iter()
        .map(|r| r.id.to_string().width())
        .max()
        .unwrap_or(0)
        .max(ID_MIN_WIDTH);

    let header = [
        fit(Field::Id.label(), id_width),
        fit("Name", NAME_WIDTH),
        fit(Field::Company.label(), COMPANY_WIDTH),
        fit(Field::WorkPhone.label(), PHONE_WIDTH),
        Field::PersonalPhone.label().to_string(),
    ]
    .join("  ");

    let mut lines = vec![header.bold().to_string()];
    for record in records {
        let id = format!("{:>width$}", record.id, width = id_width);
        lines.push(format!(
            "{}  {}  {}  {}  {}",
            id.yellow(),
            fit(&record.full_name(), NAME_WIDTH),
            fit(&record.company, COMPANY_WIDTH),
            fit(&record.work_phone, PHONE_WIDTH),
            record.personal_phone
        ));
    }
    lines
}

/// Pads or truncates `s` to exactly `width` columns.
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        let padding = width - s.width();
        return format!("{}{}", s, " ".repeat(padding));
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    current_width += 1;
    result.push_str(&" ".repeat(width.saturating_sub(current_width)));
    result
}
