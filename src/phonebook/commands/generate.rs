//! Bulk creation of sample records.
//!
//! Names are picked from fixed word lists so that every generated value
//! passes the same validation as typed input; the same count always yields
//! the same rows.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::GeneratorLayout;
use crate::error::{PhonebookError, Result};
use crate::model::NewRecord;
use crate::store::DataStore;
use log::info;

pub const MAX_COUNT: usize = 10_000;

const FIRST_NAMES: [&str; 8] = [
    "Anna", "Boris", "Vera", "Gleb", "Darya", "Egor", "Zoya", "Ilya",
];
const LAST_NAMES: [&str; 6] = ["Ivanov", "Petrov", "Sidorov", "Smirnov", "Orlov", "Volkov"];
const MIDDLE_NAMES: [&str; 4] = ["", "Sergeevich", "Pavlovich", "Olegovich"];
const COMPANIES: [&str; 5] = ["Acme", "Globex", "Initech", "Umbrella", "Stark Industries"];

/// The `index`-th sample record.
pub fn sample(index: usize) -> NewRecord {
    NewRecord {
        first_name: FIRST_NAMES[index % FIRST_NAMES.len()].to_string(),
        last_name: LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()].to_string(),
        middle_name: MIDDLE_NAMES[index % MIDDLE_NAMES.len()].to_string(),
        company: COMPANIES[index % COMPANIES.len()].to_string(),
        work_phone: format!("8495{:07}", index % 10_000_000),
        personal_phone: format!("7900{:07}", index % 10_000_000),
    }
}

pub fn run<S: DataStore>(
    store: &mut S,
    count: usize,
    layout: GeneratorLayout,
) -> Result<CmdResult> {
    if count > MAX_COUNT {
        return Err(PhonebookError::Api(format!(
            "Cannot generate {} records at once (at most {})",
            count, MAX_COUNT
        )));
    }

    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::info("Nothing to generate."));
        return Ok(result);
    }

    let mut created = Vec::new();
    for index in 0..count {
        match layout {
            GeneratorLayout::WithId => created.push(store.insert(sample(index))?),
            GeneratorLayout::WithoutId => store.append_unnumbered(&sample(index))?,
        }
    }
    info!("event=generate count={} layout={}", count, layout);

    match layout {
        GeneratorLayout::WithId => result.add_message(CmdMessage::success(format!(
            "Generated {} records.",
            count
        ))),
        GeneratorLayout::WithoutId => result.add_message(CmdMessage::warning(format!(
            "Generated {} rows without identifiers; they will be skipped when reading.",
            count
        ))),
    }
    Ok(result.with_affected_records(created))
}
