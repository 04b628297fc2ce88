use colored::Colorize;
use phonebook::commands::prompt::{Answer, Prompter, QUIT_TOKEN};
use phonebook::error::Result;
use phonebook::model::Field;
use phonebook::validation::ValidationError;
use std::io::{BufRead, Write};

/// Reads one line from `input`. `None` means the input is exhausted.
pub(super) fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prints `label` without a newline and reads the answer.
pub(super) fn ask_line<R: BufRead>(input: &mut R, label: &str) -> Result<Answer> {
    print!("{} > ", label);
    std::io::stdout().flush()?;
    Ok(match read_line(input)? {
        Some(line) => Answer::from_input(&line),
        None => Answer::Quit,
    })
}

pub(super) struct ConsolePrompter<'a, R: BufRead> {
    input: &'a mut R,
}

impl<'a, R: BufRead> ConsolePrompter<'a, R> {
    pub(super) fn new(input: &'a mut R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompter for ConsolePrompter<'_, R> {
    fn ask(&mut self, field: Field, current: Option<&str>) -> Result<Answer> {
        let label = match current {
            Some(current) if current.is_empty() => format!("{} (empty)", field.label()),
            Some(current) => format!("{} [{}]", field.label(), current),
            None => field.label().to_string(),
        };
        ask_line(&mut *self.input, &label)
    }

    fn rejected(&mut self, field: Field, error: &ValidationError) {
        println!(
            "{}",
            format!("Invalid {}: {}. Try again or type {} to cancel.", field, error, QUIT_TOKEN)
                .red()
        );
    }
}
