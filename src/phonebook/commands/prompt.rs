//! The seam between interactive commands and whatever asks the user.
//!
//! Commands that collect field values ask a [`Prompter`] for one field at a
//! time. The console implements it by reading lines from stdin; tests use
//! [`ScriptedPrompter`].

use crate::error::Result;
use crate::model::Field;
use crate::validation::ValidationError;

/// Typing this at any prompt abandons the current flow.
pub const QUIT_TOKEN: &str = "q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Quit,
}

impl Answer {
    pub fn from_input(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim() == QUIT_TOKEN {
            Answer::Quit
        } else {
            Answer::Text(line.to_string())
        }
    }
}

pub trait Prompter {
    /// Ask for a value of `field`. `current` holds the existing value when
    /// an existing record is being edited.
    fn ask(&mut self, field: Field, current: Option<&str>) -> Result<Answer>;

    /// Report a rejected answer; the same field is asked again afterwards.
    fn rejected(&mut self, field: Field, error: &ValidationError);
}

#[cfg(any(test, feature = "test_utils"))]
pub use scripted::ScriptedPrompter;

#[cfg(any(test, feature = "test_utils"))]
mod scripted {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers. Runs out into [`Answer::Quit`].
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub asked: Vec<Field>,
        pub rejections: Vec<(Field, ValidationError)>,
    }

    impl ScriptedPrompter {
        pub fn new<I, S>(inputs: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: AsRef<str>,
        {
            Self {
                answers: inputs
                    .into_iter()
                    .map(|s| Answer::from_input(s.as_ref()))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, field: Field, _current: Option<&str>) -> Result<Answer> {
            self.asked.push(field);
            Ok(self.answers.pop_front().unwrap_or(Answer::Quit))
        }

        fn rejected(&mut self, field: Field, error: &ValidationError) {
            self.rejections.push((field, error.clone()));
        }
    }
}
