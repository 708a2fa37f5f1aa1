//! Operator input.
//!
//! Every menu waits here; this is the only place the console suspends.

#[cfg(test)]
use std::collections::VecDeque;
use std::error::Error;

use dialoguer::{Input, Select};

pub trait Prompt {
    /// Show a list and return the index the operator picked.
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize, Box<dyn Error>>;

    /// Read one line of text. Empty input is allowed.
    fn input(&mut self, label: &str) -> Result<String, Box<dyn Error>>;

    /// Block until the operator presses enter.
    fn pause(&mut self) -> Result<(), Box<dyn Error>>;
}

/// Interactive terminal prompts.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize, Box<dyn Error>> {
        let choice = Select::new()
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact()?;
        Ok(choice)
    }

    fn input(&mut self, label: &str) -> Result<String, Box<dyn Error>> {
        let value = Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn pause(&mut self) -> Result<(), Box<dyn Error>> {
        Input::<String>::new()
            .with_prompt("Press enter to continue")
            .allow_empty(true)
            .interact_text()?;
        Ok(())
    }
}

/// One pre-recorded operator answer.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Pick the first item whose label starts with this text.
    Pick(&'static str),
    Text(&'static str),
}

/// Prompt that replays a fixed list of answers. Pauses consume nothing.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    pub shown: Vec<String>,
    pub pauses: usize,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            shown: Vec::new(),
            pauses: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, title: &str) -> Result<Answer, Box<dyn Error>> {
        self.shown.push(title.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| format!("no scripted answer left for '{}'", title).into())
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize, Box<dyn Error>> {
        match self.next(title)? {
            Answer::Pick(prefix) => items
                .iter()
                .position(|item| item.starts_with(prefix))
                .ok_or_else(|| {
                    format!("'{}' not offered in '{}': {:?}", prefix, title, items).into()
                }),
            Answer::Text(text) => {
                Err(format!("expected a choice for '{}', got text '{}'", title, text).into())
            }
        }
    }

    fn input(&mut self, label: &str) -> Result<String, Box<dyn Error>> {
        match self.next(label)? {
            Answer::Text(text) => Ok(text.to_string()),
            Answer::Pick(prefix) => {
                Err(format!("expected text for '{}', got choice '{}'", label, prefix).into())
            }
        }
    }

    fn pause(&mut self) -> Result<(), Box<dyn Error>> {
        self.pauses += 1;
        Ok(())
    }
}
