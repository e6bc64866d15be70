// src/menu/prompt.rs

use dialoguer::{Error as DialoguerError, Select, theme::ColorfulTheme};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("User Interface Error: {0}")]
    Dialoguer(#[from] DialoguerError),
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),
    #[error("There is nothing to choose from.")]
    EmptyMenu,
    #[error("Selection cancelled by user.")]
    Cancelled,
}

/// A user-facing chooser for menu items.
///
/// Implementations present `items` however they like and resolve to the
/// index of the chosen one. Cancellation (Esc, EOF) is reported as
/// [`PromptError::Cancelled`] so callers can unwind quietly.
pub trait Prompt {
    fn choose_one(&self, title: &str, items: &[String]) -> Result<usize, PromptError>;
}

/// Arrow-key selection backed by dialoguer.
#[derive(Debug, Default)]
pub struct SelectPrompt;

impl Prompt for SelectPrompt {
    fn choose_one(&self, title: &str, items: &[String]) -> Result<usize, PromptError> {
        if items.is_empty() {
            return Err(PromptError::EmptyMenu);
        }
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact_opt()?
            .ok_or(PromptError::Cancelled)
    }
}

/// Plain line-oriented prompt: prints numbered choices and reads stdin
/// until a valid number or item name is typed. EOF counts as cancellation.
#[derive(Debug)]
pub struct LinePrompt {
    question: String,
    answer_prompt: String,
}

impl LinePrompt {
    pub fn new(question: impl Into<String>, answer_prompt: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer_prompt: answer_prompt.into(),
        }
    }
}

impl Default for LinePrompt {
    fn default() -> Self {
        Self::new("Please select one of the following:", "Your choice: ")
    }
}

impl Prompt for LinePrompt {
    fn choose_one(&self, title: &str, items: &[String]) -> Result<usize, PromptError> {
        if items.is_empty() {
            return Err(PromptError::EmptyMenu);
        }

        let stdin = io::stdin();
        loop {
            println!("[{}] {}", title, self.question);
            for (index, item) in items.iter().enumerate() {
                println!("  {}) {}", index + 1, item);
            }
            print!("{}", self.answer_prompt);
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                return Err(PromptError::Cancelled);
            }
            let choice = line.trim();

            if let Ok(number) = choice.parse::<usize>()
                && (1..=items.len()).contains(&number)
            {
                return Ok(number - 1);
            }
            if let Some(index) = items.iter().position(|item| item == choice) {
                return Ok(index);
            }
            println!("'{}' is not a valid choice.", choice);
        }
    }
}

// MARK: --- UNIT TESTS ---
