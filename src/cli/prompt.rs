//! Interactive option chooser backed by an injectable line source.

use std::io::{self, BufRead, Write};

use crate::lib::errors::PromptError;

/// Source of user input lines. Injectable so the chooser can be driven by
/// tests or piped input instead of a live console.
pub trait LineSource {
    /// Return the next line without its trailing newline, or `None` on EOF.
    fn next_line(&mut self) -> Result<Option<String>, PromptError>;
}

/// Reads lines from process stdin.
#[derive(Debug, Default)]
pub struct StdinLineSource;

impl LineSource for StdinLineSource {
    fn next_line(&mut self) -> Result<Option<String>, PromptError> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|err| PromptError::Read {
                message: err.to_string(),
            })?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Replays a fixed sequence of lines, then signals EOF.
#[derive(Debug)]
pub struct ScriptedLineSource {
    lines: std::vec::IntoIter<String>,
}

impl ScriptedLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineSource for ScriptedLineSource {
    fn next_line(&mut self) -> Result<Option<String>, PromptError> {
        Ok(self.lines.next())
    }
}

/// Present a 1-based numbered menu and read selections until one is valid.
///
/// Non-numeric and out-of-range input re-prompt; end of input is
/// `PromptError::InputClosed` rather than an unbounded loop.
pub fn choose<'a>(
    options: &'a [String],
    prompt: &str,
    lines: &mut dyn LineSource,
) -> Result<&'a str, PromptError> {
    if options.is_empty() {
        return Err(PromptError::NoOptions);
    }

    println!("{prompt}");
    for (index, option) in options.iter().enumerate() {
        println!("{}. {}", index + 1, option);
    }

    loop {
        print!("Select an option (by number): ");
        let _ = io::stdout().flush();
        let Some(line) = lines.next_line()? else {
            return Err(PromptError::InputClosed);
        };
        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=options.len()).contains(&choice) => {
                return Ok(&options[choice - 1]);
            }
            Ok(_) => println!("Invalid choice. Please choose a valid number."),
            Err(_) => println!("Please enter a valid number."),
        }
    }
}
