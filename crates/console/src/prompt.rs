//! Line-oriented prompting with re-prompt on invalid input.

use core::str::FromStr;
use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::error::ConsoleError;

/// Reads answers from `input` after writing prompts to `output`.
///
/// Every reader loops until it gets an acceptable answer; the only way out
/// without a value is end-of-input ([`ConsoleError::InputClosed`]) or an
/// I/O failure.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Integer within `min..=max`.
    pub fn read_int(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64, ConsoleError> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => writeln!(self.output, "Enter a number between {min} and {max}.")?,
            }
        }
    }

    /// Decimal amount; a comma is accepted as the decimal separator.
    pub fn read_money(&mut self, prompt: &str) -> Result<Decimal, ConsoleError> {
        loop {
            let line = self.read_line(prompt)?.replace(',', ".");
            match Decimal::from_str(&line) {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Enter a valid amount (e.g. 19990.50).")?,
            }
        }
    }

    /// Trimmed text. When `required`, blank answers are refused.
    pub fn read_text(&mut self, prompt: &str, required: bool) -> Result<String, ConsoleError> {
        loop {
            let line = self.read_line(prompt)?;
            if !required || !line.is_empty() {
                return Ok(line);
            }
            writeln!(self.output, "This field is required.")?;
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(line.trim().to_owned())
    }
}
