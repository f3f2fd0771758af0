//! # Prompter
//!
//! Line-oriented input and output for the menus.
//!
//! Generic over the reader and writer so the whole console can be driven
//! from a `Cursor` in tests:
//!
//! ```rust,ignore
//! let mut prompter = Prompter::new(Cursor::new("2\nAmy\nsecret\n"), Vec::new());
//! ```
//!
//! Every parse failure re-prompts after printing [`INVALID_INPUT`]. End of
//! input surfaces as an [`ErrorKind::Input`](crate::error::ErrorKind) error.

use std::fmt::Display;
use std::io::{BufRead, Write};

use retail_core::validation::{keep_current, ValidationResult};

use crate::error::{AppError, AppResult};

/// Printed whenever a choice or field cannot be parsed.
pub const INVALID_INPUT: &str = "Your input is invalid!";

const CHOICE_PROMPT: &str = "Please make your choice: ";

/// Reads answers from `R` and writes prompts and reports to `W`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes a line.
    pub fn say(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Writes text as-is, without a trailing newline.
    pub fn write_raw(&mut self, text: &str) -> AppResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Prints `prompt` and reads one line without its line terminator.
    ///
    /// ## Errors
    /// `ErrorKind::Input` when the input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        self.write_raw(prompt)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(AppError::input_closed());
        }

        let trimmed_len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Reads a menu choice, re-prompting until it is a non-negative number.
    pub fn read_choice(&mut self) -> AppResult<u32> {
        loop {
            let line = self.read_line(CHOICE_PROMPT)?;
            match line.trim().parse::<u32>() {
                Ok(choice) => return Ok(choice),
                Err(_) => self.say(INVALID_INPUT)?,
            }
        }
    }

    /// Reads a field, re-prompting until `parse` accepts it.
    pub fn read_parsed<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> ValidationResult<T>,
    ) -> AppResult<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(format!("{} {}", INVALID_INPUT, e))?,
            }
        }
    }

    /// Reads a field where blank input keeps `current`.
    pub fn read_optional<T: Clone>(
        &mut self,
        prompt: &str,
        current: T,
        parse: impl Fn(&str) -> ValidationResult<T>,
    ) -> AppResult<T> {
        self.read_parsed(prompt, |line| keep_current(line, current.clone(), &parse))
    }
}
