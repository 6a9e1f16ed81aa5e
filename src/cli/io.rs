//! Console I/O for the interactive menu
//!
//! Prompts go to the output without a newline and are flushed before reading.
//! Generic over the reader and writer so whole sessions can run against
//! in-memory buffers.

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::db::ResultSet;
use crate::hospital::validation;

use super::errors::{CliError, CliResult};

/// Line-oriented console
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console over the process stdin and stdout
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its terminator. End of input is an error.
    pub fn read_line(&mut self) -> CliResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::input_closed());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Write text as-is and flush
    pub fn say(&mut self, text: &str) -> CliResult<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Write text followed by a newline
    pub fn line(&mut self, text: &str) -> CliResult<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    pub fn prompt(&mut self, text: &str) -> CliResult<String> {
        self.say(text)?;
        self.read_line()
    }

    /// Ask until `validate` accepts the answer, echoing each rejection
    pub fn prompt_valid<T, E, F>(&mut self, text: &str, validate: F) -> CliResult<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let answer = self.prompt(text)?;
            match validate(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.line(&format!("Invalid input! {}", e))?,
            }
        }
    }

    /// Yes/no question; anything but `y`/`yes` is no
    pub fn confirm(&mut self, text: &str) -> CliResult<bool> {
        let answer = self.prompt(text)?;
        Ok(validation::yes(&answer))
    }

    /// Print a result set in tabular text form
    pub fn show(&mut self, rows: &ResultSet) -> CliResult<()> {
        self.say(&rows.to_string())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}
