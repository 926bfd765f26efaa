//! Line-oriented console I/O and the prompt helpers every menu uses.
//!
//! All helpers return `Ok(None)` once input is exhausted, so callers unwind
//! with `let Some(..) = ... else { return Ok(()) }` and the enclosing menu
//! loop ends on its next read.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use baklay_core::CoreResult;

use crate::error::AppResult;

pub trait Console {
    /// One line without its trailing newline, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    fn println(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }
}

/// Process stdin/stdout
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        read_lossy_line(&mut self.stdin.lock())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

/// Reads one line as bytes. Invalid UTF-8 is replaced rather than failing, so
/// it reaches the prompts as ordinary bad input.
pub fn read_lossy_line<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Queued input lines and captured output, for driving menus in tests.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: String,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let line = self.input.pop_front();
        if let Some(line) = &line {
            // Echo so captured output reads like a terminal session
            self.output.push_str(line);
            self.output.push('\n');
        }
        Ok(line)
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}

pub fn prompt(console: &mut dyn Console, label: &str) -> AppResult<Option<String>> {
    console.write(label)?;
    Ok(console.read_line()?)
}

/// Re-prompts until the input parses as an integer.
pub fn prompt_int(console: &mut dyn Console, label: &str) -> AppResult<Option<i64>> {
    loop {
        let Some(line) = prompt(console, label)? else {
            return Ok(None);
        };
        match line.trim().parse::<i64>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => console.println("Invalid input. Please enter a number.")?,
        }
    }
}

/// Like [`prompt_int`], but a blank line yields `Some(None)`.
pub fn prompt_optional_int(
    console: &mut dyn Console,
    label: &str,
) -> AppResult<Option<Option<i64>>> {
    loop {
        let Some(line) = prompt(console, label)? else {
            return Ok(None);
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Some(None));
        }
        match trimmed.parse::<i64>() {
            Ok(value) => return Ok(Some(Some(value))),
            Err(_) => console.println("Invalid input. Please enter a number or leave blank.")?,
        }
    }
}

/// Re-prompts with the validator's message until it accepts the input.
pub fn prompt_validated<T, F>(console: &mut dyn Console, label: &str, validate: F) -> AppResult<Option<T>>
where
    F: Fn(&str) -> CoreResult<T>,
{
    loop {
        let Some(line) = prompt(console, label)? else {
            return Ok(None);
        };
        match validate(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => console.println(&e.to_string())?,
        }
    }
}

/// Integer prompt with a range check on top of the parse.
pub fn prompt_int_validated<T, F>(
    console: &mut dyn Console,
    label: &str,
    validate: F,
) -> AppResult<Option<T>>
where
    F: Fn(i64) -> CoreResult<T>,
{
    loop {
        let Some(value) = prompt_int(console, label)? else {
            return Ok(None);
        };
        match validate(value) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => console.println(&e.to_string())?,
        }
    }
}
