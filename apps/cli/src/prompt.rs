//! # Line Prompts
//!
//! Reads answers from any `BufRead` and writes prompts to any `Write`, so
//! the menu can be driven by stdin/stdout or by in-memory buffers in tests.
//!
//! Numeric prompts keep asking until they get something parseable. End of
//! input surfaces as [`PromptError::Closed`] from every prompt.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use stockroom_core::Money;

/// Prompt failures.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input reached end of file.
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

impl From<PromptError> for io::Error {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Closed => io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"),
            PromptError::Io(e) => e,
        }
    }
}

/// A question/answer channel over a reader and a writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Returns the writer, consuming the prompter.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line.
    pub fn say(&mut self, text: impl Display) -> PromptResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Asks a question and returns the trimmed answer.
    pub fn line(&mut self, prompt: &str) -> PromptResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(buf.trim().to_string())
    }

    /// Like [`line`](Self::line), but an empty answer is `None`.
    pub fn optional_line(&mut self, prompt: &str) -> PromptResult<Option<String>> {
        let answer = self.line(prompt)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Asks until the answer is an integer.
    pub fn integer(&mut self, prompt: &str) -> PromptResult<i64> {
        loop {
            match self.line(prompt)?.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("⚠ Please enter a valid integer.")?,
            }
        }
    }

    /// Asks until the answer is an integer or empty.
    pub fn optional_integer(&mut self, prompt: &str) -> PromptResult<Option<i64>> {
        loop {
            let answer = self.line(prompt)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("⚠ Please enter a valid integer, or press Enter to skip.")?,
            }
        }
    }

    /// Asks until the answer is a decimal amount.
    pub fn money(&mut self, prompt: &str) -> PromptResult<Money> {
        loop {
            match self.line(prompt)?.parse::<Money>() {
                Ok(value) => return Ok(value),
                Err(err) => self.say(format!("⚠ {err}"))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<String>, Vec<u8>> {
        Prompter::new(Cursor::new(input.to_string()), Vec::new())
    }

    fn output(p: Prompter<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn line_trims_and_writes_prompt() {
        let mut p = prompter("  hello  \n");
        assert_eq!(p.line("Name: ").unwrap(), "hello");
        assert_eq!(output(p), "Name: ");
    }

    #[test]
    fn optional_line_empty_is_none() {
        let mut p = prompter("\nx\n");
        assert_eq!(p.optional_line("? ").unwrap(), None);
        assert_eq!(p.optional_line("? ").unwrap(), Some("x".to_string()));
    }

    #[test]
    fn integer_retries_until_valid() {
        let mut p = prompter("abc\n1.5\n42\n");
        assert_eq!(p.integer("Qty: ").unwrap(), 42);

        let out = output(p);
        assert_eq!(out.matches("Please enter a valid integer").count(), 2);
        assert_eq!(out.matches("Qty: ").count(), 3);
    }

    #[test]
    fn optional_integer() {
        let mut p = prompter("\nx\n7\n");
        assert_eq!(p.optional_integer("Id: ").unwrap(), None);
        assert_eq!(p.optional_integer("Id: ").unwrap(), Some(7));
    }

    #[test]
    fn money_retries_on_bad_format() {
        let mut p = prompter("twelve\n1,5\n12.5\n");
        assert_eq!(p.money("Price: ").unwrap(), Money::from_cents(1250));

        let out = output(p);
        assert_eq!(out.matches("expected a number such as 12.50").count(), 2);
    }

    #[test]
    fn money_accepts_more_than_two_decimals() {
        let mut p = prompter("0.125\n");
        assert_eq!(p.money("Price: ").unwrap(), Money::from_cents(13));
        assert_eq!(output(p), "Price: ");
    }

    #[test]
    fn end_of_input_is_closed() {
        let mut p = prompter("");
        assert!(matches!(p.line("? "), Err(PromptError::Closed)));

        let mut p = prompter("abc\n");
        assert!(matches!(p.integer("? "), Err(PromptError::Closed)));
    }
}
