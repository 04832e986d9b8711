// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Console module - the single interactive input/output pair
//!
//! One `Console` is created at startup and lent by `&mut` to every component
//! that prompts, so the whole session shares one read cursor.

use std::io::{BufRead, Write};

use tracing::trace;

use crate::error::{Error, Result};

/// Affirmative answer recognised by every yes/no prompt (case-insensitive)
pub const AFFIRMATIVE: &str = "S";

/// Width of the separator lines printed between sections
pub const SEPARATOR_WIDTH: usize = 80;

/// Line-oriented console over any buffered reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line with trailing whitespace removed
    ///
    /// Bytes that are not UTF-8 become `U+FFFD` so the caller's own
    /// validation decides whether to re-prompt.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .map_err(Error::Console)?;
        if read == 0 {
            return Err(Error::InputClosed);
        }
        let answer = String::from_utf8_lossy(&line).trim_end().to_string();
        trace!(answer = %answer, "console input");
        Ok(answer)
    }

    /// Print `text` without a newline and read the answer
    pub fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text).map_err(Error::Console)?;
        self.output.flush().map_err(Error::Console)?;
        self.read_line()
    }

    /// Ask a yes/no question; only `S`/`s` counts as yes
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{} (S/N): ", question))?;
        Ok(is_affirmative(&answer))
    }

    /// Print one line
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).map_err(Error::Console)
    }

    /// Print a full-width separator built from `fill`
    pub fn separator(&mut self, fill: char) -> Result<()> {
        let line: String = std::iter::repeat(fill).take(SEPARATOR_WIDTH).collect();
        self.say(&line)
    }

    /// Writer handed to collaborators that render their own output
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Normalise a yes/no answer to a boolean
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(AFFIRMATIVE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_line_trims_trailing_whitespace() {
        let mut c = console("  Calle Mayor 3   \r\n");
        assert_eq!(c.read_line().unwrap(), "  Calle Mayor 3");
    }

    #[test]
    fn test_confirm_is_case_insensitive() {
        let mut c = console("s\nS\nsi\nN\n\n");
        assert!(c.confirm("q1").unwrap());
        assert!(c.confirm("q2").unwrap());
        assert!(!c.confirm("q3").unwrap());
        assert!(!c.confirm("q4").unwrap());
        assert!(!c.confirm("q5").unwrap());
    }

    #[test]
    fn test_prompt_writes_question() {
        let mut c = console("ok\n");
        c.prompt("Nombre: ").unwrap();
        let (_, out) = c.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "Nombre: ");
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut c = Console::new(Cursor::new(b"Calle \xff\nok\n".to_vec()), Vec::new());
        assert_eq!(c.read_line().unwrap(), "Calle \u{FFFD}");
        assert_eq!(c.read_line().unwrap(), "ok");
    }

    #[test]
    fn test_eof_is_input_closed() {
        let mut c = console("");
        assert!(matches!(c.read_line(), Err(Error::InputClosed)));
    }

    #[test]
    fn test_separator_width() {
        let mut c = console("");
        c.separator('=').unwrap();
        let (_, out) = c.into_inner();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end().len(), SEPARATOR_WIDTH);
    }
}
