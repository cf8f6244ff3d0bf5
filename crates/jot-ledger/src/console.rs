//! Operator console seam.

use std::collections::VecDeque;
use std::io;

/// Line-oriented operator I/O: clarification prompts and diagnostics.
pub trait Console {
    /// Show `prompt` and read one line, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the input is closed or unreadable.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Write one line of output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Console fed from a fixed list of answers that records everything written.
///
/// Reading past the last answer fails with `UnexpectedEof`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub lines: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether any written line contains `needle`.
    #[must_use]
    pub fn printed(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}
