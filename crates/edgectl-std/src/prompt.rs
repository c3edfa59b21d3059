use std::io::{self, BufRead, Write};

/// Asks the user questions on behalf of a command.
///
/// Commands depend on this trait instead of reading stdin directly, so
/// that resolution logic can be driven by a script in tests or skipped
/// entirely in non-interactive runs.
pub trait Prompter {
    /// Writes a line of text shown before the next question.
    fn note(&mut self, text: &str) -> io::Result<()>;

    /// Writes an empty line.
    fn blank(&mut self) -> io::Result<()>;

    /// Shows `prompt` and reads one line of input, without the line ending.
    /// Returns an empty string when the user just presses enter.
    fn input(&mut self, prompt: &str) -> io::Result<String>;

    /// Asks a yes/no question that defaults to no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.input(&format!("{question} [y/N] "))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// A [`Prompter`] reading answers line by line from any buffered reader.
pub struct LinePrompter<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> LinePrompter<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }
}

impl Prompter for LinePrompter<'_> {
    fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
