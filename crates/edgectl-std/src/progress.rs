//! Feedback shown while a remote call is in flight.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use console::Term;

use crate::{failure_message, success_message, Style};

/// A start/stop indicator wrapped around a single long-running step.
///
/// A step calls [`Progress::start`], optionally updates the text with
/// [`Progress::message`], then finishes with either [`Progress::stop`] or
/// [`Progress::stop_fail`]. The `*_message` setters choose the text shown
/// once the step is finished.
pub trait Progress {
    fn start(&mut self) -> io::Result<()>;
    fn message(&mut self, text: &str);
    fn stop_message(&mut self, text: &str);
    fn stop(&mut self) -> io::Result<()>;
    fn stop_fail_message(&mut self, text: &str);
    fn stop_fail(&mut self) -> io::Result<()>;
}

/// Picks a spinner when stderr is a terminal and plain lines otherwise.
pub fn for_stderr() -> Box<dyn Progress> {
    if Term::stderr().is_term() {
        Box::new(Spinner::new())
    } else {
        Box::new(TextProgress::new(io::stderr()))
    }
}

fn not_started() -> io::Error {
    io::Error::other("progress indicator was stopped before it was started")
}

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// An animated terminal spinner drawn on stderr from a background thread.
#[derive(Default)]
pub struct Spinner {
    active: Arc<AtomicBool>,
    text: Arc<Mutex<String>>,
    handle: Option<JoinHandle<()>>,
    final_message: String,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish(&mut self, line: String) -> io::Result<()> {
        let handle = self.handle.take().ok_or_else(not_started)?;
        self.active.store(false, Ordering::SeqCst);
        let _ = handle.join();
        self.final_message.clear();

        let term = Term::stderr();
        term.clear_line()?;
        term.show_cursor()?;
        term.write_line(&line)
    }
}

impl Progress for Spinner {
    fn start(&mut self) -> io::Result<()> {
        if self.handle.is_some() {
            return Err(io::Error::other("progress indicator is already running"));
        }
        self.active.store(true, Ordering::SeqCst);
        let active = Arc::clone(&self.active);
        let text = Arc::clone(&self.text);
        let handle = thread::spawn(move || {
            let term = Term::stderr();
            let _ = term.hide_cursor();
            let mut frame = 0;
            while active.load(Ordering::SeqCst) {
                let current = text.lock().map(|t| t.clone()).unwrap_or_default();
                let _ = term.clear_line();
                let _ = term.write_str(&format!(
                    "{} {}",
                    Style::Link.paint(FRAMES[frame].to_string()),
                    current
                ));
                frame = (frame + 1) % FRAMES.len();
                thread::sleep(Duration::from_millis(80));
            }
        });
        self.handle = Some(handle);
        Ok(())
    }

    fn message(&mut self, text: &str) {
        if let Ok(mut current) = self.text.lock() {
            *current = text.to_string();
        }
    }

    fn stop_message(&mut self, text: &str) {
        self.final_message = text.to_string();
    }

    fn stop(&mut self) -> io::Result<()> {
        let line = success_message(&self.final_message);
        self.finish(line)
    }

    fn stop_fail_message(&mut self, text: &str) {
        self.final_message = text.to_string();
    }

    fn stop_fail(&mut self) -> io::Result<()> {
        let line = failure_message(&self.final_message);
        self.finish(line)
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.active.store(false, Ordering::SeqCst);
            let _ = handle.join();
            let _ = Term::stderr().show_cursor();
        }
    }
}

/// Line-oriented progress for non-interactive output. Nothing is drawn
/// while a step runs; a single result line is written when it stops.
pub struct TextProgress<W: Write> {
    out: W,
    running: bool,
    final_message: String,
}

impl<W: Write> TextProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            running: false,
            final_message: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn finish(&mut self, line: String) -> io::Result<()> {
        if !self.running {
            return Err(not_started());
        }
        self.running = false;
        self.final_message.clear();
        writeln!(self.out, "{line}")
    }
}

impl<W: Write> Progress for TextProgress<W> {
    fn start(&mut self) -> io::Result<()> {
        self.running = true;
        Ok(())
    }

    fn message(&mut self, text: &str) {
        tracing::debug!("{text}");
    }

    fn stop_message(&mut self, text: &str) {
        self.final_message = text.to_string();
    }

    fn stop(&mut self) -> io::Result<()> {
        let line = success_message(&self.final_message);
        self.finish(line)
    }

    fn stop_fail_message(&mut self, text: &str) {
        self.final_message = text.to_string();
    }

    fn stop_fail(&mut self) -> io::Result<()> {
        let line = failure_message(&self.final_message);
        self.finish(line)
    }
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn text_progress_writes_one_line_per_step() {
        let mut progress = TextProgress::new(Vec::new());

        progress.start().unwrap();
        progress.message("Creating dictionary 'a'...");
        progress.stop_message("Creating dictionary 'a'");
        progress.stop().unwrap();

        progress.start().unwrap();
        progress.stop_fail_message("Creating dictionary 'b'");
        progress.stop_fail().unwrap();

        let written = String::from_utf8(progress.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_that!(lines).has_length(2);
        assert_that!(lines[0]).ends_with("Creating dictionary 'a'");
        assert_that!(lines[1]).ends_with("Creating dictionary 'b'");
    }

    #[test]
    fn stopping_before_starting_is_an_error() {
        let mut progress = TextProgress::new(Vec::new());
        assert!(progress.stop().is_err());
        assert!(progress.stop_fail().is_err());
    }

    #[test]
    fn spinner_cannot_stop_before_starting() {
        let mut spinner = Spinner::new();
        assert!(spinner.stop().is_err());
    }
}
