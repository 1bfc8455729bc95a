//! Colored status lines on stderr
//!
//! Matches go to stdout; everything meant for a human (the search banner,
//! warnings, the summary and fatal errors) goes through `Console` so the
//! match stream stays clean for piping.

use std::io::{self, Write};
use std::sync::Mutex;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::SearchWarning;
use crate::search::WarningSink;

pub struct Console {
    stderr: Mutex<StandardStream>,
}

impl Console {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stderr: Mutex::new(StandardStream::stderr(choice)),
        }
    }

    /// Search banner.
    pub fn info(&self, message: &str) -> io::Result<()> {
        self.write_line(Color::Blue, message)
    }

    /// Final summary.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.write_line(Color::Cyan, message)
    }

    pub fn warning(&self, message: &str) -> io::Result<()> {
        self.write_line(Color::Yellow, message)
    }

    pub fn fatal(&self, message: &str) -> io::Result<()> {
        self.write_line(Color::Red, message)
    }

    fn write_line(&self, color: Color, message: &str) -> io::Result<()> {
        let mut stderr = match self.stderr.lock() {
            Ok(stderr) => stderr,
            Err(poisoned) => poisoned.into_inner(),
        };
        stderr.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(stderr, "{}", message)?;
        stderr.reset()?;
        writeln!(stderr)?;
        Ok(())
    }
}

impl WarningSink for Console {
    fn warn(&self, warning: &SearchWarning) {
        // Nowhere left to report a failing stderr.
        let _ = self.warning(&warning.to_string());
    }
}
