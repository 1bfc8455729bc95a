//! Line-oriented match output

use std::io::Write;

use crate::error::SinkError;
use crate::search::{Entry, MatchSink};

/// Writes `[+] <path>` for every match.
pub struct TextSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> MatchSink for TextSink<W> {
    fn emit(&mut self, entry: &Entry) -> Result<(), SinkError> {
        writeln!(self.writer, "[+] {}", entry.path.display())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
