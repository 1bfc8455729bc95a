//! Output sinks and console messages
//!
//! - `text` - `[+] <path>` lines
//! - `json` - one structured record per line
//! - `console` - colored banner, warning, summary and fatal lines on stderr

mod console;
mod json;
mod text;

pub use console::Console;
pub use json::JsonSink;
pub use text::TextSink;

use std::io::{self, Write};

use crate::error::SinkError;
use crate::search::{Entry, MatchSink, OutputFormat};

/// Sink chosen by the configured output format, writing to stdout.
pub enum FormatSink<W: Write + Send> {
    Text(TextSink<W>),
    Json(JsonSink<W>),
}

impl FormatSink<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, io::stdout())
    }
}

impl<W: Write + Send> FormatSink<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        match format {
            OutputFormat::Text => FormatSink::Text(TextSink::new(writer)),
            OutputFormat::Json => FormatSink::Json(JsonSink::new(writer)),
        }
    }
}

impl<W: Write + Send> MatchSink for FormatSink<W> {
    fn emit(&mut self, entry: &Entry) -> Result<(), SinkError> {
        match self {
            FormatSink::Text(sink) => sink.emit(entry),
            FormatSink::Json(sink) => sink.emit(entry),
        }
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        match self {
            FormatSink::Text(sink) => sink.finish(),
            FormatSink::Json(sink) => sink.finish(),
        }
    }
}
