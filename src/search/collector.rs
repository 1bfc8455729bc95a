//! Collector - drains the result stream into the match set

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::SearchWarning;

use super::entry::Entry;
use super::sink::{MatchSink, WarningSink};
use super::stream::StreamReceiver;

/// Sole owner of the match set while a search runs.
pub struct Collector<S: MatchSink> {
    sink: S,
    warnings: Arc<dyn WarningSink>,
    matches: Vec<Entry>,
}

impl<S: MatchSink> Collector<S> {
    pub fn new(sink: S, warnings: Arc<dyn WarningSink>) -> Self {
        Self {
            sink,
            warnings,
            matches: Vec::new(),
        }
    }

    /// Read until the stream is closed and drained, emitting each match as
    /// it arrives. Returns the match set and the sink.
    ///
    /// A failed emission is reported as a warning; the match stays counted.
    pub fn drain(mut self, stream: StreamReceiver) -> (Vec<Entry>, S) {
        for entry in stream {
            if let Err(source) = self.sink.emit(&entry) {
                self.report(SearchWarning::Emission {
                    path: entry.path.clone(),
                    source,
                });
            }
            self.matches.push(entry);
        }

        if let Err(source) = self.sink.finish() {
            warn!("failed to finish output: {}", source);
        }
        debug!(matches = self.matches.len(), "collector finished");
        (self.matches, self.sink)
    }

    fn report(&self, warning: SearchWarning) {
        warn!("{}", warning);
        self.warnings.warn(&warning);
    }
}
