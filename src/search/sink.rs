//! Traits through which a search reports matches and warnings

use std::sync::Mutex;

use crate::error::{SearchWarning, SinkError};

use super::entry::Entry;

/// Destination for matches, driven by the collector in arrival order.
pub trait MatchSink: Send {
    fn emit(&mut self, entry: &Entry) -> Result<(), SinkError>;

    /// Called once after the last match.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl MatchSink for Vec<Entry> {
    fn emit(&mut self, entry: &Entry) -> Result<(), SinkError> {
        self.push(entry.clone());
        Ok(())
    }
}

impl<S: MatchSink + ?Sized> MatchSink for &mut S {
    fn emit(&mut self, entry: &Entry) -> Result<(), SinkError> {
        (**self).emit(entry)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// Receiver of recoverable warnings. Shared by every worker and the
/// collector, so it must be usable from many threads at once.
pub trait WarningSink: Send + Sync {
    fn warn(&self, warning: &SearchWarning);
}

/// Warning sink that keeps rendered warnings in memory.
#[derive(Debug, Default)]
pub struct WarningLog {
    messages: Mutex<Vec<String>>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl WarningSink for WarningLog {
    fn warn(&self, warning: &SearchWarning) {
        let mut messages = match self.messages.lock() {
            Ok(messages) => messages,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push(warning.to_string());
    }
}
