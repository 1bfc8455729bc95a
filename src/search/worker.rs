//! Search worker - walks one chunk of the root listing

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::SearchWarning;

use super::cancel::CancelToken;
use super::entry::Entry;
use super::lister::list_dir;
use super::sink::WarningSink;
use super::stream::Publisher;

/// Counters for a finished worker, summed into the search outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub visited: usize,
    pub skipped_dirs: usize,
}

/// Walks its chunk and every subtree below it, sequentially and depth-first.
///
/// Nested directories are never re-partitioned: all parallelism happens at
/// the root listing.
pub struct SearchWorker {
    id: usize,
    query: Arc<str>,
    publisher: Publisher,
    warnings: Arc<dyn WarningSink>,
    cancel: CancelToken,
}

impl SearchWorker {
    pub fn new(
        id: usize,
        query: Arc<str>,
        publisher: Publisher,
        warnings: Arc<dyn WarningSink>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            id,
            query,
            publisher,
            warnings,
            cancel,
        }
    }

    /// Visit the chunk in pre-order. Consumes the worker so its publisher is
    /// released as soon as the walk ends.
    pub fn run(self, chunk: Vec<Entry>) -> WorkerReport {
        let mut report = WorkerReport::default();

        // Explicit stack, reversed so entries pop in listing order.
        let mut pending: Vec<Entry> = chunk.into_iter().rev().collect();

        while let Some(entry) = pending.pop() {
            if self.cancel.is_cancelled() {
                debug!(worker = self.id, "cancelled");
                break;
            }
            report.visited += 1;

            if entry.matches(&self.query) {
                if self.cancel.is_cancelled() {
                    break;
                }
                self.publisher.publish(entry.clone());
            }

            if entry.is_dir() {
                match list_dir(&entry.path) {
                    Ok(children) => pending.extend(children.into_iter().rev()),
                    Err(source) => {
                        report.skipped_dirs += 1;
                        let warning = SearchWarning::Listing {
                            path: entry.path,
                            source,
                        };
                        warn!(worker = self.id, "{}", warning);
                        self.warnings.warn(&warning);
                    }
                }
            }
        }

        debug!(
            worker = self.id,
            visited = report.visited,
            skipped_dirs = report.skipped_dirs,
            "worker finished"
        );
        report
    }
}
