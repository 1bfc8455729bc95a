//! Searcher - runs the whole search pipeline
//!
//! The root is listed once and its entries are partitioned into chunks.
//! Each chunk gets one worker on the thread pool; the workers, the collector
//! and the completion coordinator all run at the same time. The caller
//! blocks until the collector finishes, which happens exactly once, after
//! the coordinator has seen every worker exit and closed the stream.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error};

use crate::error::{Result, SearchWarning};

use super::cancel::CancelToken;
use super::collector::Collector;
use super::config::SearchConfig;
use super::coordinator::{Coordinator, WorkerTicket};
use super::entry::Entry;
use super::lister::list_root;
use super::partition::partition;
use super::sink::{MatchSink, WarningLog, WarningSink};
use super::stream;
use super::worker::{SearchWorker, WorkerReport};

/// Result of a completed search. Owned by the caller once `run` returns.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Matches in the order the collector received them
    pub matches: Vec<Entry>,
    /// Number of recoverable warnings reported
    pub warnings: usize,
    /// Number of workers spawned for the root listing
    pub workers: usize,
    /// Entries visited across all workers
    pub visited: usize,
    /// Directories whose contents could not be listed
    pub skipped_dirs: usize,
    pub elapsed: Duration,
    /// Whether the search was cut short by its cancel token
    pub cancelled: bool,
}

impl SearchOutcome {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Warning sink wrapper that counts what passes through it.
struct CountingWarnings {
    inner: Arc<dyn WarningSink>,
    count: AtomicUsize,
}

impl WarningSink for CountingWarnings {
    fn warn(&self, warning: &SearchWarning) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.inner.warn(warning);
    }
}

#[derive(Default)]
struct Totals {
    visited: AtomicUsize,
    skipped_dirs: AtomicUsize,
}

impl Totals {
    fn add(&self, report: WorkerReport) {
        self.visited.fetch_add(report.visited, Ordering::Relaxed);
        self.skipped_dirs.fetch_add(report.skipped_dirs, Ordering::Relaxed);
    }
}

/// Run `job` on `pool`, or rayon's global pool, while holding `ticket`.
///
/// A panic inside the job is caught and logged so it cannot take the pool
/// down with it. The ticket is released either way.
fn spawn_worker<F>(pool: Option<&rayon::ThreadPool>, id: usize, ticket: WorkerTicket, job: F)
where
    F: FnOnce() + Send + 'static,
{
    let task = move || {
        let _ticket = ticket;
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!(worker = id, "worker panicked, part of the tree was not searched");
        }
    };
    match pool {
        Some(pool) => pool.spawn(task),
        None => rayon::spawn(task),
    }
}

/// Parallel path-substring search over a directory tree.
pub struct Searcher {
    config: Arc<SearchConfig>,
    warnings: Arc<dyn WarningSink>,
    cancel: CancelToken,
    seed: Option<u64>,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config: Arc::new(config),
            warnings: Arc::new(WarningLog::new()),
            cancel: CancelToken::new(),
            seed: None,
        }
    }

    /// Send recoverable warnings to `warnings` instead of an in-memory log.
    pub fn with_warnings(mut self, warnings: Arc<dyn WarningSink>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Make the chunk count reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search, streaming every match into `sink` as it is found.
    ///
    /// Fails only if the root itself cannot be searched; nothing is spawned
    /// or emitted in that case.
    pub fn run<S: MatchSink>(&self, sink: &mut S) -> Result<SearchOutcome> {
        let start = Instant::now();

        let entries = list_root(&self.config.root)?;
        debug!(root = %self.config.root.display(), entries = entries.len(), "listed root");

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let chunks = partition(entries, &mut rng);
        debug!(chunks = chunks.len(), "partitioned root listing");

        let (handle, receiver) = stream::open();
        let mut coordinator = Coordinator::new(handle);
        let warnings = Arc::new(CountingWarnings {
            inner: Arc::clone(&self.warnings),
            count: AtomicUsize::new(0),
        });
        let query: Arc<str> = Arc::from(self.config.query.as_str());
        let totals = Arc::new(Totals::default());
        let pool = self.build_pool();

        let mut workers = 0;
        for (id, chunk) in chunks.into_iter().enumerate() {
            let Some((ticket, publisher)) = coordinator.admit() else {
                break;
            };
            let worker = SearchWorker::new(
                id,
                Arc::clone(&query),
                publisher,
                warnings.clone(),
                self.cancel.clone(),
            );
            let totals = Arc::clone(&totals);
            spawn_worker(pool.as_ref(), id, ticket, move || {
                totals.add(worker.run(chunk));
            });
            workers += 1;
        }
        debug!(workers, "workers spawned");

        let collector = Collector::new(sink, warnings.clone());
        let matches = thread::scope(|s| {
            let collecting = s.spawn(move || collector.drain(receiver));
            s.spawn(move || coordinator.wait_and_close());
            match collecting.join() {
                Ok((matches, _)) => matches,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        });

        let visited = totals.visited.load(Ordering::Relaxed);
        let skipped_dirs = totals.skipped_dirs.load(Ordering::Relaxed);
        debug!(visited, skipped_dirs, "search finished");

        Ok(SearchOutcome {
            matches,
            warnings: warnings.count.load(Ordering::Relaxed),
            workers,
            visited,
            skipped_dirs,
            elapsed: start.elapsed(),
            cancelled: self.cancel.is_cancelled(),
        })
    }

    /// Dedicated pool when a worker count is configured; `None` means
    /// rayon's global pool.
    fn build_pool(&self) -> Option<rayon::ThreadPool> {
        if self.config.workers == 0 {
            return None;
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("pathseek-worker-{}", i))
            .build()
            .ok()
    }
}
