//! Completion coordinator
//!
//! Counts running workers and closes the result stream once the count drops
//! back to zero. Every worker holds a `WorkerTicket`; dropping the ticket
//! (normally or while unwinding) marks that worker finished.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use tracing::debug;

use super::stream::{Publisher, StreamHandle};

/// Running-worker counter with a wait-for-zero primitive.
#[derive(Debug, Default)]
pub struct WorkerTracker {
    running: Mutex<usize>,
    idle: Condvar,
}

impl WorkerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        match self.running.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a worker. The count stays raised until the ticket is dropped.
    pub fn enter(self: &Arc<Self>) -> WorkerTicket {
        *self.lock() += 1;
        WorkerTicket {
            tracker: Arc::clone(self),
        }
    }

    pub fn running(&self) -> usize {
        *self.lock()
    }

    /// Block until no worker is running.
    pub fn wait_idle(&self) {
        let mut running = self.lock();
        while *running > 0 {
            running = match self.idle.wait(running) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }
    }

    fn leave(&self) {
        let mut running = self.lock();
        *running -= 1;
        if *running == 0 {
            self.idle.notify_all();
        }
    }
}

/// Proof that a worker is running.
#[derive(Debug)]
pub struct WorkerTicket {
    tracker: Arc<WorkerTracker>,
}

impl Drop for WorkerTicket {
    fn drop(&mut self) {
        self.tracker.leave();
    }
}

/// Owns the stream's closing handle and the worker count.
#[derive(Debug)]
pub struct Coordinator {
    stream: StreamHandle,
    tracker: Arc<WorkerTracker>,
}

impl Coordinator {
    pub fn new(stream: StreamHandle) -> Self {
        Self {
            stream,
            tracker: Arc::new(WorkerTracker::new()),
        }
    }

    /// Register a new worker and hand out its publisher.
    ///
    /// Returns `None` once the stream has been closed.
    pub fn admit(&self) -> Option<(WorkerTicket, Publisher)> {
        let publisher = self.stream.publisher()?;
        Some((self.tracker.enter(), publisher))
    }

    pub fn running(&self) -> usize {
        self.tracker.running()
    }

    /// Wait for every admitted worker to finish, then close the stream.
    /// Returns `true` if this call performed the close.
    pub fn wait_and_close(&mut self) -> bool {
        self.tracker.wait_idle();
        let closed = self.stream.close();
        if closed {
            debug!("all workers finished, result stream closed");
        }
        closed
    }
}
