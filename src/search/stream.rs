//! Result stream carrying matches from workers to the collector
//!
//! The stream is an unbounded many-writer, one-reader channel. Workers write
//! through cloned `Publisher`s; the completion coordinator owns the
//! `StreamHandle` and is the only party that can close it. The reader sees
//! the stream as closed once the handle is closed and every publisher has
//! been dropped, so nothing can be published after closure.

use crossbeam_channel::{Receiver, Sender, unbounded};

use super::entry::Entry;

/// Open a new stream.
pub fn open() -> (StreamHandle, StreamReceiver) {
    let (tx, rx) = unbounded();
    (StreamHandle { master: Some(tx) }, StreamReceiver { rx })
}

/// Owning side of the stream, held by the completion coordinator.
#[derive(Debug)]
pub struct StreamHandle {
    master: Option<Sender<Entry>>,
}

impl StreamHandle {
    /// Create a publisher for one worker. Returns `None` once closed.
    pub fn publisher(&self) -> Option<Publisher> {
        self.master.as_ref().map(|tx| Publisher { tx: tx.clone() })
    }

    /// Transition Open -> Closed. Returns `true` only for the call that
    /// actually closed the stream.
    pub fn close(&mut self) -> bool {
        self.master.take().is_some()
    }
}

/// Write side given to a single worker.
#[derive(Debug, Clone)]
pub struct Publisher {
    tx: Sender<Entry>,
}

impl Publisher {
    /// Publish a match. Never blocks; returns `false` if the reader is gone.
    pub fn publish(&self, entry: Entry) -> bool {
        self.tx.send(entry).is_ok()
    }
}

/// Read side, owned by the collector.
#[derive(Debug)]
pub struct StreamReceiver {
    rx: Receiver<Entry>,
}

impl StreamReceiver {
    /// Block until the next match arrives. Returns `None` once the stream is
    /// closed and drained.
    pub fn next_match(&self) -> Option<Entry> {
        self.rx.recv().ok()
    }
}

impl Iterator for StreamReceiver {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.next_match()
    }
}
