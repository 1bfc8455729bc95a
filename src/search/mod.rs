//! Parallel path-substring search
//!
//! The pipeline, leaves first:
//!
//! - `lister` - lists one directory into `Entry` values
//! - `partition` - splits the root listing into chunks
//! - `worker` - walks one chunk depth-first and publishes matches
//! - `stream` - many-writer, one-reader channel for matches
//! - `collector` - drains the stream into the match set and the output sink
//! - `coordinator` - counts running workers and closes the stream
//! - `searcher` - wires all of the above together

mod cancel;
mod collector;
mod config;
mod coordinator;
mod entry;
mod lister;
mod partition;
mod searcher;
mod sink;
mod stream;
mod worker;

// Re-export public types
pub use cancel::CancelToken;
pub use collector::Collector;
pub use config::{OutputFormat, SearchConfig};
pub use coordinator::{Coordinator, WorkerTicket, WorkerTracker};
pub use entry::{Entry, EntryKind};
pub use lister::{list_dir, list_root};
pub use partition::{chunk_count, partition};
pub use searcher::{SearchOutcome, Searcher};
pub use sink::{MatchSink, WarningLog, WarningSink};
pub use stream::{Publisher, StreamHandle, StreamReceiver, open as open_stream};
pub use worker::{SearchWorker, WorkerReport};
