//! pathseek - parallel path-substring search over a directory tree

pub mod error;
pub mod output;
pub mod search;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{SearchError, SearchWarning, SinkError};
pub use output::{Console, FormatSink, JsonSink, TextSink};
pub use search::{
    CancelToken, Entry, EntryKind, MatchSink, OutputFormat, SearchConfig, SearchOutcome, Searcher,
    WarningLog, WarningSink,
};
