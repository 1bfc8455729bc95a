//! Error types for pathseek
//!
//! Fatal errors (`SearchError`) abort the search before any worker starts.
//! Recoverable problems found while searching are `SearchWarning`s: they are
//! handed to a `WarningSink` and never propagate past the worker or collector
//! that hit them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration or root-listing error.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The root points at something that is not a directory
    #[error("Root is a file, not a directory: {}", .0.display())]
    RootIsFile(PathBuf),

    /// The root could not be listed
    #[error("Error getting paths for {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Neither `--query` nor a positional query was given
    #[error("No query provided")]
    NoQuery,

    /// The root was empty and no home directory is known
    #[error("Error getting user home directory: HOME is not set")]
    HomeUnresolved,

    /// A relative root could not be made absolute
    #[error("Error getting current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Error from a single emission to an output sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Recoverable problem reported while a search is running.
#[derive(Error, Debug)]
pub enum SearchWarning {
    /// A subdirectory could not be listed; its subtree is skipped
    #[error("Error getting subpaths for {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A match could not be written to the output sink
    #[error("Error emitting {}: {source}", path.display())]
    Emission {
        path: PathBuf,
        #[source]
        source: SinkError,
    },
}

impl SearchWarning {
    /// Path the warning is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            SearchWarning::Listing { path, .. } => path,
            SearchWarning::Emission { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
