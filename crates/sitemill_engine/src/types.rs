use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::persist::PersistError;

/// Failure while converting a single document. Caught by the walker; never
/// aborts the traversal.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("external tool failed: {0}")]
    Tool(String),
}

/// Fatal failure of the whole run.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("cannot create target directory {path}: {source}")]
    TargetDir {
        path: PathBuf,
        source: PersistError,
    },
    #[error("cannot read source directory {path}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },
}

/// One successfully converted document, keyed by its path relative to the
/// target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDoc {
    pub relative_path: String,
    pub title: Option<String>,
    pub markdown_bytes: u64,
}

/// One per-file failure: the source path relative to the source root and the
/// underlying message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub relative_path: String,
    pub message: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub documents: Vec<ConvertedDoc>,
    pub failures: Vec<FileFailure>,
}
