use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the ranking core and the corpus loader.
#[derive(Debug, Error)]
pub enum QaError {
    /// IDF weights are undefined over a collection with no members.
    #[error("cannot compute idf weights over an empty collection")]
    EmptyCollection,
    /// A ranked identifier has no document behind it.
    #[error("unknown document: {0}")]
    UnknownDocument(String),
    #[error("corpus path is not a directory: {}", .0.display())]
    CorpusDir(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, QaError>;
