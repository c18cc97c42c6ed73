use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("invalid symbol {symbol:?} at position {position}, only the letters A-Z are recognized")]
    InvalidSymbol { symbol: char, position: usize },
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("corpus word #{index} ({word:?}) is not valid: {source}")]
    InvalidWord {
        index: usize,
        word: String,
        #[source]
        source: TrieError,
    },

    #[error("failed to spawn a build worker: {}", .0)]
    Spawn(#[source] io::Error),

    /// One or more workers died. The partially built trie is discarded.
    #[error("{failed} of {workers} build workers failed: {summary}")]
    Workers {
        failed: usize,
        workers: usize,
        summary: String,
    },
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read corpus file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(
        "exhaustive corpora support word lengths 1 through {}, got {length}",
        crate::corpus::MAX_EXHAUSTIVE_LENGTH
    )]
    UnsupportedLength { length: usize },
}

#[derive(Error, Debug)]
pub enum PresentError {
    #[error("{}", .0)]
    Io(#[from] io::Error),

    #[error("{}", .0)]
    Json(#[from] serde_json::Error),
}
