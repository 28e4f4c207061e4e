//! Error types for the indexing pipeline and the document adapters.

use std::path::PathBuf;

use thiserror::Error;

use crate::indexer::model::DocumentKind;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: no supported text encoding", path.display())]
    Undecodable { path: PathBuf },

    #[error("failed to write index to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Failure reported by a document adapter. Informational only: the message
/// may be logged but is never stored in the index.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no {0} parser available in this build")]
    Unavailable(DocumentKind),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Word error: {0}")]
    Word(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
